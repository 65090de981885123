/// Built-in item palette, consumed in document order by the resolver.
pub const DEFAULT_PALETTE: [&str; 15] = [
    "#3b82f6", // blue
    "#10b981", // emerald
    "#f59e0b", // amber
    "#ef4444", // red
    "#8b5cf6", // violet
    "#ec4899", // pink
    "#14b8a6", // teal
    "#f97316", // orange
    "#6366f1", // indigo
    "#84cc16", // lime
    "#06b6d4", // cyan
    "#a855f7", // purple
    "#eab308", // yellow
    "#22c55e", // green
    "#64748b", // slate
];

pub fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|value| value.to_string()).collect()
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub title_font_size: f32,
    pub text_color: String,
    pub title_color: String,
    pub header_fill: String,
    pub header_text_color: String,
    pub grid_color: String,
    pub lane_fill: String,
    pub lane_alt_fill: String,
    pub lane_border: String,
    pub lane_label_color: String,
    pub item_radius: f32,
    pub background: String,
}

impl Theme {
    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            title_font_size: 20.0,
            text_color: "#1C2430".to_string(),
            title_color: "#1C2430".to_string(),
            header_fill: "#EEF2F8".to_string(),
            header_text_color: "#1C2430".to_string(),
            grid_color: "#D7E0F0".to_string(),
            lane_fill: "#FFFFFF".to_string(),
            lane_alt_fill: "#F7FAFF".to_string(),
            lane_border: "#C7D2E5".to_string(),
            lane_label_color: "#1C2430".to_string(),
            item_radius: 6.0,
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 14.0,
            title_font_size: 22.0,
            text_color: "#333333".to_string(),
            title_color: "#333333".to_string(),
            header_fill: "#ECECFF".to_string(),
            header_text_color: "#333333".to_string(),
            grid_color: "#CCCCCC".to_string(),
            lane_fill: "#FFFFFF".to_string(),
            lane_alt_fill: "#FFFFDE".to_string(),
            lane_border: "#9370DB".to_string(),
            lane_label_color: "#333333".to_string(),
            item_radius: 3.0,
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "modern" => Some(Self::modern()),
            "classic" | "default" | "base" => Some(Self::classic()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::modern()
    }
}

/// Parses `#rgb` / `#rrggbb` into channel bytes.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expand = |c: char| c.to_digit(16).map(|v| (v * 17) as u8);
    match hex.len() {
        3 => {
            let mut chars = hex.chars();
            Some((
                expand(chars.next()?)?,
                expand(chars.next()?)?,
                expand(chars.next()?)?,
            ))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Picks dark or white label text for a fill. Unparseable fills get white.
pub fn contrast_text_color(fill: &str) -> &'static str {
    let Some((r, g, b)) = parse_hex_color(fill) else {
        return "#FFFFFF";
    };
    let luminance = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0;
    if luminance > 0.6 { "#1C2430" } else { "#FFFFFF" }
}
