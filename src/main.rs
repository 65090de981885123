fn main() {
    if let Err(err) = roadmap_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
