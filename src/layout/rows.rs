//! Greedy first-fit interval packing.
//!
//! Items are visited in ascending start order (stable for ties) and each one
//! goes into the first row whose last end is `<=` its start. For interval
//! graphs this uses exactly as many rows as the deepest overlap.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowAssignment {
    /// Row of each input item, in input order.
    pub rows: Vec<usize>,
    pub row_count: usize,
}

pub fn assign_rows(intervals: &[(f64, f64)]) -> RowAssignment {
    assign_rows_by(intervals, |interval| *interval)
}

pub fn assign_rows_by<T, F>(items: &[T], interval: F) -> RowAssignment
where
    F: Fn(&T) -> (f64, f64),
{
    let spans: Vec<(f64, f64)> = items.iter().map(&interval).collect();
    let mut order: Vec<usize> = (0..spans.len()).collect();
    // sort_by is stable, so equal starts keep their input order.
    order.sort_by(|&a, &b| spans[a].0.total_cmp(&spans[b].0));

    let mut row_ends: Vec<f64> = Vec::new();
    let mut rows = vec![0; spans.len()];
    for idx in order {
        let (start, end) = spans[idx];
        match row_ends.iter().position(|&row_end| row_end <= start) {
            Some(row) => {
                row_ends[row] = end;
                rows[idx] = row;
            }
            None => {
                rows[idx] = row_ends.len();
                row_ends.push(end);
            }
        }
    }

    RowAssignment {
        rows,
        row_count: row_ends.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn max_overlap(intervals: &[(f64, f64)]) -> usize {
        intervals
            .iter()
            .map(|&(point, _)| {
                intervals
                    .iter()
                    .filter(|&&(start, end)| start <= point && point < end)
                    .count()
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn empty_input_has_no_rows() {
        let result = assign_rows(&[]);
        assert_eq!(result.row_count, 0);
        assert!(result.rows.is_empty());
    }

    #[test]
    fn overlapping_items_split_and_free_row_is_reused() {
        let result = assign_rows(&[(0.0, 2.0), (0.0, 2.0), (2.0, 3.0)]);
        assert_eq!(result.rows, vec![0, 1, 0]);
        assert_eq!(result.row_count, 2);
    }

    #[test]
    fn rows_follow_input_order_after_sorting() {
        let result = assign_rows(&[(3.0, 4.0), (0.0, 1.0), (0.5, 3.5)]);
        assert_eq!(result.rows, vec![0, 0, 1]);
        assert_eq!(result.row_count, 2);
    }

    #[test]
    fn fractional_touching_intervals_share_a_row() {
        let result = assign_rows(&[(0.0, 0.5), (0.5, 1.25), (1.25, 2.0)]);
        assert_eq!(result.rows, vec![0, 0, 0]);
    }

    #[test]
    fn first_free_row_wins() {
        // Rows 0 and 1 both free at 5; the item must land in row 0.
        let result = assign_rows(&[(0.0, 2.0), (0.0, 3.0), (5.0, 6.0)]);
        assert_eq!(result.rows, vec![0, 1, 0]);
    }

    fn intervals() -> impl Strategy<Value = Vec<(f64, f64)>> {
        proptest::collection::vec((0u32..40, 1u32..10), 0..40).prop_map(|raw| {
            raw.into_iter()
                .map(|(start, len)| (start as f64 / 2.0, (start + len) as f64 / 2.0))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn rows_never_overlap(intervals in intervals()) {
            let result = assign_rows(&intervals);
            for a in 0..intervals.len() {
                for b in (a + 1)..intervals.len() {
                    if result.rows[a] == result.rows[b] {
                        let (s1, e1) = intervals[a];
                        let (s2, e2) = intervals[b];
                        prop_assert!(e1 <= s2 || e2 <= s1);
                    }
                }
            }
        }

        #[test]
        fn row_count_matches_max_overlap(intervals in intervals()) {
            let result = assign_rows(&intervals);
            prop_assert_eq!(result.row_count, max_overlap(&intervals));
            prop_assert!(result.rows.iter().all(|&row| row < result.row_count.max(1)));
        }

        #[test]
        fn packing_is_idempotent(intervals in intervals()) {
            prop_assert_eq!(assign_rows(&intervals), assign_rows(&intervals));
        }
    }
}
