use log::debug;

use crate::{
    ruchants_structs::{Answer, Instance, ValueType, Window, WindowTable},
    sorts::sort_windows,
    windows::build_windows,
};

/// Greedy earliest-end selection with a minimum gap of `min_gap` free positions
/// between consecutive windows. Windows must be offered in (right, left) order.
#[derive(Debug, Clone, Copy)]
struct GapGreedy {
    min_gap: u64,
    last_right: Option<u32>,
}

impl GapGreedy {
    fn new(min_gap: usize) -> Self {
        Self {
            min_gap: min_gap as u64,
            last_right: None,
        }
    }

    /// Takes the window if it starts after `last_right + min_gap`.
    fn offer(&mut self, left: u32, right: u32) -> bool {
        let fits = match self.last_right {
            None => true,
            Some(last_right) => left as u64 > last_right as u64 + self.min_gap,
        };
        if fits {
            self.last_right = Some(right);
        }
        fits
    }
}

/// A run `order[start..end]` of windows sharing `sum`, and the greedy count it yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SumGroup {
    pub sum: i64,
    pub start: usize,
    pub end: usize,
    pub count: u32,
}

/// Scans `order` once, splitting it into runs of equal sum and running the greedy
/// selection over each run. Keeps the first run with the strictly largest count;
/// runs arrive in ascending sum order, so that run also has the smallest sum.
pub fn find_best_group(order: &[u32], table: &WindowTable, min_gap: usize) -> SumGroup {
    let mut best = SumGroup {
        sum: 0,
        start: 0,
        end: 0,
        count: 0,
    };
    let mut groups = 0usize;
    let mut position = 0;

    while position < order.len() {
        let group_start = position;
        let current_sum = table.sums[order[position] as usize];
        let mut greedy = GapGreedy::new(min_gap);
        let mut count = 0u32;

        while position < order.len() {
            let idx = order[position] as usize;
            if table.sums[idx] != current_sum {
                break;
            }
            if greedy.offer(table.lefts[idx], table.rights[idx]) {
                count += 1;
            }
            position += 1;
        }
        groups += 1;

        if count > best.count {
            best = SumGroup {
                sum: current_sum,
                start: group_start,
                end: position,
                count,
            };
        }
    }

    debug!(
        "scanned {} sum groups, best count={} sum={}",
        groups, best.count, best.sum
    );

    best
}

/// Replays the greedy selection over one group and returns the chosen windows.
pub fn reconstruct_selection(
    order: &[u32],
    table: &WindowTable,
    group: &SumGroup,
    min_gap: usize,
) -> Vec<Window> {
    let mut greedy = GapGreedy::new(min_gap);

    order[group.start..group.end]
        .iter()
        .map(|&idx| table.window(idx))
        .filter(|w| greedy.offer(w.left, w.right))
        .collect()
}

/// Largest set of equal-sum windows of length at most `max_len` where consecutive
/// windows leave at least `min_gap` untouched positions between them.
///
/// Ties on the count go to the smallest sum, and among those to the selection that
/// is lexicographically smallest under (right, left). `values` must be non-empty and
/// satisfy the instance constraints; they are not re-checked here.
pub fn max_equal_sum_windows<T: ValueType>(values: &[T], max_len: usize, min_gap: usize) -> Answer {
    let table = build_windows(values, max_len);
    let order = sort_windows(&table, values.len());
    let best = find_best_group(&order, &table, min_gap);
    let windows = reconstruct_selection(&order, &table, &best, min_gap);

    debug_assert_eq!(windows.len(), best.count as usize);

    Answer::new(best.sum, windows)
}

pub fn solve_instance(instance: &Instance) -> Answer {
    max_equal_sum_windows(&instance.values, instance.max_len, instance.min_gap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute::brute_force;
    use proptest::prelude::*;

    fn w(left: u32, right: u32) -> Window {
        Window { left, right }
    }

    #[test]
    fn test_single_element() {
        let answer = max_equal_sum_windows(&[5i64], 1, 0);
        assert_eq!(answer, Answer::new(5, vec![w(1, 1)]));
    }

    #[test]
    fn test_min_sum_wins_count_tie() {
        let answer = max_equal_sum_windows(&[0i64, -1, 7, 0, -1, 8], 1, 2);
        assert_eq!(answer, Answer::new(-1, vec![w(2, 2), w(5, 5)]));
    }

    #[test]
    fn test_all_zero_singletons_adjacent() {
        let answer = max_equal_sum_windows(&[0i64; 6], 1, 0);
        let expected: Vec<Window> = (1..=6).map(|i| w(i, i)).collect();
        assert_eq!(answer, Answer::new(0, expected));
    }

    #[test]
    fn test_max_len_exceeding_array() {
        // only sums 3 ([1,2] then [3]) and 5 ([2,3] then [5]) repeat; both reach k=2
        let answer = max_equal_sum_windows(&[1i64, 2, 3, 4, 5], 20, 0);
        assert_eq!(answer, Answer::new(3, vec![w(1, 2), w(3, 3)]));
    }

    #[test]
    fn test_overflow_stress_single_window() {
        let values = vec![1_000_000_000i64; 50];
        let answer = max_equal_sum_windows(&values, 20, 50);
        assert_eq!(answer, Answer::new(1_000_000_000, vec![w(1, 1)]));
    }

    #[test]
    fn test_gap_boundary_is_exact() {
        // D=1, M=1: positions 1, 3, 5, 7 are exactly one apart
        let answer = max_equal_sum_windows(&[0i64; 7], 1, 1);
        assert_eq!(answer, Answer::new(0, vec![w(1, 1), w(3, 3), w(5, 5), w(7, 7)]));
    }

    #[test]
    fn test_smaller_left_wins_on_equal_right() {
        // sum 5 ends at 3 both as [1,3] and [3,3]
        let answer = max_equal_sum_windows(&[1i64, -1, 5, 5], 3, 0);
        assert_eq!(answer, Answer::new(5, vec![w(1, 3), w(4, 4)]));
        assert_eq!(answer, brute_force(&[1, -1, 5, 5], 3, 0));
    }

    #[test]
    fn test_alternating_signs_prefers_count() {
        let values = [2i64, -2, 2, -2, 2, -2, 2];
        let answer = max_equal_sum_windows(&values, 4, 0);
        assert_eq!(answer.count, 4);
        assert_eq!(answer, brute_force(&values, 4, 0));
    }

    #[test]
    fn test_i32_values() {
        let answer = max_equal_sum_windows(&[3i32, -3, 3, -3], 2, 0);
        assert_eq!(answer, Answer::new(-3, vec![w(2, 2), w(4, 4)]));
    }

    #[test]
    fn test_deterministic() {
        let values: Vec<i64> = (0..300).map(|i| ((i * 7919) % 23) as i64 - 11).collect();
        let first = max_equal_sum_windows(&values, 6, 2);
        let second = max_equal_sum_windows(&values, 6, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_large_all_zeros() {
        let values = vec![0i64; 20_000];
        let answer = max_equal_sum_windows(&values, 20, 0);
        assert_eq!(answer.count, 20_000);
        assert_eq!(answer.sum, 0);
        assert_eq!(answer.windows.last(), Some(&w(20_000, 20_000)));
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force(
            values in prop::collection::vec(-3i64..=3, 1..40),
            max_len in 1usize..=6,
            gap_seed in 0usize..=40,
        ) {
            let min_gap = gap_seed % (values.len() + 1);
            prop_assert_eq!(
                max_equal_sum_windows(&values, max_len, min_gap),
                brute_force(&values, max_len, min_gap)
            );
        }

        #[test]
        fn prop_matches_brute_force_wide_values(
            values in prop::collection::vec(-1_000_000_000i64..=1_000_000_000, 1..25),
            max_len in 1usize..=20,
            gap_seed in 0usize..=25,
        ) {
            let min_gap = gap_seed % (values.len() + 1);
            prop_assert_eq!(
                max_equal_sum_windows(&values, max_len, min_gap),
                brute_force(&values, max_len, min_gap)
            );
        }
    }
}
