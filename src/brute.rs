use std::cmp::Ordering;

use radsort::sort_by_key;
use rustc_hash::FxHashMap;

use crate::ruchants_structs::{Answer, ValueType, Window};

/// Lexicographic comparison of two selections under (right, left).
fn compare_selections(a: &[Window], b: &[Window]) -> Ordering {
    a.iter()
        .map(Window::order_key)
        .cmp(b.iter().map(Window::order_key))
}

/// Longest spacing-valid chain inside one sum group, lexicographically smallest
/// among the longest. `windows` must be ordered by (right, left).
fn best_chain(windows: &[Window], min_gap: u64) -> Vec<Window> {
    // chains[x]: best chain that ends with windows[x]
    let mut chains: Vec<Vec<Window>> = Vec::with_capacity(windows.len());

    for (x, &current) in windows.iter().enumerate() {
        let mut best: Option<&Vec<Window>> = None;
        for (y, previous) in windows[..x].iter().enumerate() {
            if current.left as u64 <= previous.right as u64 + min_gap {
                continue;
            }
            let candidate = &chains[y];
            best = match best {
                None => Some(candidate),
                Some(incumbent) => match candidate.len().cmp(&incumbent.len()) {
                    Ordering::Greater => Some(candidate),
                    Ordering::Equal
                        if compare_selections(candidate, incumbent) == Ordering::Less =>
                    {
                        Some(candidate)
                    }
                    _ => Some(incumbent),
                },
            };
        }

        let mut chain = best.cloned().unwrap_or_default();
        chain.push(current);
        chains.push(chain);
    }

    chains
        .into_iter()
        .reduce(|incumbent, candidate| {
            match candidate.len().cmp(&incumbent.len()) {
                Ordering::Greater => candidate,
                Ordering::Equal if compare_selections(&candidate, &incumbent) == Ordering::Less => {
                    candidate
                }
                _ => incumbent,
            }
        })
        .unwrap_or_default()
}

/// Exhaustive reference solver: groups windows by sum in a hash map and runs a
/// quadratic chain DP per group instead of the greedy scan. Quadratic in the group
/// size, so only meant for arrays of a few hundred elements.
pub fn brute_force<T: ValueType>(values: &[T], max_len: usize, min_gap: usize) -> Answer {
    let mut by_sum: FxHashMap<i64, Vec<Window>> = FxHashMap::default();

    for left in 0..values.len() {
        let mut sum = 0i64;
        for right in left..values.len().min(left + max_len) {
            let value: i64 = values[right].into();
            sum += value;
            by_sum.entry(sum).or_default().push(Window {
                left: left as u32 + 1,
                right: right as u32 + 1,
            });
        }
    }

    let mut best: Option<Answer> = None;
    for (sum, mut windows) in by_sum {
        sort_by_key(&mut windows, |w| (w.right, w.left));
        let chain = best_chain(&windows, min_gap as u64);

        let take = match &best {
            None => true,
            Some(incumbent) => match (chain.len() as u32).cmp(&incumbent.count) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => match sum.cmp(&incumbent.sum) {
                    Ordering::Less => true,
                    Ordering::Greater => false,
                    Ordering::Equal => {
                        compare_selections(&chain, &incumbent.windows) == Ordering::Less
                    }
                },
            },
        };

        if take {
            best = Some(Answer::new(sum, chain));
        }
    }

    best.unwrap_or_else(|| Answer::new(0, Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(left: u32, right: u32) -> Window {
        Window { left, right }
    }

    #[test]
    fn test_best_chain_prefers_length_over_early_end() {
        let windows = vec![w(1, 3), w(1, 1), w(2, 2), w(3, 3)];
        let mut sorted = windows.clone();
        sort_by_key(&mut sorted, |w| (w.right, w.left));

        assert_eq!(best_chain(&sorted, 0), vec![w(1, 1), w(2, 2), w(3, 3)]);
        assert_eq!(best_chain(&sorted, 1), vec![w(1, 1), w(3, 3)]);
    }

    #[test]
    fn test_best_chain_lexicographic_tie() {
        // [2,2]+[4,4] and [1,2]+[4,4] tie on length; (2,1) < (2,2)
        let sorted = vec![w(1, 2), w(2, 2), w(4, 4)];
        assert_eq!(best_chain(&sorted, 0), vec![w(1, 2), w(4, 4)]);
    }

    #[test]
    fn test_brute_force_scenarios() {
        assert_eq!(brute_force(&[5i64], 1, 0), Answer::new(5, vec![w(1, 1)]));
        assert_eq!(
            brute_force(&[0i64, -1, 7, 0, -1, 8], 1, 2),
            Answer::new(-1, vec![w(2, 2), w(5, 5)])
        );
        assert_eq!(
            brute_force(&[-1i64, 0, -1, 0], 1, 1),
            Answer::new(-1, vec![w(1, 1), w(3, 3)])
        );
    }
}
