use log::debug;

use crate::ruchants_structs::{ValueType, WindowTable};

/// Number of windows of length `1..=max_len` in an array of `array_length` elements.
pub fn count_total_windows(array_length: usize, max_len: usize) -> usize {
    (1..=array_length)
        .map(|left| max_len.min(array_length - left + 1))
        .sum()
}

/// Enumerates every window of length at most `max_len`, grouped by left endpoint
/// and, within one left endpoint, by increasing right endpoint.
///
/// Sums are accumulated as the right endpoint advances, so each window costs O(1).
pub fn build_windows<T: ValueType>(values: &[T], max_len: usize) -> WindowTable {
    let array_length = values.len();
    let total_windows = count_total_windows(array_length, max_len);
    let mut table = WindowTable::with_capacity(total_windows);

    for left in 0..array_length {
        let max_right = array_length.min(left + max_len);
        let mut running_sum = 0i64;

        for right in left..max_right {
            let value: i64 = values[right].into();
            running_sum += value;
            table.push(running_sum, left as u32 + 1, right as u32 + 1);
        }
    }

    debug_assert_eq!(table.len(), total_windows);
    debug!(
        "built {} windows for n={} M={}",
        table.len(),
        array_length,
        max_len
    );

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_total_windows() {
        assert_eq!(count_total_windows(1, 1), 1);
        assert_eq!(count_total_windows(5, 20), 15);
        assert_eq!(count_total_windows(6, 1), 6);
        assert_eq!(count_total_windows(200_000, 20), 200_000 * 20 - 190);
    }

    #[test]
    fn test_build_windows_small() {
        let table = build_windows(&[1i64, 2, 3], 2);

        assert_eq!(table.sums, vec![1, 3, 2, 5, 3]);
        assert_eq!(table.lefts, vec![1, 1, 2, 2, 3]);
        assert_eq!(table.rights, vec![1, 2, 2, 3, 3]);
    }

    #[test]
    fn test_build_windows_sums_match_prefix_sums() {
        let values: Vec<i32> = vec![4, -7, 0, 13, -2, 9, 9, -30, 1];
        let mut prefix = vec![0i64; values.len() + 1];
        for i in 0..values.len() {
            prefix[i + 1] = prefix[i] + values[i] as i64;
        }

        let table = build_windows(&values, 4);
        assert_eq!(table.len(), count_total_windows(values.len(), 4));

        for i in 0..table.len() {
            let (l, r) = (table.lefts[i] as usize, table.rights[i] as usize);
            assert!(l <= r && r - l + 1 <= 4 && r <= values.len());
            assert_eq!(table.sums[i], prefix[r] - prefix[l - 1]);
        }
    }

    #[test]
    fn test_build_windows_does_not_overflow() {
        let values = vec![1_000_000_000i64; 50];
        let table = build_windows(&values, 20);

        assert_eq!(table.sums.iter().copied().max(), Some(20_000_000_000));
        assert_eq!(table.sums.iter().copied().min(), Some(1_000_000_000));
    }
}
