use anyhow::{bail, Result};
use num_traits::{PrimInt, Signed};
use serde::{Deserialize, Serialize};

pub const MAX_ARRAY_LENGTH: usize = 200_000;
pub const MAX_WINDOW_LENGTH: usize = 20;
pub const MAX_ABS_VALUE: i64 = 1_000_000_000;

/// Element type of the input array. Every value widens losslessly to `i64`,
/// which is also the type all window sums are accumulated in.
pub trait ValueType: PrimInt + Signed + Into<i64> + radsort::Key + std::fmt::Display {}
impl<T> ValueType for T where T: PrimInt + Signed + Into<i64> + radsort::Key + std::fmt::Display {}

/// A contiguous, 1-based, inclusive range `[left, right]` of the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub left: u32,
    pub right: u32,
}

impl Window {
    pub fn len(&self) -> u32 {
        self.right - self.left + 1
    }

    /// Ordering key of a selection: right endpoint first, then left.
    pub fn order_key(&self) -> (u32, u32) {
        (self.right, self.left)
    }
}

/// Every candidate window of one instance, stored column-wise.
/// Index `i` in each column describes the same window.
#[derive(Debug, Clone, Default)]
pub struct WindowTable {
    pub sums: Vec<i64>,
    pub lefts: Vec<u32>,
    pub rights: Vec<u32>,
}

impl WindowTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sums: Vec::with_capacity(capacity),
            lefts: Vec::with_capacity(capacity),
            rights: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sum: i64, left: u32, right: u32) {
        self.sums.push(sum);
        self.lefts.push(left);
        self.rights.push(right);
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    pub fn window(&self, idx: u32) -> Window {
        Window {
            left: self.lefts[idx as usize],
            right: self.rights[idx as usize],
        }
    }
}

/// The best (count, sum, selection) triple of an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub count: u32,
    pub sum: i64,
    pub windows: Vec<Window>,
}

impl Answer {
    pub fn new(sum: i64, windows: Vec<Window>) -> Self {
        Self {
            count: windows.len() as u32,
            sum,
            windows,
        }
    }
}

/// One problem instance: the array together with `M` and `D`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub max_len: usize,
    pub min_gap: usize,
    pub values: Vec<i64>,
}

impl Instance {
    pub fn new(max_len: usize, min_gap: usize, values: Vec<i64>) -> Self {
        Self {
            max_len,
            min_gap,
            values,
        }
    }

    pub fn array_length(&self) -> usize {
        self.values.len()
    }

    pub fn check_constraints(&self) -> Result<()> {
        check_constraints(&self.values, self.max_len, self.min_gap)
    }
}

/// Checks `1 <= n <= 200000`, `1 <= M <= 20`, `0 <= D <= n` and `|a_i| <= 10^9`.
pub fn check_constraints<T: ValueType>(values: &[T], max_len: usize, min_gap: usize) -> Result<()> {
    let n = values.len();
    if n < 1 || n > MAX_ARRAY_LENGTH {
        bail!("n={} out of constraints [1..{}]", n, MAX_ARRAY_LENGTH);
    }
    if max_len < 1 || max_len > MAX_WINDOW_LENGTH {
        bail!("M={} out of constraints [1..{}]", max_len, MAX_WINDOW_LENGTH);
    }
    if min_gap > n {
        bail!("D={} out of constraints [0..n={}]", min_gap, n);
    }
    for (i, &v) in values.iter().enumerate() {
        let v: i64 = v.into();
        if !(-MAX_ABS_VALUE..=MAX_ABS_VALUE).contains(&v) {
            bail!("a[{}]={} out of constraints [-1e9..1e9]", i + 1, v);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_order_key_puts_right_first() {
        let w = Window { left: 3, right: 7 };
        assert_eq!(w.order_key(), (7, 3));
        assert_eq!(w.len(), 5);
    }

    #[test]
    fn test_check_constraints() {
        assert!(check_constraints(&[5i64], 1, 0).is_ok());
        assert!(check_constraints(&[5i64], 1, 1).is_ok());
        assert!(check_constraints::<i64>(&[], 1, 0).is_err());
        assert!(check_constraints(&[5i64], 0, 0).is_err());
        assert!(check_constraints(&[5i64], 21, 0).is_err());
        assert!(check_constraints(&[5i64], 1, 2).is_err());
        assert!(check_constraints(&[1_000_000_001i64], 1, 0).is_err());
        assert!(check_constraints(&[-1_000_000_000i64, 7], 20, 2).is_ok());
    }
}
