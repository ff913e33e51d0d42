use log::debug;

use crate::ruchants_structs::WindowTable;

/// Added (mod 2^64) to a signed sum to obtain an unsigned key with the same ordering.
pub const SUM_BIAS: u64 = 1 << 63;

const RADIX_BITS: u32 = 16;
const RADIX_SIZE: usize = 1 << RADIX_BITS;
const RADIX_MASK: u64 = (RADIX_SIZE as u64) - 1;
const RADIX_PASSES: u32 = u64::BITS / RADIX_BITS;

/// Maps a signed sum onto `sum + 2^63` as an unsigned key. The bias stays inside the
/// sorter: nothing outside this module sees a key.
#[inline]
pub fn sum_key(sum: i64) -> u64 {
    (sum as u64) ^ SUM_BIAS
}

#[inline]
pub fn sum_from_key(key: u64) -> i64 {
    (key ^ SUM_BIAS) as i64
}

/// Stable counting sort of `indices` by `keys[idx]`, every key being in `0..=max_key`.
pub fn counting_sort_indices(indices: &[u32], keys: &[u32], max_key: usize) -> Vec<u32> {
    let mut counts = vec![0usize; max_key + 1];
    for &idx in indices {
        counts[keys[idx as usize] as usize] += 1;
    }

    // exclusive prefix sums: counts[k] becomes the first output slot of key k
    let mut running_total = 0;
    for count in counts.iter_mut() {
        let bucket = *count;
        *count = running_total;
        running_total += bucket;
    }

    let mut output = vec![0u32; indices.len()];
    for &idx in indices {
        let key = keys[idx as usize] as usize;
        output[counts[key]] = idx;
        counts[key] += 1;
    }

    output
}

/// Stable LSD radix sort of `indices` by the biased sum of each window,
/// four 16-bit digits, least significant first.
pub fn radix_sort_indices_by_sum(indices: Vec<u32>, sums: &[i64]) -> Vec<u32> {
    let mut indices = indices;
    let mut scratch = vec![0u32; indices.len()];
    let mut counts = vec![0usize; RADIX_SIZE];

    for pass in 0..RADIX_PASSES {
        let shift = pass * RADIX_BITS;
        let digit = |idx: u32| ((sum_key(sums[idx as usize]) >> shift) & RADIX_MASK) as usize;

        counts.iter_mut().for_each(|c| *c = 0);
        for &idx in &indices {
            counts[digit(idx)] += 1;
        }

        // all keys share this digit, the pass would be the identity
        if counts.iter().any(|&c| c == indices.len()) {
            continue;
        }

        let mut running_total = 0;
        for count in counts.iter_mut() {
            let bucket = *count;
            *count = running_total;
            running_total += bucket;
        }

        for &idx in &indices {
            let d = digit(idx);
            scratch[counts[d]] = idx;
            counts[d] += 1;
        }

        std::mem::swap(&mut indices, &mut scratch);
    }

    indices
}

/// Returns the window indices of `table` ordered by (sum, right, left).
///
/// Three stable passes, least significant key first: left, then right, then sum.
/// Each pass keeps the order of the previous one among equal keys, so the result
/// is ordered by the full triple without ever comparing two windows.
pub fn sort_windows(table: &WindowTable, array_length: usize) -> Vec<u32> {
    let indices: Vec<u32> = (0..table.len() as u32).collect();

    let indices = counting_sort_indices(&indices, &table.lefts, array_length);
    let indices = counting_sort_indices(&indices, &table.rights, array_length);
    let indices = radix_sort_indices_by_sum(indices, &table.sums);

    debug!("sorted {} windows by (sum, right, left)", indices.len());

    indices
}
