use rand::{
    rngs::{SmallRng, StdRng},
    Rng, SeedableRng,
};
use serde::{Deserialize, Serialize};

use crate::ruchants_structs::{Instance, MAX_ABS_VALUE, MAX_ARRAY_LENGTH, MAX_WINDOW_LENGTH};

const BILLION: i64 = 1_000_000_000;

fn case(max_len: usize, min_gap: usize, values: Vec<i64>) -> Instance {
    Instance::new(max_len, min_gap, values)
}

fn case_from_fn(n: usize, max_len: usize, min_gap: usize, value_at: impl Fn(usize) -> i64) -> Instance {
    Instance::new(max_len, min_gap, (0..n).map(value_at).collect())
}

/// Hand-written small cases covering the boundary behaviour of every constraint.
pub fn small_suite() -> Vec<Instance> {
    vec![
        case(1, 0, vec![5]),
        case(1, 1, vec![-7]),
        case(20, 0, vec![0, 0, 0, 0, 0]),
        case(3, 0, vec![1, -1, 1, -1, 1, -1]),
        case(3, 1, vec![2, -2, 0, 2, -2, 0]),
        case(2, 0, vec![1, 2, 3, 4, 5, 6, 7]),
        case(2, 0, vec![-1, -2, -3, -4, -5, -6, -7]),
        case(3, 7, vec![3, -1, 4, -2, 5, -3, 6, -4]),
        case(1, 0, vec![0, 0, 0, 1, 1, -1, -1, 2, -2, 2]),
        case(2, 2, vec![0; 8]),
        case(2, 0, vec![0; 5]),
        case(2, 1, vec![1, 0, 1, 0, 1, 0]),
        case(1, 1, vec![-1, 0, -1, 0]),
        case(5, 0, vec![BILLION, BILLION, BILLION, BILLION, -BILLION]),
        case(4, 0, vec![2, -2, 2, -2, 2, -2, 2]),
    ]
}

/// Edge cases: tie-breaking constructions, 64-bit sums and two maximum-size arrays.
pub fn edge_suite() -> Vec<Instance> {
    let n = MAX_ARRAY_LENGTH;
    vec![
        case(1, 0, vec![5]),
        case(1, 1, vec![-7]),
        case(20, 0, vec![1, 2, 3, 4, 5]),
        case(3, 6, vec![-5, 2, -1, 3, -4, 1]),
        case(1, 1, vec![0; 7]),
        case(1, 0, vec![0; 6]),
        case(20, 2, vec![0; 30]),
        case(3, 0, [1, -1].repeat(5)),
        case(20, 50, vec![BILLION; 50]),
        case(4, 0, vec![5, 0, 0, -5, 0, 0, 5, -5]),
        case(1, 2, vec![0, -1, 7, 0, -1, 8]),
        case(5, 1, vec![11, -11, 2, 2, 1, 100, 5, 200, -300]),
        case(
            3,
            0,
            vec![1000, 2000, -2001, 1_234_567, 7_654_321, 3000, -1000, -1001],
        ),
        case(20, 0, vec![0; n]),
        case_from_fn(n, 20, 5, |i| if i % 2 == 0 { 1 } else { -1 }),
    ]
}

/// Maximum-size stress cases. Only the random case depends on `seed`.
pub fn large_suite(seed: u64) -> Vec<Instance> {
    let n = MAX_ARRAY_LENGTH;
    let mut rng = StdRng::seed_from_u64(seed);
    let random_values: Vec<i64> = (0..n)
        .map(|_| rng.gen_range(-MAX_ABS_VALUE..=MAX_ABS_VALUE))
        .collect();

    vec![
        case_from_fn(n, 20, 0, |_| 0),
        case_from_fn(n, 20, 19, |_| 0),
        case_from_fn(n, 1, 1, |_| 0),
        case_from_fn(n, 1, 0, |_| 0),
        case_from_fn(n, 20, 0, |_| BILLION),
        case_from_fn(n, 20, 0, |i| if i % 2 == 0 { BILLION } else { -BILLION }),
        case_from_fn(n, 20, 5, |i| if i % 2 == 0 { 1 } else { -1 }),
        case_from_fn(n, 20, 0, |i| i as i64 + 1),
        case(20, n, random_values),
        case_from_fn(n, 20, 0, |i| match i % 50 {
            0 => BILLION,
            25 => -BILLION,
            _ => 0,
        }),
    ]
}

/// Bounds for `random_instance`. Values are drawn from `-max_abs..=max_abs`; a small
/// `max_abs` produces many repeated sums.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RandomConfig {
    pub max_n: usize,
    pub max_abs: i64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            max_n: 40,
            max_abs: 5,
        }
    }
}

pub fn random_instance(seed: u64, config: &RandomConfig) -> Instance {
    let mut rng = SmallRng::seed_from_u64(seed);
    let max_n = config.max_n.clamp(1, MAX_ARRAY_LENGTH);
    let max_abs = config.max_abs.clamp(0, MAX_ABS_VALUE);

    let n = rng.gen_range(1..=max_n);
    let max_len = rng.gen_range(1..=MAX_WINDOW_LENGTH);
    let min_gap = rng.gen_range(0..=n);
    let values = (0..n).map(|_| rng.gen_range(-max_abs..=max_abs)).collect();

    Instance::new(max_len, min_gap, values)
}

pub fn random_suite(seed: u64, num_cases: usize, config: &RandomConfig) -> Vec<Instance> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_cases)
        .map(|_| random_instance(rng.gen(), config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{brute::brute_force, max_equal_sum::solve_instance, ruchants_structs::Window};

    #[test]
    fn test_suites_satisfy_constraints() {
        for instance in small_suite().iter().chain(edge_suite().iter()) {
            instance.check_constraints().unwrap();
        }
        for instance in large_suite(123_456) {
            instance.check_constraints().unwrap();
        }
    }

    #[test]
    fn test_small_and_edge_suites_agree_with_brute_force() {
        for instance in small_suite()
            .into_iter()
            .chain(edge_suite())
            .filter(|i| i.array_length() <= 100)
        {
            assert_eq!(
                solve_instance(&instance),
                brute_force(&instance.values, instance.max_len, instance.min_gap),
                "{:?}",
                instance
            );
        }
    }

    #[test]
    fn test_edge_suite_known_answers() {
        let suite = edge_suite();

        let answer = solve_instance(&suite[10]);
        assert_eq!(answer.sum, -1);
        assert_eq!(
            answer.windows,
            vec![Window { left: 2, right: 2 }, Window { left: 5, right: 5 }]
        );

        let answer = solve_instance(&suite[8]);
        assert_eq!(answer.count, 1);
        assert_eq!(answer.sum, BILLION);
    }

    #[test]
    fn test_random_generation_is_seeded() {
        let config = RandomConfig::default();
        assert_eq!(random_instance(7, &config), random_instance(7, &config));
        assert_eq!(random_suite(3, 5, &config), random_suite(3, 5, &config));
        assert_eq!(large_suite(1)[8], large_suite(1)[8]);

        for instance in random_suite(11, 50, &config) {
            instance.check_constraints().unwrap();
            assert!(instance.array_length() <= config.max_n);
        }
    }

    #[test]
    fn test_random_suite_agrees_with_brute_force() {
        for instance in random_suite(2024, 200, &RandomConfig::default()) {
            assert_eq!(
                solve_instance(&instance),
                brute_force(&instance.values, instance.max_len, instance.min_gap)
            );
        }
    }
}
