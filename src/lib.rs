pub mod brute;
pub mod checker;
pub mod generate;
pub mod io;
pub mod max_equal_sum;
pub mod ruchants_structs;
pub mod sorts;
pub mod validate;
pub mod windows;

#[cfg(feature = "python")]
mod numpy_bindings;

pub use max_equal_sum::{max_equal_sum_windows, solve_instance};
pub use ruchants_structs::{Answer, Instance, Window};
