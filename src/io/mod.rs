pub mod input;
pub mod output;

pub use input::{parse_strict_int, read_instances, strict_tokens};
pub use output::{format_answer, format_instances, write_answers, OutputFormat};
