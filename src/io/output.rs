use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};

use crate::ruchants_structs::{Answer, Instance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `k S` followed by one `l r` line per window
    Text,
    /// JSON array with one answer object per case
    Json,
}

pub fn format_answer(answer: &Answer) -> String {
    let mut out = String::with_capacity(16 * (answer.windows.len() + 1));
    let _ = writeln!(out, "{} {}", answer.count, answer.sum);
    for window in &answer.windows {
        let _ = writeln!(out, "{} {}", window.left, window.right);
    }
    out
}

pub fn write_answers<W: Write>(writer: &mut W, answers: &[Answer], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for answer in answers {
                writer
                    .write_all(format_answer(answer).as_bytes())
                    .context("failed to write answer")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, answers).context("failed to serialize answers")?;
            writeln!(writer)?;
        }
    }
    writer.flush().context("failed to flush output")?;
    Ok(())
}

/// Renders instances as a case count line followed by `n M D` and the array per case.
pub fn format_instances(instances: &[Instance]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", instances.len());
    for instance in instances {
        let _ = writeln!(
            out,
            "{} {} {}",
            instance.array_length(),
            instance.max_len,
            instance.min_gap
        );
        let values: Vec<String> = instance.values.iter().map(i64::to_string).collect();
        let _ = writeln!(out, "{}", values.join(" "));
    }
    out
}
