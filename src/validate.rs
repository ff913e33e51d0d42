use anyhow::{bail, Context, Result};
use log::warn;

use crate::{
    io::input::{parse_strict_int, strict_tokens},
    ruchants_structs::{MAX_ABS_VALUE, MAX_ARRAY_LENGTH, MAX_WINDOW_LENGTH},
};

fn validate_case(header_line: &str, array_line: &str) -> Result<()> {
    let header = strict_tokens(header_line).context("header line")?;
    if header.len() != 3 {
        bail!("header line: expected 3 tokens (n M D), got {}", header.len());
    }
    let n = parse_strict_int(header[0]).context("n")?;
    let max_len = parse_strict_int(header[1]).context("M")?;
    let min_gap = parse_strict_int(header[2]).context("D")?;

    if !(1..=MAX_ARRAY_LENGTH as i64).contains(&n) {
        bail!("n={} out of constraints [1..{}]", n, MAX_ARRAY_LENGTH);
    }
    if !(1..=MAX_WINDOW_LENGTH as i64).contains(&max_len) {
        bail!("M={} out of constraints [1..{}]", max_len, MAX_WINDOW_LENGTH);
    }
    if !(0..=n).contains(&min_gap) {
        bail!("D={} out of constraints [0..n={}]", min_gap, n);
    }

    let values = strict_tokens(array_line).context("array line")?;
    if values.len() as i64 != n {
        bail!("array line: expected {} values, got {}", n, values.len());
    }
    for (i, token) in values.iter().enumerate() {
        let v = parse_strict_int(token).with_context(|| format!("a[{}]", i + 1))?;
        if !(-MAX_ABS_VALUE..=MAX_ABS_VALUE).contains(&v) {
            bail!("a[{}]={} out of constraints [-1e9..1e9]", i + 1, v);
        }
    }

    Ok(())
}

fn validate_pairs(lines: &[&str], first_line_no: usize) -> Result<()> {
    for (k, pair) in lines.chunks(2).enumerate() {
        let line_no = first_line_no + 2 * k;
        validate_case(pair[0], pair[1])
            .with_context(|| format!("case starting at line {}", line_no))?;
    }
    Ok(())
}

/// Checks that `text` is strictly formatted input: one `n M D` line and one array line
/// per case, optionally preceded by a line holding only the case count.
pub fn validate_input(text: &str) -> Result<()> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        bail!("input is empty");
    }
    if let Some(pos) = lines.iter().position(|l| l.is_empty()) {
        bail!("line {}: blank lines are not allowed", pos + 1);
    }

    let first = strict_tokens(lines[0]).context("line 1")?;
    if first.len() == 1 {
        let num_cases = parse_strict_int(first[0]).context("line 1: case count")?;
        if num_cases < 1 {
            bail!("line 1: T={} is invalid; expected T >= 1", num_cases);
        }
        let expected = 1 + 2 * num_cases as usize;
        if lines.len() != expected {
            bail!(
                "expected {} lines for T={} cases, got {}",
                expected,
                num_cases,
                lines.len()
            );
        }
        return validate_pairs(&lines[1..], 2);
    }

    if lines.len() % 2 != 0 {
        bail!("expected an even number of lines, got {}", lines.len());
    }
    validate_pairs(&lines, 1)
}

/// `validate_input` as a plain verdict, logging the reason for a rejection.
pub fn is_valid_input(text: &str) -> bool {
    match validate_input(text) {
        Ok(()) => true,
        Err(e) => {
            warn!("invalid input: {:#}", e);
            false
        }
    }
}
