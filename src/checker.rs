use anyhow::{anyhow, bail, Context, Result};
use log::warn;

use crate::{
    io::input::{parse_strict_int, read_instances, strict_tokens},
    max_equal_sum::solve_instance,
    ruchants_structs::{Answer, Instance, Window},
};

/// Splits output text into lines, accepting at most one trailing newline.
fn split_output_lines(text: &str) -> Result<Vec<String>> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    if normalized.ends_with("\n\n") {
        bail!("Output has more than one trailing newline (extra blank line at end)");
    }
    if normalized.is_empty() {
        return Ok(Vec::new());
    }
    let body = normalized.strip_suffix('\n').unwrap_or(&normalized);
    Ok(body.split('\n').map(str::to_owned).collect())
}

/// Parses a line of exactly two strict integers.
fn parse_pair(line: &str, line_no: usize, case_no: usize) -> Result<(i64, i64)> {
    let tokens =
        strict_tokens(line).with_context(|| format!("Case {}: Line {}", case_no, line_no))?;
    if tokens.len() != 2 {
        bail!(
            "Case {}: Line {}: expected 2 tokens, got {}",
            case_no,
            line_no,
            tokens.len()
        );
    }
    let first = parse_strict_int(tokens[0])
        .with_context(|| format!("Case {}, line {}", case_no, line_no))?;
    let second = parse_strict_int(tokens[1])
        .with_context(|| format!("Case {}, line {}", case_no, line_no))?;
    Ok((first, second))
}

fn prefix_sums(values: &[i64]) -> Vec<i64> {
    let mut prefix = Vec::with_capacity(values.len() + 1);
    prefix.push(0i64);
    for &v in values {
        let last = prefix[prefix.len() - 1];
        prefix.push(last + v);
    }
    prefix
}

/// Reads and verifies one case's answer from `lines[*line_ptr..]`, advancing the pointer.
fn check_case(instance: &Instance, case_no: usize, lines: &[String], line_ptr: &mut usize) -> Result<Answer> {
    let n = instance.array_length() as i64;

    let header = lines
        .get(*line_ptr)
        .ok_or_else(|| anyhow!("Case {}: missing output (expected line with 'k S')", case_no))?;
    let (k, sum) = parse_pair(header, *line_ptr + 1, case_no)?;
    *line_ptr += 1;

    if k < 1 {
        bail!("Case {}: k={} is invalid; expected k >= 1", case_no, k);
    }
    if k > n {
        bail!("Case {}: k={} is invalid; expected k <= n={}", case_no, k, n);
    }
    if *line_ptr + k as usize > lines.len() {
        bail!(
            "Case {}: expected {} segment lines after 'k S', but output ended early",
            case_no,
            k
        );
    }

    let prefix = prefix_sums(&instance.values);
    let mut windows: Vec<Window> = Vec::with_capacity(k as usize);

    for _ in 0..k {
        let line_no = *line_ptr + 1;
        let (l, r) = parse_pair(&lines[*line_ptr], line_no, case_no)?;

        if l < 1 || l > n {
            bail!("Case {}, line {}: l={} out of range [1..n={}]", case_no, line_no, l, n);
        }
        if r < 1 || r > n {
            bail!("Case {}, line {}: r={} out of range [1..n={}]", case_no, line_no, r, n);
        }
        if l > r {
            bail!("Case {}, line {}: invalid segment (l={} > r={})", case_no, line_no, l, r);
        }
        let length = r - l + 1;
        if length > instance.max_len as i64 {
            bail!(
                "Case {}, line {}: segment length {} exceeds M={}",
                case_no,
                line_no,
                length,
                instance.max_len
            );
        }
        let segment_sum = prefix[r as usize] - prefix[l as usize - 1];
        if segment_sum != sum {
            bail!(
                "Case {}, line {}: segment sum is {}, but declared S is {}",
                case_no,
                line_no,
                segment_sum,
                sum
            );
        }

        windows.push(Window {
            left: l as u32,
            right: r as u32,
        });
        *line_ptr += 1;
    }

    for (i, pair) in windows.windows(2).enumerate() {
        let (prev, cur) = (pair[0], pair[1]);
        if cur.order_key() < prev.order_key() {
            bail!(
                "Case {}: segments not sorted by increasing r then l; segment {} is (l={}, r={}), segment {} is (l={}, r={})",
                case_no, i + 1, prev.left, prev.right, i + 2, cur.left, cur.right
            );
        }
        if cur.left <= prev.right {
            bail!(
                "Case {}: overlap between segment {} (l={}, r={}) and segment {} (l={}, r={})",
                case_no, i + 1, prev.left, prev.right, i + 2, cur.left, cur.right
            );
        }
        if cur.left as u64 <= prev.right as u64 + instance.min_gap as u64 {
            let gap = cur.left - prev.right - 1;
            bail!(
                "Case {}: silence rule violated between segment {} (l={}, r={}) and segment {} (l={}, r={}); gap={}, required >= D={}",
                case_no, i + 1, prev.left, prev.right, i + 2, cur.left, cur.right, gap, instance.min_gap
            );
        }
    }

    Ok(Answer::new(sum, windows))
}

/// Verifies that `output_text` is a well-formed, valid (not necessarily optimal)
/// answer to every case in `input_text`. Returns the parsed answers.
pub fn check_output(input_text: &str, output_text: &str) -> Result<Vec<Answer>> {
    let instances = read_instances(input_text)?;
    let lines = split_output_lines(output_text)?;
    if lines.is_empty() {
        bail!("Output is empty; expected at least one line with 'k S'");
    }

    let mut line_ptr = 0;
    let mut answers = Vec::with_capacity(instances.len());
    for (i, instance) in instances.iter().enumerate() {
        answers.push(check_case(instance, i + 1, &lines, &mut line_ptr)?);
    }

    if line_ptr != lines.len() {
        bail!(
            "Output: extra lines/tokens after last test case (extra_lines={})",
            lines.len() - line_ptr
        );
    }

    Ok(answers)
}

/// `check_output`, and additionally requires each answer to equal the optimum
/// (maximum count, then minimum sum, then lexicographically smallest windows).
pub fn check_optimal(input_text: &str, output_text: &str) -> Result<()> {
    let answers = check_output(input_text, output_text)?;
    let instances = read_instances(input_text)?;

    for (i, (instance, answer)) in instances.iter().zip(&answers).enumerate() {
        let optimum = solve_instance(instance);
        if answer.count != optimum.count {
            bail!(
                "Case {}: k={} is not maximal; {} windows are achievable",
                i + 1,
                answer.count,
                optimum.count
            );
        }
        if answer.sum != optimum.sum {
            bail!(
                "Case {}: S={} is not the smallest sum reaching k={}; expected S={}",
                i + 1,
                answer.sum,
                answer.count,
                optimum.sum
            );
        }
        if let Some(pos) = answer
            .windows
            .iter()
            .zip(&optimum.windows)
            .position(|(a, b)| a != b)
        {
            let (got, want) = (answer.windows[pos], optimum.windows[pos]);
            bail!(
                "Case {}: segment {} is (l={}, r={}), lexicographically smallest choice is (l={}, r={})",
                i + 1,
                pos + 1,
                got.left,
                got.right,
                want.left,
                want.right
            );
        }
    }

    Ok(())
}

/// Plain verdict for the CLI, logging the reason for a rejection.
pub fn is_accepted(input_text: &str, output_text: &str, optimal: bool) -> bool {
    let result = if optimal {
        check_optimal(input_text, output_text)
    } else {
        check_output(input_text, output_text).map(|_| ())
    };
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("output rejected: {:#}", e);
            false
        }
    }
}
