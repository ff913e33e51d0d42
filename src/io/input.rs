use anyhow::{anyhow, bail, Context, Result};

use crate::ruchants_structs::{Instance, MAX_ABS_VALUE, MAX_ARRAY_LENGTH, MAX_WINDOW_LENGTH};

/// Parses an integer written as an optional `-` followed by decimal digits.
/// A leading `+`, embedded whitespace or an empty token are rejected.
pub fn parse_strict_int(token: &str) -> Result<i64> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        bail!("invalid integer token '{}'", token);
    }
    token
        .parse::<i64>()
        .with_context(|| format!("could not parse integer '{}'", token))
}

/// Splits a line on single spaces, rejecting empty lines, leading or trailing
/// spaces, runs of spaces and any other whitespace character.
pub fn strict_tokens(line: &str) -> Result<Vec<&str>> {
    if line.is_empty() {
        bail!("empty line is not allowed");
    }
    if line.starts_with(' ') || line.ends_with(' ') {
        bail!("leading/trailing spaces are not allowed");
    }
    if line.contains(['\t', '\u{0b}', '\u{0c}']) {
        bail!("tabs are not allowed");
    }
    if line.contains("  ") {
        bail!("multiple consecutive spaces are not allowed");
    }
    Ok(line.split(' ').collect())
}

fn case_label(case_no: Option<usize>) -> String {
    match case_no {
        Some(k) => format!("Input case {}", k),
        None => "Input".to_string(),
    }
}

/// Reads one `n M D a_1 .. a_n` case starting at `tokens[idx]`.
/// Returns the instance and the index of the first unread token.
fn parse_case_at(tokens: &[&str], idx: usize, case_no: Option<usize>) -> Result<(Instance, usize)> {
    let label = case_label(case_no);
    if idx + 3 > tokens.len() {
        bail!("{}: incomplete case header (need n M D)", label);
    }

    let field = |offset: usize, name: &str| {
        parse_strict_int(tokens[idx + offset]).with_context(|| format!("{} {}", label, name))
    };
    let n = field(0, "n")?;
    let max_len = field(1, "M")?;
    let min_gap = field(2, "D")?;

    if n < 1 || n > MAX_ARRAY_LENGTH as i64 {
        bail!("{}: n={} out of constraints [1..{}]", label, n, MAX_ARRAY_LENGTH);
    }
    if max_len < 1 || max_len > MAX_WINDOW_LENGTH as i64 {
        bail!("{}: M={} out of constraints [1..{}]", label, max_len, MAX_WINDOW_LENGTH);
    }
    if min_gap < 0 || min_gap > n {
        bail!("{}: D={} out of constraints [0..n={}]", label, min_gap, n);
    }

    let n = n as usize;
    let base = idx + 3;
    if base + n > tokens.len() {
        bail!(
            "{}: expected {} array values, got {}",
            label,
            n,
            tokens.len() - base
        );
    }

    let values = tokens[base..base + n]
        .iter()
        .enumerate()
        .map(|(i, tok)| {
            let v = parse_strict_int(tok).with_context(|| format!("{} a[{}]", label, i + 1))?;
            if !(-MAX_ABS_VALUE..=MAX_ABS_VALUE).contains(&v) {
                return Err(anyhow!(
                    "{}: a[{}]={} out of constraints [-1e9..1e9]",
                    label,
                    i + 1,
                    v
                ));
            }
            Ok(v)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((
        Instance::new(max_len as usize, min_gap as usize, values),
        base + n,
    ))
}

/// Parses whitespace-separated input holding either a single case that consumes
/// every token, or a case count `T` followed by `T` cases.
pub fn read_instances(text: &str) -> Result<Vec<Instance>> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 3 {
        bail!("Input: expected at least 3 integers");
    }

    let single = parse_case_at(&tokens, 0, None);
    if let Ok((instance, next)) = &single {
        if *next == tokens.len() {
            return Ok(vec![instance.clone()]);
        }
    }

    let num_cases = match parse_strict_int(tokens[0]) {
        Ok(t) => t,
        Err(e) => {
            return Err(single.err().unwrap_or_else(|| e.context("Input T")));
        }
    };
    if num_cases < 1 {
        bail!("Input: T={} is invalid; expected T >= 1", num_cases);
    }

    let mut instances = Vec::new();
    let mut idx = 1;
    for case_no in 1..=num_cases as usize {
        let (instance, next) = parse_case_at(&tokens, idx, Some(case_no))?;
        instances.push(instance);
        idx = next;
    }

    if idx != tokens.len() {
        bail!(
            "Input: extra tokens after reading T={} cases (extra={})",
            num_cases,
            tokens.len() - idx
        );
    }

    Ok(instances)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strict_int() {
        assert_eq!(parse_strict_int("0").unwrap(), 0);
        assert_eq!(parse_strict_int("-1000000000").unwrap(), -1_000_000_000);
        assert!(parse_strict_int("+5").is_err());
        assert!(parse_strict_int("-").is_err());
        assert!(parse_strict_int("").is_err());
        assert!(parse_strict_int("1e9").is_err());
        assert!(parse_strict_int("99999999999999999999").is_err());
    }

    #[test]
    fn test_strict_tokens() {
        assert_eq!(strict_tokens("1 2 3").unwrap(), vec!["1", "2", "3"]);
        assert!(strict_tokens("").is_err());
        assert!(strict_tokens(" 1 2").is_err());
        assert!(strict_tokens("1 2 ").is_err());
        assert!(strict_tokens("1\t2").is_err());
        assert!(strict_tokens("1  2").is_err());
    }

    #[test]
    fn test_read_single_case() {
        let instances = read_instances("6 1 2\n0 -1 7 0 -1 8\n").unwrap();
        assert_eq!(
            instances,
            vec![Instance::new(1, 2, vec![0, -1, 7, 0, -1, 8])]
        );
    }

    #[test]
    fn test_read_multiple_cases() {
        let text = "2\n1 1 0\n5\n3 2 1\n1 -1 1\n";
        let instances = read_instances(text).unwrap();
        assert_eq!(
            instances,
            vec![
                Instance::new(1, 0, vec![5]),
                Instance::new(2, 1, vec![1, -1, 1]),
            ]
        );
    }

    #[test]
    fn test_read_rejects_out_of_range() {
        let err = read_instances("1\n3 21 0\n1 2 3").unwrap_err();
        assert!(format!("{:#}", err).contains("M=21"));

        let err = read_instances("1\n2 1 3\n1 2").unwrap_err();
        assert!(format!("{:#}", err).contains("D=3"));

        let err = read_instances("1\n1 1 0\n1000000001").unwrap_err();
        assert!(format!("{:#}", err).contains("a[1]=1000000001"));
    }

    #[test]
    fn test_read_reports_single_case_error_when_t_is_not_an_integer() {
        let err = read_instances("x 1 0\n5").unwrap_err();
        assert!(format!("{:#}", err).contains("Input n"));
    }

    #[test]
    fn test_read_rejects_trailing_tokens() {
        assert!(read_instances("1\n1 1 0\n5\n7").is_err());
        assert!(read_instances("3 1 0\n1 2").is_err());
    }
}
