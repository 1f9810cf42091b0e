use std::sync::LazyLock;

use regex::Regex;

/// Matches lines like
/// `Program TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA failed: custom program error: 0x1`.
const CUSTOM_ERROR_PATTERN: &str = r"(?i)Program (\S+) failed: custom program error: (0x[0-9a-f]+)";

static CUSTOM_ERROR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(CUSTOM_ERROR_PATTERN).ok());

/// A custom program error extracted from a single log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMatch {
    pub program_id: String,
    /// Always lower-cased, e.g. `"0x1771"`.
    pub error_code: String,
    pub matched_line: String,
}

/// Extract the custom program error from one log line, if it has one.
pub fn parse_line(line: &str) -> Option<LogMatch> {
    let caps = CUSTOM_ERROR.as_ref()?.captures(line)?;
    let program_id = caps.get(1)?.as_str();
    let error_code = caps.get(2)?.as_str();
    Some(LogMatch {
        program_id: program_id.to_string(),
        error_code: error_code.to_ascii_lowercase(),
        matched_line: line.to_string(),
    })
}

/// First custom program error in document order.
///
/// Inner (CPI) invocations are not told apart from the top-level one: when a
/// transaction logs several failures, the earliest line wins.
pub fn scan<I, S>(log_lines: I) -> Option<LogMatch>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (index, found) = log_lines
        .into_iter()
        .enumerate()
        .find_map(|(index, line)| parse_line(line.as_ref()).map(|m| (index, m)))?;

    tracing::debug!(
        line = index,
        program_id = %found.program_id,
        error_code = %found.error_code,
        "custom program error found in logs"
    );
    Some(found)
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    clippy::panic,
    reason = "test code uses unwrap/panic for concise assertions"
)]
mod tests {
    use super::{CUSTOM_ERROR, LogMatch, parse_line, scan};

    const TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

    #[test]
    fn pattern_compiles() {
        assert!(CUSTOM_ERROR.is_some());
    }

    #[test]
    fn parses_canonical_line() {
        let line = format!("Program {TOKEN_PROGRAM} failed: custom program error: 0x1");
        assert_eq!(
            parse_line(&line),
            Some(LogMatch {
                program_id: TOKEN_PROGRAM.to_string(),
                error_code: "0x1".to_string(),
                matched_line: line.clone(),
            })
        );
    }

    #[test]
    fn code_is_lowercased_whatever_the_input_case() {
        let m = parse_line("Program ABC123 failed: custom program error: 0X1A2b").unwrap();
        assert_eq!(m.error_code, "0x1a2b");

        let m = parse_line("program ABC123 FAILED: Custom Program Error: 0xFF").unwrap();
        assert_eq!(m.program_id, "ABC123");
        assert_eq!(m.error_code, "0xff");
    }

    #[test]
    fn match_may_start_mid_line() {
        let m = parse_line("log: Program ABC123 failed: custom program error: 0x10").unwrap();
        assert_eq!(m.program_id, "ABC123");
        assert_eq!(m.error_code, "0x10");
    }

    #[test]
    fn non_custom_failures_do_not_match() {
        assert!(parse_line("Program ABC123 invoke [1]").is_none());
        assert!(parse_line("Program ABC123 success").is_none());
        assert!(
            parse_line("Program ABC123 failed: insufficient funds for instruction").is_none()
        );
        assert!(parse_line("Program ABC123 failed: custom program error: 12").is_none());
        assert!(parse_line("Program ABC123 failed: custom program error: 0x").is_none());
        assert!(parse_line("").is_none());
    }

    #[test]
    fn scan_returns_none_without_matching_lines() {
        let logs = [
            "Program 11111111111111111111111111111111 invoke [1]",
            "Transfer: insufficient lamports 10, need 20",
            "Program 11111111111111111111111111111111 failed: custom program error: none",
        ];
        assert!(scan(logs).is_none());
        assert!(scan(Vec::<String>::new()).is_none());
    }

    #[test]
    fn scan_returns_first_match_in_document_order() {
        let logs = vec![
            "Program Outer111 invoke [1]".to_string(),
            "Program Inner222 invoke [2]".to_string(),
            "Program Inner222 failed: custom program error: 0x1771".to_string(),
            "Program Outer111 failed: custom program error: 0x0".to_string(),
        ];
        let m = scan(&logs).unwrap();
        assert_eq!(m.program_id, "Inner222");
        assert_eq!(m.error_code, "0x1771");
        assert_eq!(m.matched_line, logs[2]);
    }

    #[test]
    fn scan_property_holds_for_randomized_layouts() {
        fn lcg_next(state: &mut u64) -> u64 {
            *state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1);
            *state
        }

        let mut seed = 0x5EED_u64;
        for _ in 0..2_000 {
            let len = (lcg_next(&mut seed) % 12) as usize;
            let mut logs = Vec::with_capacity(len);
            let mut first: Option<(usize, String)> = None;
            for i in 0..len {
                if lcg_next(&mut seed) % 4 == 0 {
                    let code = lcg_next(&mut seed) % 0x2000;
                    let line = if lcg_next(&mut seed) % 2 == 0 {
                        format!("Program P{i} failed: custom program error: 0x{code:X}")
                    } else {
                        format!("Program P{i} failed: custom program error: 0x{code:x}")
                    };
                    if first.is_none() {
                        first = Some((i, format!("0x{code:x}")));
                    }
                    logs.push(line);
                } else {
                    logs.push(format!("Program P{i} consumed {} compute units", i * 100));
                }
            }

            match (scan(&logs), first) {
                (None, None) => {}
                (Some(m), Some((index, code))) => {
                    assert_eq!(m.program_id, format!("P{index}"));
                    assert_eq!(m.error_code, code);
                    assert_eq!(m.matched_line, logs[index]);
                }
                (got, want) => panic!("scan mismatch: got {got:?}, want {want:?}"),
            }
        }
    }
}
