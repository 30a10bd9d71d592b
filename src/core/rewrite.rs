//! The line-ending pass for polyglot cmd.exe/bash scripts.
//!
//! A polyglot script starts with a batch section that bash skips via a heredoc
//! (`: << END_WIN`) and ends with the bash section. cmd.exe labels misbehave
//! with LF-only files, and bash chokes on CR, so every line up to and including
//! the line starting with the delimiter gets CRLF and every line after it gets
//! LF. Content bytes are never touched.
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::lines::raw_lines;
use crate::types::{LineClass, LineEnding, Region};

/// Per-pass counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteStats {
    pub lines: usize,
    pub prefix_lines: usize,
    pub suffix_lines: usize,
    /// 1-based number of the line that closed the prefix region
    pub delimiter_line: Option<usize>,
    /// Prefix lines that contain the delimiter without starting with it
    pub mentions: usize,
}

#[derive(Debug, Clone)]
pub struct RewriteOutput {
    pub bytes: Vec<u8>,
    pub stats: RewriteStats,
}

/// Classify a line body against the delimiter.
///
/// Containment and prefix are checked separately: only a line that starts
/// with the delimiter closes the prefix region.
pub fn classify_line(body: &[u8], delimiter: &[u8]) -> LineClass {
    if !contains(body, delimiter) {
        LineClass::Plain
    } else if body.starts_with(delimiter) {
        LineClass::Delimiter
    } else {
        LineClass::MentionsDelimiter
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

/// Terminator a line gets in the given region. An unterminated last line stays
/// unterminated.
fn target_ending(ending: LineEnding, region: Region) -> LineEnding {
    match ending {
        LineEnding::None => LineEnding::None,
        _ => region.ending(),
    }
}

/// Rewrite terminators in `data`: CRLF through the delimiter line, LF after.
/// If no line starts with the delimiter the whole buffer becomes CRLF.
/// A lone CR in the CRLF region is rewritten to CRLF as well, so every prefix
/// terminator ends up identical.
pub fn rewrite_line_endings(data: &[u8], delimiter: &str) -> RewriteOutput {
    let delimiter = delimiter.as_bytes();
    let mut bytes = Vec::with_capacity(data.len() + data.len() / 32);
    let mut stats = RewriteStats::default();
    let mut region = Region::Prefix;

    for line in raw_lines(data) {
        stats.lines += 1;
        bytes.extend_from_slice(line.body);
        bytes.extend_from_slice(target_ending(line.ending, region).as_bytes());

        match region {
            Region::Suffix => stats.suffix_lines += 1,
            Region::Prefix => {
                stats.prefix_lines += 1;
                match classify_line(line.body, delimiter) {
                    LineClass::Plain => {}
                    LineClass::MentionsDelimiter => {
                        stats.mentions += 1;
                        debug!(
                            "Line {} mentions the delimiter but does not start with it; staying CRLF",
                            stats.lines
                        );
                    }
                    LineClass::Delimiter => {
                        debug!("Delimiter found on line {}; switching to LF", stats.lines);
                        stats.delimiter_line = Some(stats.lines);
                        region = Region::Suffix;
                    }
                }
            }
        }
    }

    RewriteOutput { bytes, stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(data: &[u8]) -> Vec<u8> {
        rewrite_line_endings(data, "END_WIN").bytes
    }

    #[test]
    fn prefix_and_suffix_get_their_own_endings() {
        let out = rewrite_line_endings(b"A\nB\nEND_WIN\nC\nD\n", "END_WIN");
        assert_eq!(out.bytes, b"A\r\nB\r\nEND_WIN\r\nC\nD\n");
        assert_eq!(out.stats.delimiter_line, Some(3));
        assert_eq!(out.stats.prefix_lines, 3);
        assert_eq!(out.stats.suffix_lines, 2);
    }

    #[test]
    fn no_delimiter_means_all_crlf() {
        let input = b"one\ntwo\r\nthree\n";
        let out = rewrite_line_endings(input, "END_WIN");
        assert_eq!(out.bytes, b"one\r\ntwo\r\nthree\r\n");
        assert_eq!(out.stats.delimiter_line, None);
        // one extra byte per bare LF
        assert_eq!(out.bytes.len(), input.len() + 2);
    }

    #[test]
    fn crlf_is_not_doubled() {
        assert_eq!(rewrite(b"x\r\nEND_WIN\r\n"), b"x\r\nEND_WIN\r\n");
    }

    #[test]
    fn suffix_collapses_crlf_and_cr() {
        assert_eq!(rewrite(b"END_WIN\na\r\nb\rc\n"), b"END_WIN\r\na\nb\nc\n");
    }

    #[test]
    fn lone_cr_in_prefix_becomes_crlf() {
        assert_eq!(rewrite(b"a\rb\nEND_WIN\n"), b"a\r\nb\r\nEND_WIN\r\n");
    }

    #[test]
    fn mention_before_delimiter_does_not_switch() {
        let input = b"echo END_WIN\n: << END_WIN\nEND_WIN\necho hi\n";
        let out = rewrite_line_endings(input, "END_WIN");
        assert_eq!(
            out.bytes,
            b"echo END_WIN\r\n: << END_WIN\r\nEND_WIN\r\necho hi\n".to_vec()
        );
        assert_eq!(out.stats.mentions, 2);
        assert_eq!(out.stats.delimiter_line, Some(3));
    }

    #[test]
    fn mention_after_delimiter_is_lf() {
        assert_eq!(
            rewrite(b"END_WIN\r\necho END_WIN\r\nEND_WIN\r\n"),
            b"END_WIN\r\necho END_WIN\nEND_WIN\n"
        );
    }

    #[test]
    fn unterminated_last_line_stays_unterminated() {
        assert_eq!(rewrite(b"a\nb"), b"a\r\nb");
        assert_eq!(rewrite(b"END_WIN\nb"), b"END_WIN\r\nb");
        assert_eq!(rewrite(b"END_WIN"), b"END_WIN");
    }

    #[test]
    fn rewrite_is_idempotent() {
        let inputs: [&[u8]; 4] = [
            b": << END_WIN\nECHO hi\rEXIT /B 0\r\nEND_WIN\necho \"bash\"\r\nexit 0\r",
            b"no delimiter\nat all\r",
            b"",
            b"\r\r\n\n",
        ];
        for input in inputs {
            let once = rewrite(input);
            let twice = rewrite(&once);
            assert_eq!(once, twice, "input {:?}", String::from_utf8_lossy(input));
        }
    }

    #[test]
    fn content_bytes_are_preserved() {
        let input = "caf\u{e9} \u{2713}\nEND_WIN\n\u{fffd}\r\n".as_bytes();
        let out = rewrite(input);
        let strip = |b: &[u8]| -> Vec<u8> {
            b.iter().copied().filter(|&c| c != b'\r' && c != b'\n').collect()
        };
        assert_eq!(strip(&out), strip(input));
    }

    #[test]
    fn non_utf8_input_is_handled() {
        assert_eq!(rewrite(b"\xff\xfe\nEND_WIN\n\x80\r\n"), b"\xff\xfe\r\nEND_WIN\r\n\x80\n");
    }

    #[test]
    fn classify_distinguishes_mention_from_prefix() {
        assert_eq!(classify_line(b"END_WIN", b"END_WIN"), LineClass::Delimiter);
        assert_eq!(classify_line(b"END_WIN trailing", b"END_WIN"), LineClass::Delimiter);
        assert_eq!(classify_line(b": << END_WIN", b"END_WIN"), LineClass::MentionsDelimiter);
        assert_eq!(classify_line(b"echo", b"END_WIN"), LineClass::Plain);
    }
}
