//! Logging helpers for raw store lines, so one record always logs as one line.

/// Longest line preview written to the log, in characters.
pub const MAX_PREVIEW: usize = 120;

/// Escape a raw store line for single-line logging.
///
/// `\r`, `\t` and other control characters become visible escapes (a stray `\r`
/// is common in hand-edited stores), and anything past [`MAX_PREVIEW`]
/// characters is cut with an ellipsis. The result is quoted so leading and
/// trailing spaces stay visible.
pub fn preview_line(line: &str) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(line.len().min(MAX_PREVIEW) + 4);
    out.push('"');
    for (count, ch) in line.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_and_escapes_control_characters() {
        assert_eq!(preview_line(" Ada,Wizard\r"), "\" Ada,Wizard\\r\"");
        assert_eq!(preview_line("a\tb\u{7}"), "\"a\\tb\\x07\"");
        assert_eq!(preview_line(r#"say "hi""#), r#""say \"hi\"""#);
    }

    #[test]
    fn truncates_long_lines() {
        let long = "x".repeat(MAX_PREVIEW + 10);
        let preview = preview_line(&long);
        assert!(preview.ends_with("…\""));
        assert_eq!(preview.chars().count(), MAX_PREVIEW + 3);
    }
}
