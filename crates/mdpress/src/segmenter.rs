/// Split a document into slide texts at horizontal-rule delimiter lines.
///
/// A delimiter is a line consisting solely of three or more `-` characters,
/// optionally followed by trailing whitespace. The delimiter must occupy the
/// entire line; surrounding newlines stay with the adjacent fragments.
/// Fragments whose trimmed content is empty are dropped, so leading, trailing
/// or doubled delimiters never produce empty slides.
///
/// Segmentation is purely line-pattern based: a `---` line inside a fenced
/// code block splits like any other. Known quirk, kept as-is.
pub fn segment(document: &str) -> Vec<String> {
    let mut slides = Vec::new();
    let mut fragment_start = 0;
    let mut line_start = 0;

    let bytes = document.as_bytes();
    for i in 0..=bytes.len() {
        let at_line_end = i == bytes.len() || bytes[i] == b'\n';
        if !at_line_end {
            continue;
        }
        if is_delimiter(&document[line_start..i]) {
            push_fragment(&mut slides, &document[fragment_start..line_start]);
            // The newline terminating the delimiter line belongs to the
            // following fragment.
            fragment_start = i;
        }
        line_start = i + 1;
    }
    push_fragment(&mut slides, &document[fragment_start..]);

    slides
}

fn push_fragment(slides: &mut Vec<String>, fragment: &str) {
    if !fragment.trim().is_empty() {
        slides.push(fragment.to_string());
    }
}

/// Three or more dashes, nothing else but trailing whitespace.
/// `trim_end` also swallows the `\r` of CRLF input.
fn is_delimiter(line: &str) -> bool {
    let line = line.trim_end();
    line.len() >= 3 && line.bytes().all(|b| b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_no_slides() {
        assert!(segment("").is_empty());
        assert!(segment("   \n\n\t\n").is_empty());
    }

    #[test]
    fn test_no_delimiter_yields_whole_document() {
        assert_eq!(segment("a"), vec!["a"]);
        assert_eq!(segment("# Title\n\nBody text"), vec!["# Title\n\nBody text"]);
    }

    #[test]
    fn test_basic_split_keeps_adjacent_newlines() {
        assert_eq!(segment("a\n---\nb"), vec!["a\n", "\nb"]);
    }

    #[test]
    fn test_leading_and_trailing_delimiters_drop_empty_fragments() {
        let slides = segment("---\na\n---");
        assert_eq!(slides.len(), 1, "expected one slide, got {slides:?}");
        assert_eq!(slides[0].trim(), "a");
    }

    #[test]
    fn test_adjacent_delimiters_yield_no_empty_slide() {
        let slides = segment("a\n---\n---\nb");
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].trim(), "a");
        assert_eq!(slides[1].trim(), "b");
    }

    #[test]
    fn test_longer_dash_runs_split() {
        assert_eq!(segment("a\n----\nb").len(), 2);
        assert_eq!(segment("a\n--------\nb").len(), 2);
    }

    #[test]
    fn test_trailing_whitespace_after_dashes_splits() {
        assert_eq!(segment("a\n---  \nb").len(), 2);
        assert_eq!(segment("a\n--- \t\nb").len(), 2);
    }

    #[test]
    fn test_two_dashes_do_not_split() {
        assert_eq!(segment("a\n--\nb").len(), 1);
    }

    #[test]
    fn test_delimiter_must_occupy_entire_line() {
        assert_eq!(segment("a\n--- b\nc").len(), 1);
        assert_eq!(segment("a\n ---\nb").len(), 1, "indented rule is not a delimiter");
        assert_eq!(segment("one --- two").len(), 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let slides = segment("a\r\n---\r\nb");
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].trim(), "a");
        assert_eq!(slides[1].trim(), "b");
    }

    #[test]
    fn test_delimiter_inside_code_fence_still_splits() {
        // Segmentation has no code-fence awareness. Documented quirk.
        let slides = segment("```\n---\n```");
        assert_eq!(slides.len(), 2);
    }

    #[test]
    fn test_deterministic() {
        let doc = "# One\n\nbody\n\n---\n\n# Two\n\n---\n\n# Three";
        assert_eq!(segment(doc), segment(doc));
        assert_eq!(segment(doc).len(), 3);
    }

    #[test]
    fn test_fragment_content_preserved_verbatim() {
        let slides = segment("  a \n---\n b  ");
        assert_eq!(slides, vec!["  a \n", "\n b  "]);
    }
}
