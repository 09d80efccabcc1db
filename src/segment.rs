//! Paragraph segmentation for fixed-width wrapped document bodies.
//!
//! RFC text bodies are plain text wrapped to a fixed column width, with
//! blank lines between paragraphs (the RFC 2223 layout) and a four-space
//! margin marking lines that continue a page-broken block. A URL split
//! across a wrap point arrives as two physical lines; joining them with a
//! space would corrupt the URL, so the segmenter re-assembles logical
//! paragraphs before any pattern matching runs.
//!
//! The iterator borrows the document body and allocates only per emitted
//! paragraph. It is finite, preserves source order, and can be restarted by
//! calling [`paragraphs`] again on the same body.

/// Punctuation at the tail of an accumulated paragraph that marks a hard
/// line-break continuation: the next line belongs to the same token
/// (a hyphenated host name, a wrapped URL path or query string).
const CONTINUATION: &[char] = &['-', '/', '_', '?', '&', '#'];

/// Iterate over the logical paragraphs of a document body.
pub fn paragraphs(body: &str) -> Paragraphs<'_> {
    Paragraphs {
        lines: body.lines(),
    }
}

/// Lazy paragraph iterator, produced by [`paragraphs`].
#[derive(Debug, Clone)]
pub struct Paragraphs<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> Iterator for Paragraphs<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut current = String::new();

        for line in self.lines.by_ref() {
            // A blank line (whitespace-only counts) terminates the paragraph
            // being built; runs of blanks are no-ops.
            if line.trim().is_empty() {
                if !current.is_empty() {
                    return Some(current);
                }
                continue;
            }

            // Exactly four leading spaces is the page-break continuation
            // margin; five or more is content indentation and stays.
            let line = if line.starts_with("    ") && !line.starts_with("     ") {
                &line[4..]
            } else {
                line
            };

            if current.ends_with(CONTINUATION) {
                // Hard line-break continuation: join with no separator.
                current.push_str(line.trim());
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(line);
            }
        }

        // Tail paragraph with no trailing blank line.
        if current.is_empty() {
            None
        } else {
            Some(current)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(body: &str) -> Vec<String> {
        paragraphs(body).collect()
    }

    #[test]
    fn test_blank_line_separates_paragraphs() {
        let paras = collect("first\n\nsecond\n");
        assert_eq!(paras, ["first", "second"]);
    }

    #[test]
    fn test_consecutive_blank_lines_are_noops() {
        let paras = collect("first\n\n\n\nsecond");
        assert_eq!(paras, ["first", "second"]);
    }

    #[test]
    fn test_plain_join_inserts_single_space() {
        let paras = collect("hello\nworld");
        assert_eq!(paras, ["hello world"]);
    }

    #[test]
    fn test_continuation_join_inserts_no_space() {
        // A URL wrapped at the hyphen of its host name must survive intact.
        let paras = collect("see http://www.rfc-\neditor.org/info/rfc50 here");
        assert_eq!(paras.len(), 1);
        assert!(paras[0].contains("http://www.rfc-editor.org/info/rfc50"));
    }

    #[test]
    fn test_continuation_marks() {
        // Every continuation mark joins without a separator.
        for mark in ['-', '/', '_', '?', '&', '#'] {
            let body = format!("head{mark}\ntail");
            let paras = collect(&body);
            assert_eq!(paras, [format!("head{mark}tail")], "mark {mark:?}");
        }
    }

    #[test]
    fn test_continuation_trims_joined_line() {
        let paras = collect("path/\n    to/resource");
        assert_eq!(paras, ["path/to/resource"]);
    }

    #[test]
    fn test_four_space_margin_stripped() {
        let paras = collect("    wrapped line");
        assert_eq!(paras, ["wrapped line"]);
    }

    #[test]
    fn test_five_space_indent_kept() {
        let paras = collect("     indented content");
        assert_eq!(paras, ["     indented content"]);
    }

    #[test]
    fn test_whitespace_only_lines_never_emit() {
        assert!(collect("   \n\t\n    \n").is_empty());
    }

    #[test]
    fn test_whitespace_line_terminates_paragraph() {
        let paras = collect("first\n   \nsecond");
        assert_eq!(paras, ["first", "second"]);
    }

    #[test]
    fn test_empty_body() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_restartable() {
        let body = "one\n\ntwo";
        let first: Vec<_> = paragraphs(body).collect();
        let second: Vec<_> = paragraphs(body).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_source_order_preserved() {
        let paras = collect("alpha\n\nbeta\n\ngamma\n");
        assert_eq!(paras, ["alpha", "beta", "gamma"]);
    }
}
