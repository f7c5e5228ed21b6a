use crate::language::LanguageProfile;
use crate::processor::{CommentRemovalResult, ProcessOptions, RemovedComment};
use crate::stripper::{LineOutcome, is_consecutive_comment, self_contained_block};

/// Position of one comment. Lines are 1-based, columns are byte offsets into the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSpan {
    pub start_line: usize,
    pub end_line: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub text: String,
}

impl CommentSpan {
    pub fn is_multiline(&self) -> bool {
        self.end_line > self.start_line
    }

    fn is_block(&self, profile: &LanguageProfile) -> bool {
        self.is_multiline()
            || (!self.text.starts_with(profile.single_line)
                && profile
                    .block_pairs()
                    .any(|pair| self.text.starts_with(pair.start)))
    }

    fn uses_profile_syntax(&self, profile: &LanguageProfile) -> bool {
        self.text.starts_with(profile.single_line)
            || profile
                .block_pairs()
                .any(|pair| self.text.starts_with(pair.start))
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn cut_range(outcome: &mut LineOutcome, start: usize, end: Option<usize>) {
    let LineOutcome::Keep(line) = outcome else {
        return;
    };
    let start = start.min(line.len());
    let head = line.get(..start).unwrap_or_default();
    let tail = end
        .and_then(|e| line.get(e.min(line.len())..))
        .unwrap_or_default();

    let joined = if tail.trim().is_empty() {
        head.trim_end_matches([' ', '\t']).to_string()
    } else if head.ends_with([' ', '\t']) {
        format!("{head}{}", tail.trim_start())
    } else {
        format!("{head}{tail}")
    };

    *outcome = if is_blank(&joined) {
        LineOutcome::Delete
    } else {
        LineOutcome::Keep(joined)
    };
}

fn drop_prefix(outcome: &mut LineOutcome, end: usize) {
    let LineOutcome::Keep(line) = outcome else {
        return;
    };
    let rest = line
        .get(end.min(line.len())..)
        .unwrap_or_default()
        .trim_end_matches([' ', '\t']);
    *outcome = if is_blank(rest) {
        LineOutcome::Delete
    } else {
        LineOutcome::Keep(rest.to_string())
    };
}

/// Applies one span to the per-line outcomes. Spans must be applied last-to-first so that
/// earlier columns stay valid.
pub fn apply_span(outcomes: &mut [LineOutcome], span: &CommentSpan) {
    let first = span.start_line.saturating_sub(1);
    let last = span.end_line.saturating_sub(1);
    if first >= outcomes.len() {
        return;
    }

    if first == last {
        cut_range(&mut outcomes[first], span.start_column, Some(span.end_column));
        return;
    }

    cut_range(&mut outcomes[first], span.start_column, None);
    let last = last.min(outcomes.len() - 1);
    for outcome in &mut outcomes[first + 1..last] {
        *outcome = LineOutcome::Delete;
    }
    drop_prefix(&mut outcomes[last], span.end_column);
}

fn is_removable(
    span: &CommentSpan,
    lines: &[String],
    profile: &LanguageProfile,
    options: &ProcessOptions,
) -> bool {
    if !span.uses_profile_syntax(profile) {
        return false;
    }
    let idx = span.start_line - 1;
    let Some(line) = lines.get(idx) else {
        return false;
    };

    let removable = if span.is_block(profile) {
        options.remove_blocks
            || (!span.is_multiline()
                && options.remove_self_contained
                && self_contained_block(line, profile).is_some())
    } else {
        let standalone = is_blank(line.get(..span.start_column).unwrap_or_default());
        !(standalone
            && !options.remove_consecutive
            && is_consecutive_comment(lines, idx, profile))
    };

    removable && !options.ignore_patterns.keeps(&span.text, profile)
}

pub fn remove_spans(
    lines: &[String],
    spans: &[CommentSpan],
    profile: &LanguageProfile,
    options: &ProcessOptions,
) -> CommentRemovalResult {
    let selected: Vec<&CommentSpan> = spans
        .iter()
        .filter(|span| is_removable(span, lines, profile, options))
        .collect();

    let mut outcomes: Vec<LineOutcome> = lines.iter().map(|l| LineOutcome::keep(l)).collect();
    for span in selected.iter().rev() {
        apply_span(&mut outcomes, span);
    }

    let removed = selected
        .iter()
        .map(|span| RemovedComment {
            line_number: span.start_line,
            content: span.text.clone(),
        })
        .collect();

    CommentRemovalResult::assemble(lines.len(), outcomes, removed)
}

fn span_text(lines: &[String], start: (usize, usize), end: (usize, usize)) -> String {
    if start.0 == end.0 {
        return lines[start.0][start.1..end.1].to_string();
    }
    let mut parts = vec![&lines[start.0][start.1..]];
    parts.extend(lines[start.0 + 1..end.0].iter().map(String::as_str));
    parts.push(&lines[end.0][..end.1]);
    parts.join("\n")
}

pub fn scan_comment_spans(lines: &[String], profile: &LanguageProfile) -> Vec<CommentSpan> {
    let line_token = profile.single_line.as_bytes();
    let block = profile.block;
    let mut spans = Vec::new();
    let mut open: Option<(usize, usize)> = None;

    for (row, line) in lines.iter().enumerate() {
        let bytes = line.as_bytes();
        let mut quote: Option<u8> = None;
        let mut i = 0;

        while i < bytes.len() {
            let rest = &bytes[i..];

            if let Some(start) = open {
                let close = block.map_or("", |b| b.end).as_bytes();
                if !close.is_empty() && rest.starts_with(close) {
                    let end = (row, i + close.len());
                    spans.push(CommentSpan {
                        start_line: start.0 + 1,
                        end_line: row + 1,
                        start_column: start.1,
                        end_column: end.1,
                        text: span_text(lines, start, end),
                    });
                    open = None;
                    i = end.1;
                } else {
                    i += 1;
                }
                continue;
            }

            if let Some(q) = quote {
                if bytes[i] == b'\\' {
                    i += 2;
                    continue;
                }
                if bytes[i] == q {
                    quote = None;
                }
                i += 1;
                continue;
            }

            if matches!(bytes[i], b'"' | b'\'' | b'`') {
                quote = Some(bytes[i]);
                i += 1;
            } else if rest.starts_with(line_token) {
                spans.push(CommentSpan {
                    start_line: row + 1,
                    end_line: row + 1,
                    start_column: i,
                    end_column: bytes.len(),
                    text: line[i..].to_string(),
                });
                break;
            } else if let Some(b) = block.filter(|b| rest.starts_with(b.start.as_bytes())) {
                open = Some((row, i));
                i += b.start.len();
            } else {
                i += 1;
            }
        }
    }

    spans
}
