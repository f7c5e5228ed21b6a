use super::block::ScanState;
use super::strings::is_inside_string_literal;
use crate::language::LanguageProfile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Keep(String),
    Delete,
}

impl LineOutcome {
    pub fn keep(line: &str) -> Self {
        LineOutcome::Keep(line.to_string())
    }
}

fn starts_with_token(line: &str, token: &str) -> bool {
    line.trim().starts_with(token)
}

pub fn is_consecutive_comment(lines: &[String], idx: usize, profile: &LanguageProfile) -> bool {
    let Some(current) = lines.get(idx) else {
        return false;
    };
    if !starts_with_token(current, profile.single_line) {
        return false;
    }

    let previous = idx
        .checked_sub(1)
        .and_then(|i| lines.get(i))
        .is_some_and(|l| starts_with_token(l, profile.single_line));
    let next = lines
        .get(idx + 1)
        .is_some_and(|l| starts_with_token(l, profile.single_line));

    previous || next
}

fn first_comment_token(line: &str, token: &str) -> Option<usize> {
    (0..line.len())
        .filter(|&i| line.is_char_boundary(i))
        .find(|&i| line[i..].starts_with(token) && !is_inside_string_literal(line, i))
}

pub fn strip_line_comment(
    line: &str,
    profile: &LanguageProfile,
    state: ScanState,
    remove_consecutive: bool,
    consecutive: bool,
) -> (LineOutcome, bool) {
    if state.is_inside() {
        return (LineOutcome::keep(line), false);
    }

    let Some(idx) = first_comment_token(line, profile.single_line) else {
        return (LineOutcome::keep(line), false);
    };

    let code = line[..idx].trim_end_matches([' ', '\t']);
    if line.trim().starts_with(profile.single_line) || code.is_empty() {
        if consecutive && !remove_consecutive {
            return (LineOutcome::keep(line), false);
        }
        return (LineOutcome::Delete, true);
    }

    (LineOutcome::keep(code), true)
}
