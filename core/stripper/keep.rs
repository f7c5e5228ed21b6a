use crate::language::LanguageProfile;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnorePatterns {
    patterns: Vec<String>,
}

impl IgnorePatterns {
    /// Patterns are kept exactly as given; only empty strings are dropped.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns
            .into_iter()
            .map(Into::into)
            .filter(|p: &String| !p.is_empty())
            .collect();
        IgnorePatterns { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.patterns
    }

    pub fn keeps(&self, comment: &str, profile: &LanguageProfile) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let body = comment_body(comment, profile);
        self.patterns.iter().any(|p| body.contains(p.as_str()))
    }
}

pub fn comment_body<'a>(text: &'a str, profile: &LanguageProfile) -> &'a str {
    let text = text.trim();

    if let Some(idx) = text.rfind(profile.single_line) {
        return text[idx + profile.single_line.len()..].trim();
    }

    for pair in profile.block_pairs() {
        if text.len() >= pair.start.len() + pair.end.len()
            && text.starts_with(pair.start)
            && text.ends_with(pair.end)
        {
            return text[pair.start.len()..text.len() - pair.end.len()].trim();
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{GO, SQL};

    #[test]
    fn body_after_last_line_token() {
        assert_eq!(comment_body("  // TODO: fix  ", &GO), "TODO: fix");
        assert_eq!(comment_body("x := 1 // a // b", &GO), "b");
        assert_eq!(comment_body("SELECT 1; -- note", &SQL), "note");
    }

    #[test]
    fn body_inside_block_frame() {
        assert_eq!(comment_body("  /* keep me */", &GO), "keep me");
        assert_eq!(comment_body("plain", &GO), "plain");
    }

    #[test]
    fn keeps_matching_comments_only() {
        let patterns = IgnorePatterns::new(["TODO", "@ts-ignore"]);
        assert!(patterns.keeps("// TODO: fix", &GO));
        assert!(patterns.keeps("x = 1; // @ts-ignore next", &GO));
        assert!(!patterns.keeps("// regular note", &GO));
        assert!(!patterns.keeps("// todo lowercase", &GO));
    }

    #[test]
    fn delimiters_are_not_part_of_the_body() {
        let patterns = IgnorePatterns::new(["//"]);
        assert!(!patterns.keeps("// plain", &GO));
    }

    #[test]
    fn patterns_are_literal() {
        let patterns = IgnorePatterns::new(["", " keep "]);
        assert_eq!(patterns.as_slice(), [" keep ".to_string()]);
        assert!(!patterns.keeps("// keep", &GO));
        assert!(patterns.keeps("// please keep this", &GO));
        assert!(IgnorePatterns::new(Vec::<String>::new()).is_empty());
    }
}
