use std::path::Path;

use tracing::debug;

use crate::language::LanguageProfile;
use crate::processor::{CommentRemovalResult, ProcessOptions, strip_lines};
use crate::treesitter::TreeSitterDetector;

/// Setting this variable (to anything but empty, `0` or `false`) forces the line scanner for
/// every language.
pub const DISABLE_STRUCTURAL_ENV: &str = "COMMENTER_DISABLE_TREESITTER";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    #[error("no structural parser available for language: {0}")]
    NoStructuralParser(String),

    #[error("structural parser rejected the input for language: {0}")]
    ParseFailure(String),
}

pub trait CommentDetector {
    fn name(&self) -> &'static str;

    fn detect(
        &mut self,
        path: Option<&Path>,
        lines: &[String],
        profile: &LanguageProfile,
        options: &ProcessOptions,
    ) -> Result<CommentRemovalResult, DetectError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanningDetector;

impl CommentDetector for ScanningDetector {
    fn name(&self) -> &'static str {
        "line-scanner"
    }

    fn detect(
        &mut self,
        _path: Option<&Path>,
        lines: &[String],
        profile: &LanguageProfile,
        options: &ProcessOptions,
    ) -> Result<CommentRemovalResult, DetectError> {
        Ok(strip_lines(lines, profile, options))
    }
}

pub fn structural_disabled_by_env() -> bool {
    std::env::var(DISABLE_STRUCTURAL_ENV).is_ok_and(|v| {
        let v = v.trim();
        !(v.is_empty() || v == "0" || v.eq_ignore_ascii_case("false"))
    })
}

#[derive(Debug)]
pub struct CommentEngine {
    structural: Option<TreeSitterDetector>,
    scanning: ScanningDetector,
}

impl CommentEngine {
    pub fn new(use_structural: bool) -> Self {
        CommentEngine {
            structural: use_structural.then(TreeSitterDetector::new),
            scanning: ScanningDetector,
        }
    }

    pub fn from_env() -> Self {
        let disabled = structural_disabled_by_env();
        if disabled {
            debug!("{} set, structural detection disabled", DISABLE_STRUCTURAL_ENV);
        }
        Self::new(!disabled)
    }

    pub fn uses_structural(&self) -> bool {
        self.structural.is_some()
    }

    /// `path` only picks between grammar dialects, e.g. TSX for `.tsx` files.
    pub fn detect(
        &mut self,
        path: Option<&Path>,
        lines: &[String],
        profile: &LanguageProfile,
        options: &ProcessOptions,
    ) -> Result<CommentRemovalResult, DetectError> {
        if let Some(structural) = self.structural.as_mut() {
            match structural.detect(path, lines, profile, options) {
                Ok(result) => return Ok(result),
                Err(err) => debug!(
                    language = profile.name,
                    reason = %err,
                    "falling back to {}",
                    self.scanning.name()
                ),
            }
        }
        self.scanning.detect(path, lines, profile, options)
    }
}

impl Default for CommentEngine {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{GO, PHP, SQL, TYPESCRIPT};

    fn lines(src: &str) -> Vec<String> {
        src.lines().map(str::to_string).collect()
    }

    const GO_SOURCE: &str = "package main\n\n// This is a comment\nfunc main() {\n    fmt.Println(\"Hello\") // Inline comment\n}";

    #[test]
    fn both_engines_agree_on_plain_input() {
        let options = ProcessOptions::default();
        let input = lines(GO_SOURCE);

        let structural = CommentEngine::new(true)
            .detect(None, &input, &GO, &options)
            .unwrap();
        let scanning = CommentEngine::new(false)
            .detect(None, &input, &GO, &options)
            .unwrap();

        assert_eq!(structural.comments_removed, 2);
        assert_eq!(scanning.comments_removed, structural.comments_removed);
        assert_eq!(scanning.modified_lines, structural.modified_lines);
    }

    #[test]
    fn missing_grammar_falls_back_silently() {
        let mut engine = CommentEngine::new(true);
        let input = lines("SELECT * FROM users\n-- note\nWHERE id = 1; -- inline");
        let result = engine.detect(None, &input, &SQL, &ProcessOptions::default()).unwrap();
        assert_eq!(result.comments_removed, 2);
        assert_eq!(
            result.modified_lines,
            lines("SELECT * FROM users\nWHERE id = 1;")
        );
    }

    #[test]
    fn scanning_only_engine_has_no_parsers() {
        assert!(!CommentEngine::new(false).uses_structural());
        assert!(CommentEngine::new(true).uses_structural());
    }

    fn assert_same(a: &CommentRemovalResult, b: &CommentRemovalResult) {
        assert_eq!(a.comments_removed, b.comments_removed);
        assert_eq!(a.modified_lines, b.modified_lines);
    }

    fn both(
        src: &str,
        profile: &LanguageProfile,
        options: &ProcessOptions,
    ) -> (CommentRemovalResult, CommentRemovalResult) {
        let input = lines(src);
        let structural = CommentEngine::new(true)
            .detect(None, &input, profile, options)
            .unwrap();
        let scanning = CommentEngine::new(false)
            .detect(None, &input, profile, options)
            .unwrap();
        (structural, scanning)
    }

    #[test]
    fn typescript_cast_keeps_engines_in_step() {
        let (structural, scanning) = both(
            "let x: any = 1;\nlet y = <number>x; // cast note\nlet z = 2; // other",
            &TYPESCRIPT,
            &ProcessOptions::default(),
        );
        assert_eq!(scanning.comments_removed, 2);
        assert_same(&structural, &scanning);
        assert_eq!(
            structural.modified_lines,
            lines("let x: any = 1;\nlet y = <number>x;\nlet z = 2;")
        );
    }

    #[test]
    fn php_hash_comments_are_kept_by_both_engines() {
        let (structural, scanning) = both(
            "<?php\n# hash note\n$a = 1; # inline hash\necho $a;",
            &PHP,
            &ProcessOptions::default(),
        );
        assert_eq!(structural.comments_removed, 0);
        assert_eq!(scanning.comments_removed, 0);
        assert_eq!(structural.modified_lines, scanning.modified_lines);
    }

    #[test]
    fn block_removal_works_without_a_grammar() {
        let options = ProcessOptions {
            remove_blocks: true,
            ..ProcessOptions::default()
        };
        let (structural, scanning) =
            both("package main\n/*\n doc\n*/\nfunc main() {}", &GO, &options);
        assert_eq!(scanning.comments_removed, 1);
        assert_same(&structural, &scanning);
        assert_eq!(scanning.modified_lines, lines("package main\nfunc main() {}"));

        let sql = lines("/* header\n   text */\nSELECT 1; -- note");
        let result = CommentEngine::new(true)
            .detect(None, &sql, &SQL, &options)
            .unwrap();
        assert_eq!(result.comments_removed, 2);
        assert_eq!(result.modified_lines, lines("SELECT 1;"));
    }

    #[test]
    fn syntax_errors_fall_back_to_the_scanner() {
        let (structural, scanning) = both(
            "func main( {\n// note\nx := 1 // tail",
            &GO,
            &ProcessOptions::default(),
        );
        assert_same(&structural, &scanning);
        assert_eq!(scanning.comments_removed, 2);
    }
}
