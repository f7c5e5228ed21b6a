use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{debug, warn};
use tree_sitter::{Language, Node, Parser};

use crate::engine::{CommentDetector, DetectError};
use crate::language::{self, LanguageProfile};
use crate::processor::{CommentRemovalResult, ProcessOptions};
use crate::spans::{CommentSpan, remove_spans};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Grammar {
    Go,
    TypeScript,
    Tsx,
    Php,
    CSharp,
}

impl Grammar {
    const ALL: [Grammar; 5] = [
        Grammar::Go,
        Grammar::TypeScript,
        Grammar::Tsx,
        Grammar::Php,
        Grammar::CSharp,
    ];

    fn language(self) -> Language {
        match self {
            Grammar::Go => tree_sitter_go::LANGUAGE.into(),
            Grammar::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Grammar::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Grammar::Php => tree_sitter_php::LANGUAGE_PHP.into(),
            Grammar::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
        }
    }

    fn for_source(profile: &LanguageProfile, path: Option<&Path>) -> Option<Grammar> {
        let name = profile.name;
        if name == language::GO.name {
            Some(Grammar::Go)
        } else if name == language::TYPESCRIPT.name {
            let ext = path
                .and_then(Path::extension)
                .map(|e| e.to_string_lossy().to_ascii_lowercase());
            match ext.as_deref() {
                Some("tsx" | "js" | "jsx") => Some(Grammar::Tsx),
                _ => Some(Grammar::TypeScript),
            }
        } else if name == language::PHP.name {
            Some(Grammar::Php)
        } else if name == language::CSHARP.name {
            Some(Grammar::CSharp)
        } else {
            None
        }
    }
}

fn span_from_node(node: &Node<'_>, content: &str, lines: &[String]) -> CommentSpan {
    let start = node.start_position();
    let end = node.end_position();
    let mut span = CommentSpan {
        start_line: start.row + 1,
        end_line: end.row + 1,
        start_column: start.column,
        end_column: end.column,
        text: content
            .get(node.byte_range())
            .unwrap_or_default()
            .to_string(),
    };

    // Some grammars end a line comment at column 0 of the next row.
    if span.end_line > span.start_line && span.end_column == 0 {
        span.end_line -= 1;
        span.end_column = lines.get(span.end_line - 1).map_or(0, String::len);
        span.text = span.text.trim_end_matches(['\r', '\n']).to_string();
    }
    span
}

fn collect_comment_spans(root: Node<'_>, content: &str, lines: &[String]) -> Vec<CommentSpan> {
    let mut spans = Vec::new();
    let mut seen = HashSet::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.kind().contains("comment") {
            if seen.insert(node.id()) {
                spans.push(span_from_node(&node, content, lines));
            }
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    spans
}

pub struct TreeSitterDetector {
    parsers: HashMap<Grammar, Parser>,
}

impl std::fmt::Debug for TreeSitterDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeSitterDetector")
            .field("grammars", &self.parsers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for TreeSitterDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSitterDetector {
    pub fn new() -> Self {
        let mut parsers = HashMap::new();
        for grammar in Grammar::ALL {
            let mut parser = Parser::new();
            match parser.set_language(&grammar.language()) {
                Ok(()) => {
                    parsers.insert(grammar, parser);
                }
                Err(e) => warn!(?grammar, error = %e, "grammar rejected, using line scanner"),
            }
        }
        TreeSitterDetector { parsers }
    }

    pub fn supports(&self, profile: &LanguageProfile) -> bool {
        Grammar::for_source(profile, None).is_some_and(|g| self.parsers.contains_key(&g))
    }

    pub fn find_comments(
        &mut self,
        path: Option<&Path>,
        lines: &[String],
        profile: &LanguageProfile,
    ) -> Result<Vec<CommentSpan>, DetectError> {
        let no_parser = || DetectError::NoStructuralParser(profile.name.to_string());
        let grammar = Grammar::for_source(profile, path).ok_or_else(no_parser)?;
        let parser = self.parsers.get_mut(&grammar).ok_or_else(no_parser)?;

        let content = lines.join("\n");
        parser.reset();
        let tree = parser
            .parse(&content, None)
            .ok_or_else(|| DetectError::ParseFailure(profile.name.to_string()))?;
        if tree.root_node().has_error() {
            return Err(DetectError::ParseFailure(profile.name.to_string()));
        }

        let spans = collect_comment_spans(tree.root_node(), &content, lines);
        debug!(?grammar, comments = spans.len(), "parsed");
        Ok(spans)
    }
}

impl CommentDetector for TreeSitterDetector {
    fn name(&self) -> &'static str {
        "tree-sitter"
    }

    fn detect(
        &mut self,
        path: Option<&Path>,
        lines: &[String],
        profile: &LanguageProfile,
        options: &ProcessOptions,
    ) -> Result<CommentRemovalResult, DetectError> {
        let spans = self.find_comments(path, lines, profile)?;
        Ok(remove_spans(lines, &spans, profile, options))
    }
}
