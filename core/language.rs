use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDelimiters {
    pub start: &'static str,
    pub end: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub single_line: &'static str,
    pub block: Option<BlockDelimiters>,
    pub extra_blocks: &'static [BlockDelimiters],
}

impl LanguageProfile {
    pub fn block_pairs(&self) -> impl Iterator<Item = BlockDelimiters> + '_ {
        self.block.into_iter().chain(self.extra_blocks.iter().copied())
    }

    pub fn has_block_syntax(&self) -> bool {
        self.block.is_some()
    }
}

const C_STYLE_BLOCK: BlockDelimiters = BlockDelimiters {
    start: "/*",
    end: "*/",
};

const JSX_BLOCK: BlockDelimiters = BlockDelimiters {
    start: "{/*",
    end: "*/}",
};

const TYPESCRIPT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];
const GO_EXTENSIONS: &[&str] = &[".go"];
const SQL_EXTENSIONS: &[&str] = &[".sql"];
const JSON_EXTENSIONS: &[&str] = &[".json"];
const PHP_EXTENSIONS: &[&str] = &[".php", ".phtml"];
const CSHARP_EXTENSIONS: &[&str] = &[".cs"];

pub const TYPESCRIPT: LanguageProfile = LanguageProfile {
    name: "TypeScript/JavaScript",
    extensions: TYPESCRIPT_EXTENSIONS,
    single_line: "//",
    block: Some(C_STYLE_BLOCK),
    extra_blocks: &[JSX_BLOCK],
};

pub const GO: LanguageProfile = LanguageProfile {
    name: "Go",
    extensions: GO_EXTENSIONS,
    single_line: "//",
    block: Some(C_STYLE_BLOCK),
    extra_blocks: &[],
};

pub const SQL: LanguageProfile = LanguageProfile {
    name: "SQL",
    extensions: SQL_EXTENSIONS,
    single_line: "--",
    block: Some(C_STYLE_BLOCK),
    extra_blocks: &[],
};

pub const JSON: LanguageProfile = LanguageProfile {
    name: "JSON",
    extensions: JSON_EXTENSIONS,
    single_line: "//",
    block: None,
    extra_blocks: &[],
};

pub const PHP: LanguageProfile = LanguageProfile {
    name: "PHP",
    extensions: PHP_EXTENSIONS,
    single_line: "//",
    block: Some(C_STYLE_BLOCK),
    extra_blocks: &[],
};

pub const CSHARP: LanguageProfile = LanguageProfile {
    name: "C#",
    extensions: CSHARP_EXTENSIONS,
    single_line: "//",
    block: Some(C_STYLE_BLOCK),
    extra_blocks: &[],
};

const SUPPORTED_LANGUAGES: &[LanguageProfile] = &[TYPESCRIPT, GO, SQL, JSON, PHP, CSHARP];

#[derive(Debug)]
pub struct LanguageRegistry {
    profiles: &'static [LanguageProfile],
    by_extension: HashMap<&'static str, usize>,
}

impl LanguageRegistry {
    fn build(profiles: &'static [LanguageProfile]) -> Self {
        let mut by_extension = HashMap::new();
        for (idx, profile) in profiles.iter().enumerate() {
            for &ext in profile.extensions {
                let previous = by_extension.insert(ext, idx);
                debug_assert!(previous.is_none(), "extension {ext} registered twice");
            }
        }
        LanguageRegistry {
            profiles,
            by_extension,
        }
    }

    pub fn profiles(&self) -> &'static [LanguageProfile] {
        self.profiles
    }

    pub fn by_extension(&self, ext: &str) -> Option<&'static LanguageProfile> {
        let ext = ext.to_lowercase();
        let key = if ext.starts_with('.') {
            ext
        } else {
            format!(".{ext}")
        };
        self.by_extension
            .get(key.as_str())
            .map(|&idx| &self.profiles[idx])
    }

    pub fn for_path(&self, path: &Path) -> Option<&'static LanguageProfile> {
        let name = path.file_name()?.to_string_lossy();
        let dot = name.rfind('.')?;
        self.by_extension(&name[dot..])
    }

    pub fn by_name(&self, name: &str) -> Option<&'static LanguageProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }
}

static REGISTRY: LazyLock<LanguageRegistry> =
    LazyLock::new(|| LanguageRegistry::build(SUPPORTED_LANGUAGES));

pub fn registry() -> &'static LanguageRegistry {
    &REGISTRY
}

pub fn get_language_for_path(path: &Path) -> Option<&'static LanguageProfile> {
    registry().for_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_extensions() {
        let cases = [
            ("main.go", Some("Go")),
            ("script.js", Some("TypeScript/JavaScript")),
            ("component.tsx", Some("TypeScript/JavaScript")),
            ("query.sql", Some("SQL")),
            ("config.json", Some("JSON")),
            ("index.phtml", Some("PHP")),
            ("Program.cs", Some("C#")),
            ("README.md", None),
            ("no_extension", None),
        ];
        for (file, expected) in cases {
            let found = get_language_for_path(Path::new(file)).map(|p| p.name);
            assert_eq!(found, expected, "lookup for {file}");
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let profile = get_language_for_path(Path::new("MAIN.GO")).map(|p| p.name);
        assert_eq!(profile, Some("Go"));
        assert_eq!(registry().by_extension("TSX").map(|p| p.name), Some(TYPESCRIPT.name));
    }

    #[test]
    fn extensions_are_unique() {
        let total: usize = registry().profiles().iter().map(|p| p.extensions.len()).sum();
        assert_eq!(total, registry().by_extension.len());
    }

    #[test]
    fn json_has_no_block_syntax() {
        assert!(!JSON.has_block_syntax());
        assert_eq!(JSON.block_pairs().count(), 0);
        assert_eq!(TYPESCRIPT.block_pairs().count(), 2);
    }
}
