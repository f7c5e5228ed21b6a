use crate::file_finder::{CommenterArgs, FindOptions};
use crate::processor::ProcessOptions;
use crate::stripper::IgnorePatterns;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_CONFIG_FILE: &str = "commenter.config.json";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub write: Option<bool>,
    pub no_color: Option<bool>,
    pub recursive: Option<bool>,
    pub consecutive: Option<bool>,
    pub no_warn_large: Option<bool>,
    pub remove_single_line_multiline: Option<bool>,
    pub remove_blocks: Option<bool>,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn discover_config(explicit: Option<&Path>) -> Option<Config> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                return None;
            }
            default
        }
    };

    match load_config(&path) {
        Ok(cfg) => {
            debug!(path = %path.display(), "loaded config");
            Some(cfg)
        }
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub write: bool,
    pub no_color: bool,
    pub recursive: bool,
    pub no_warn_large: bool,
    pub exclude_patterns: Vec<String>,
    pub process: ProcessOptions,
}

impl RunOptions {
    pub fn find_options(&self) -> FindOptions {
        FindOptions {
            recursive: self.recursive,
            exclude: self.exclude_patterns.clone(),
        }
    }
}

fn clean_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn resolve_options(args: &CommenterArgs, config: Option<&Config>) -> RunOptions {
    let cfg = config.cloned().unwrap_or_default();
    let on = |flag: bool, value: Option<bool>| flag || value.unwrap_or(false);

    let exclude = clean_list(&args.exclude);
    let exclude_patterns = if exclude.is_empty() {
        clean_list(&cfg.exclude_patterns)
    } else {
        exclude
    };

    let ignore = clean_list(&args.ignore_pattern);
    let ignore_patterns = if ignore.is_empty() {
        cfg.ignore_patterns
    } else {
        ignore
    };

    RunOptions {
        write: on(args.write, cfg.write),
        no_color: on(args.no_color, cfg.no_color),
        recursive: !args.no_recursive && cfg.recursive.unwrap_or(true),
        no_warn_large: on(args.no_warn_large, cfg.no_warn_large),
        exclude_patterns,
        process: ProcessOptions {
            remove_consecutive: on(args.consecutive, cfg.consecutive),
            remove_self_contained: on(
                args.remove_single_multiline,
                cfg.remove_single_line_multiline,
            ),
            remove_blocks: on(args.remove_blocks, cfg.remove_blocks),
            ignore_patterns: IgnorePatterns::new(ignore_patterns),
        },
    }
}
