use crate::language::{LanguageProfile, get_language_for_path};
use crate::processor::FileTarget;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const IGNORE_FILE: &str = ".commenterignore";

#[derive(Debug, Parser, Clone, Default)]
#[clap(
    about = "Remove comments from source files",
    long_about = "Removes single-line comments while keeping comments inside strings and block comments.\nRuns as a dry run unless --write is given."
)]
pub struct CommenterArgs {
    #[clap(
        help = "File, directory or glob pattern to process",
        default_value = "."
    )]
    pub path: String,

    #[clap(short, long, help = "Write changes back to the files")]
    pub write: bool,

    #[clap(long, help = "Only process the top level of a directory")]
    pub no_recursive: bool,

    #[clap(short, long, help = "Also remove runs of consecutive comment lines")]
    pub consecutive: bool,

    #[clap(
        short = 'm',
        long,
        help = "Remove block comments written on a single line, e.g. /* note */"
    )]
    pub remove_single_multiline: bool,

    #[clap(
        short = 'b',
        long,
        help = "Remove block comments, including multi-line ones"
    )]
    pub remove_blocks: bool,

    #[clap( short, long, value_name = "PATTERN", value_delimiter = ',', help = "Keep comments containing this text [comma-separated, multiple allowed]", action = clap::ArgAction::Append )]
    pub ignore_pattern: Vec<String>,

    #[clap( short, long, value_name = "GLOB", value_delimiter = ',', help = "Skip files whose name matches [comma-separated, multiple allowed]", action = clap::ArgAction::Append )]
    pub exclude: Vec<String>,

    #[clap(long, value_name = "FILE", help = "Config file [default: commenter.config.json]")]
    pub config: Option<PathBuf>,

    #[clap(long, visible_alias = "nc", help = "Disable colored output")]
    pub no_color: bool,

    #[clap(long, visible_alias = "nwl", help = "Do not warn about files over 500 lines")]
    pub no_warn_large: bool,

    #[clap(long, help = "Skip the confirmation prompt")]
    pub no_confirm: bool,

    #[clap(short, long, help = "Log engine decisions to stderr")]
    pub verbose: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    #[clap(about = "Generate shell completion scripts")]
    Completion(CompletionArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CompletionArgs {
    #[clap(value_parser = clap::value_parser!(clap_complete::Shell))]
    pub shell: clap_complete::Shell,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "commenter",
    version,
    about = "Remove comments from source files",
    propagate_version = true,
    args_conflicts_with_subcommands = true
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[clap(flatten)]
    pub main_opts: CommenterArgs,
}

#[derive(Debug, Clone)]
pub struct FindOptions {
    pub recursive: bool,
    pub exclude: Vec<String>,
}

fn is_glob(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for p in patterns {
        builder.add(Glob::new(p).with_context(|| format!("Exclude: {}", p))?);
    }
    builder.build().context("Exclude patterns")
}

fn is_excluded(path: &Path, excludes: &GlobSet) -> bool {
    path.file_name().is_some_and(|n| excludes.is_match(n))
}

fn target(path: PathBuf, profile: &'static LanguageProfile) -> FileTarget {
    FileTarget { path, profile }
}

pub fn find_files(input: &str, opts: &FindOptions) -> Result<Vec<FileTarget>> {
    let excludes = build_exclude_set(&opts.exclude)?;

    if is_glob(input) {
        return find_glob_files(input, &excludes);
    }

    let root = Path::new(input);
    if !root.exists() {
        anyhow::bail!("Path does not exist: {}", root.display());
    }

    if root.is_file() {
        let profile = get_language_for_path(root).with_context(|| {
            format!(
                "Unsupported file type: {}",
                root.extension()
                    .map(|e| e.to_string_lossy().to_string())
                    .unwrap_or_else(|| root.display().to_string())
            )
        })?;
        if is_excluded(root, &excludes) || is_ignored_file(root) {
            return Ok(Vec::new());
        }
        return Ok(vec![target(root.to_path_buf(), profile)]);
    }

    let mut w = WalkBuilder::new(root);
    w.standard_filters(true);
    w.hidden(false);
    w.require_git(false);
    w.add_custom_ignore_filename(IGNORE_FILE);
    if !opts.recursive {
        w.max_depth(Some(1));
    }

    let mut files = Vec::new();
    for entry in w.build() {
        match entry {
            Ok(e) => {
                if !e.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }
                let path = e.path();
                if is_excluded(path, &excludes) {
                    debug!(path = %path.display(), "excluded");
                    continue;
                }
                if let Some(profile) = get_language_for_path(path) {
                    files.push(target(e.into_path(), profile));
                }
            }
            Err(e) => warn!("Skipping entry: {}", e),
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

fn is_ignored_file(path: &Path) -> bool {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut builder = ignore::gitignore::GitignoreBuilder::new(dir);
    for name in [".gitignore", IGNORE_FILE] {
        let candidate = dir.join(name);
        if candidate.is_file() {
            if let Some(e) = builder.add(&candidate) {
                warn!("{}: {}", candidate.display(), e);
            }
        }
    }
    match builder.build() {
        Ok(gi) => gi.matched(path, false).is_ignore(),
        Err(e) => {
            warn!("Ignore rules: {}", e);
            false
        }
    }
}

fn glob_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    for component in Path::new(pattern).components() {
        if is_glob(&component.as_os_str().to_string_lossy()) {
            break;
        }
        base.push(component);
    }
    if base.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        base
    }
}

fn find_glob_files(pattern: &str, excludes: &GlobSet) -> Result<Vec<FileTarget>> {
    let matcher = Glob::new(pattern)
        .with_context(|| format!("Invalid glob pattern '{}'", pattern))?
        .compile_matcher();
    let base = glob_base(pattern);
    let strip_dot = !pattern.starts_with("./") && base == Path::new(".");

    let mut files = Vec::new();
    for entry in WalkBuilder::new(&base).standard_filters(false).build() {
        let Ok(e) = entry else { continue };
        if !e.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = e.path();
        let candidate = if strip_dot {
            path.strip_prefix(".").unwrap_or(path)
        } else {
            path
        };
        if !matcher.is_match(candidate) || is_excluded(path, excludes) {
            continue;
        }
        if let Some(profile) = get_language_for_path(path) {
            files.push(target(candidate.to_path_buf(), profile));
        }
    }

    if files.is_empty() {
        anyhow::bail!("No files match pattern: {}", pattern);
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
