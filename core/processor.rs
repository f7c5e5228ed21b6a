use crate::engine::{CommentEngine, DetectError};
use crate::language::LanguageProfile;
use crate::spans::{remove_spans, scan_comment_spans};
use crate::stripper::{
    IgnorePatterns, LineOutcome, ScanState, is_consecutive_comment, self_contained_block,
    strip_line_comment, update_block_state,
};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const MAX_LINE_BYTES: usize = 10 * 1024 * 1024;

#[derive(thiserror::Error, Debug)]
pub enum ProcessError {
    #[error(
        "line {line} is longer than {} MB (likely a minified/bundled file)",
        .limit / (1024 * 1024)
    )]
    OversizedLine { line: usize, limit: usize },

    #[error("read failed: {0}")]
    Read(#[from] io::Error),

    #[error(transparent)]
    Detect(#[from] DetectError),
}

#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub remove_consecutive: bool,
    pub remove_self_contained: bool,
    pub remove_blocks: bool,
    pub ignore_patterns: IgnorePatterns,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedComment {
    pub line_number: usize,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentRemovalResult {
    pub original_lines: usize,
    pub comments_removed: usize,
    pub remaining_lines: usize,
    pub modified_lines: Vec<String>,
    pub removed_comments: Vec<RemovedComment>,
}

impl CommentRemovalResult {
    pub(crate) fn assemble(
        original_lines: usize,
        outcomes: Vec<LineOutcome>,
        removed_comments: Vec<RemovedComment>,
    ) -> Self {
        let modified_lines: Vec<String> = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                LineOutcome::Keep(line) => Some(line),
                LineOutcome::Delete => None,
            })
            .collect();
        CommentRemovalResult {
            original_lines,
            comments_removed: removed_comments.len(),
            remaining_lines: modified_lines.len(),
            modified_lines,
            removed_comments,
        }
    }

    pub fn is_modified(&self) -> bool {
        self.comments_removed > 0
    }
}

#[derive(Debug)]
pub struct ScanContext<'a> {
    lines: &'a [String],
    profile: &'a LanguageProfile,
    options: &'a ProcessOptions,
    state: ScanState,
}

impl<'a> ScanContext<'a> {
    pub fn new(
        lines: &'a [String],
        profile: &'a LanguageProfile,
        options: &'a ProcessOptions,
    ) -> Self {
        ScanContext {
            lines,
            profile,
            options,
            state: ScanState::default(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Processes line `idx`. Lines must be visited in order.
    pub fn strip_line(&mut self, idx: usize) -> (LineOutcome, Option<RemovedComment>) {
        let line = &self.lines[idx];
        let profile = self.profile;
        let options = self.options;

        if profile.has_block_syntax() {
            self.state = update_block_state(line, profile, self.state);
        }
        let consecutive = is_consecutive_comment(self.lines, idx, profile);

        let (mut outcome, mut removed) = strip_line_comment(
            line,
            profile,
            self.state,
            options.remove_consecutive,
            consecutive,
        );
        let mut content = line.clone();

        if removed
            && !options.ignore_patterns.is_empty()
            && line.contains(profile.single_line)
            && options.ignore_patterns.keeps(line, profile)
        {
            removed = false;
            outcome = LineOutcome::keep(line);
        }

        if !removed && options.remove_self_contained && profile.has_block_syntax() {
            if let Some(comment) = self_contained_block(line, profile) {
                if options.ignore_patterns.keeps(&comment, profile) {
                    outcome = LineOutcome::Keep(comment);
                } else {
                    removed = true;
                    outcome = LineOutcome::Delete;
                    content = comment;
                }
            }
        }

        let record = removed.then(|| RemovedComment {
            line_number: idx + 1,
            content,
        });
        (outcome, record)
    }
}

pub fn strip_lines(
    lines: &[String],
    profile: &LanguageProfile,
    options: &ProcessOptions,
) -> CommentRemovalResult {
    if options.remove_blocks && profile.has_block_syntax() {
        let spans = scan_comment_spans(lines, profile);
        return remove_spans(lines, &spans, profile, options);
    }

    let mut ctx = ScanContext::new(lines, profile, options);
    let mut outcomes = Vec::with_capacity(lines.len());
    let mut removed = Vec::new();

    for idx in 0..lines.len() {
        let (outcome, record) = ctx.strip_line(idx);
        removed.extend(record);
        outcomes.push(outcome);
    }

    CommentRemovalResult::assemble(lines.len(), outcomes, removed)
}

pub fn read_lines<R: BufRead>(mut reader: R) -> Result<Vec<String>, ProcessError> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    let limit = MAX_LINE_BYTES as u64 + 2;

    loop {
        buf.clear();
        let n = reader.by_ref().take(limit).read_until(b'\n', &mut buf)?;
        if n == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        if buf.len() > MAX_LINE_BYTES {
            return Err(ProcessError::OversizedLine {
                line: lines.len() + 1,
                limit: MAX_LINE_BYTES,
            });
        }
        let line = String::from_utf8(std::mem::take(&mut buf))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        lines.push(line);
    }

    Ok(lines)
}

pub fn read_file_lines(path: &Path) -> Result<Vec<String>, ProcessError> {
    let file = File::open(path)?;
    read_lines(BufReader::new(file))
}

pub fn write_lines(path: &Path, lines: &[String]) -> io::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(path).map(|m| m.permissions()).ok();

    let mut temp_file = tempfile::Builder::new()
        .prefix(".commenter_")
        .tempfile_in(parent)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file_mut());
        for line in lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }
    if let Some(permissions) = permissions {
        fs::set_permissions(temp_file.path(), permissions)?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn process_file(
    path: &Path,
    profile: &LanguageProfile,
    options: &ProcessOptions,
    engine: &mut CommentEngine,
) -> Result<CommentRemovalResult, ProcessError> {
    let lines = read_file_lines(path)?;
    let result = engine.detect(Some(path), &lines, profile, options)?;
    debug!(
        path = %path.display(),
        language = profile.name,
        removed = result.comments_removed,
        "processed"
    );
    Ok(result)
}

#[derive(Debug, Clone)]
pub struct FileTarget {
    pub path: PathBuf,
    pub profile: &'static LanguageProfile,
}

#[derive(Debug)]
pub struct ProcessedFileResult {
    pub path: PathBuf,
    pub profile: &'static LanguageProfile,
    pub result: Option<CommentRemovalResult>,
    pub written: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub total_comments: usize,
    pub total_lines: usize,
    pub successful_writes: usize,
    pub failed_writes: usize,
    pub errors: Vec<String>,
}

impl ProcessingStats {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug)]
pub struct BatchReport {
    pub files: Vec<ProcessedFileResult>,
    pub stats: ProcessingStats,
}

fn map_err_to_string<E: std::fmt::Display>(p: &Path, c: &str) -> impl Fn(E) -> String {
    let d = p.display().to_string();
    move |e| format!("{}: {} failed: {}", d, c, e)
}

fn process_target(
    target: &FileTarget,
    options: &ProcessOptions,
    write: bool,
    engine: &mut CommentEngine,
) -> ProcessedFileResult {
    let mut outcome = ProcessedFileResult {
        path: target.path.clone(),
        profile: target.profile,
        result: None,
        written: false,
        error: None,
    };

    let result = match process_file(&target.path, target.profile, options, engine) {
        Ok(result) => result,
        Err(e) => {
            outcome.error = Some(format!("{}: {}", target.path.display(), e));
            return outcome;
        }
    };

    if write {
        match write_lines(&target.path, &result.modified_lines) {
            Ok(()) => outcome.written = true,
            Err(e) => outcome.error = Some(map_err_to_string(&target.path, "write")(e)),
        }
    }
    outcome.result = Some(result);
    outcome
}

pub fn process_files(
    targets: Vec<FileTarget>,
    options: &ProcessOptions,
    write: bool,
) -> BatchReport {
    let files: Vec<ProcessedFileResult> = targets
        .par_iter()
        .map_init(CommentEngine::from_env, |engine, target| {
            process_target(target, options, write, engine)
        })
        .collect();

    let mut stats = ProcessingStats::default();
    for file in &files {
        if let Some(result) = &file.result {
            stats.files_processed += 1;
            stats.total_comments += result.comments_removed;
            stats.total_lines += result.original_lines;
        }
        if file.written {
            stats.successful_writes += 1;
        }
        if let Some(err) = &file.error {
            if file.result.is_some() {
                stats.failed_writes += 1;
            }
            stats.errors.push(err.clone());
        }
    }

    info!(
        files = stats.files_processed,
        comments = stats.total_comments,
        errors = stats.errors.len(),
        "batch complete"
    );
    BatchReport { files, stats }
}
