pub mod config;
pub mod engine;
pub mod file_finder;
pub mod language;
pub mod processor;
pub mod spans;
pub mod stripper;
pub mod treesitter;

pub use config::{
    Config, ConfigError, DEFAULT_CONFIG_FILE, RunOptions, discover_config, load_config,
    resolve_options,
};
pub use engine::{
    CommentDetector, CommentEngine, DISABLE_STRUCTURAL_ENV, DetectError, ScanningDetector,
};
pub use file_finder::{
    CliArgs, Command, CommenterArgs, CompletionArgs, FindOptions, IGNORE_FILE, find_files,
};
pub use language::{BlockDelimiters, LanguageProfile, LanguageRegistry, registry};
pub use processor::{
    BatchReport, CommentRemovalResult, FileTarget, MAX_LINE_BYTES, ProcessError, ProcessOptions,
    ProcessedFileResult, ProcessingStats, RemovedComment, process_file, process_files,
    strip_lines, write_lines,
};
pub use stripper::{IgnorePatterns, LineOutcome, ScanState};
pub use spans::CommentSpan;
pub use treesitter::TreeSitterDetector;
