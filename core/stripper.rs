pub mod block;
pub mod keep;
pub mod line;
pub mod strings;

pub use block::{ScanState, self_contained_block, update_block_state};
pub use keep::{IgnorePatterns, comment_body};
pub use line::{LineOutcome, is_consecutive_comment, strip_line_comment};
pub use strings::is_inside_string_literal;
