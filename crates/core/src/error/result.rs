// this_file: crates/core/src/error/result.rs

use super::types::Error;

/// Convenience type alias for Results using trickle_json's Error type.
///
/// This makes function signatures more concise throughout the codebase
/// while maintaining type safety. The terminal decoding entry points and
/// stream drivers return this type.
pub type Result<T> = std::result::Result<T, Error>;
