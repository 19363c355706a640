// vidpress-cli/src/error.rs
//
// Error handling for the CLI, reusing the core error types.

use vidpress_core::CoreResult;

/// Type alias for CLI results using CoreError.
///
/// Keeps the CLI consistent with the core library while leaving room for
/// CLI-specific error handling when needed.
pub type CliResult<T> = CoreResult<T>;
