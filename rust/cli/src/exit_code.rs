//! Exit code constants for the CLI application.

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// General error exit code, also used for argument parsing failures.
pub const ERROR: i32 = 2;

/// Input closed mid-round (Ctrl+D at the prompt).
pub const INTERRUPTED: i32 = 130;
