//! Error types for program loading and turtle interpretation.

/// Structural failures detected while walking a symbol string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurtleError {
    /// A `]` was reached while the branch stack was empty.
    #[error("unbalanced pop at symbol {index}: branch stack is empty")]
    UnbalancedPop {
        /// Char offset of the offending `]`.
        index: usize,
    },

    /// A `[` would push the branch stack past the configured limit.
    #[error("branch stack overflow at symbol {index}: limit is {limit}")]
    StackOverflow {
        /// Char offset of the offending `[`.
        index: usize,
        /// The configured `max_stack_depth`.
        limit: usize,
    },
}

/// Failures surfaced by [`LSystem`](crate::LSystem).
#[derive(Debug, thiserror::Error)]
pub enum LSystemError {
    /// The program file could not be read.
    #[error("failed to read program: {0}")]
    Io(#[from] std::io::Error),

    /// The walk stopped on a structural error; partial output is kept.
    #[error("turtle error: {0}")]
    Turtle(#[from] TurtleError),
}
