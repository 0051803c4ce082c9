//! Error taxonomy for match execution

use thiserror::Error;

/// Errors that abort a single match.
///
/// No partial histories are returned when one of these is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Requested round count is zero
    #[error("invalid match length: {rounds} rounds")]
    InvalidMatchLength { rounds: u32 },

    /// A strategy kind has no registered classifier
    #[error("strategy kind `{kind}` is not registered")]
    UnregisteredStrategy { kind: String },

    /// Mutual inspection did not bottom out
    #[error("introspection cycle detected at depth {depth}")]
    IntrospectionCycle { depth: usize },

    /// A strategy inspected its opponent without declaring `inspects_source`
    #[error("strategy kind `{kind}` inspected its opponent without declaring it")]
    UndeclaredIntrospection { kind: String },

    /// Kind already registered with a different classifier
    #[error("strategy kind `{kind}` is already registered")]
    AlreadyRegistered { kind: String },

    #[error("invalid match config: {0}")]
    InvalidConfig(String),

    /// Failure raised by a strategy's own decision logic
    #[error("strategy `{kind}` failed: {message}")]
    Strategy { kind: String, message: String },
}
