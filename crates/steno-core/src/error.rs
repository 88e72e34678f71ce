use thiserror::Error;

/// Steno notation that does not describe a valid stroke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrokeParseError {
    #[error("empty stroke")]
    Empty,
    #[error("unexpected key {key:?} in stroke {notation:?}")]
    UnexpectedKey { key: char, notation: String },
}

/// The text before the cursor is not what the engine rendered there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("surrounding text mismatch: expected {expected:?}, found {actual:?}")]
    Mismatch {
        expected: String,
        actual: Option<String>,
    },
}

/// Failure reported by the translator collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("translation failed: {0}")]
pub struct TranslationError(pub String);

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Translation(#[from] TranslationError),
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    /// Output stayed out of sync after every allowed resync.
    #[error("output out of sync after {attempts} resync attempt(s)")]
    OutOfSync {
        attempts: u32,
        #[source]
        source: ReconcileError,
    },
}
