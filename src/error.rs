#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    /// A pruning operation was requested while the frontier was empty.
    #[error("no state is currently being explored")]
    NoActiveState,

    #[error("unknown traversal order: {0:?}")]
    UnknownOrder(String),
}
