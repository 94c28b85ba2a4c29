//! Breadth-first and depth-first traversal of transition systems.
//!
//! Three layers are provided, each usable on its own:
//!
//!   1. [raw::RawTraversal], a lazy iterator of `Init`/`Start`/`Edge`/`Finish` events
//!      that explores only what its consumer schedules,
//!   2. [search::Search], which schedules every newly discovered state, colors the
//!      records and classifies each edge, and
//!   3. [visitor::traverse], an eager traversal steered by a [visitor::TraversalVisitor]
//!      and bounded by a state limit.

use std::fmt;
use std::str::FromStr;

use crate::error::TraversalError;

mod frontier;
pub mod raw;
pub mod search;
pub mod visitor;

pub use frontier::Record;
pub use raw::{raw_traversal, Backtrack, RawEvent, RawTraversal};
pub use search::{bfs, dfs, search, EdgeKind, Search, SearchEvent, SearchEventKind, SearchRecord};
pub use visitor::{
    breadth_first, depth_first, traverse, traverse_with, TraversalAction, TraversalVisitor,
};

/// State limit meaning "explore everything that is reachable".
pub const NO_LIMIT: Option<usize> = None;

/// The shape of the frontier: a FIFO queue or a LIFO stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    BreadthFirst,
    DepthFirst,
}

impl FromStr for TraversalOrder {
    type Err = TraversalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" | "breadth_first" => Ok(TraversalOrder::BreadthFirst),
            "dfs" | "depth-first" | "depth_first" => Ok(TraversalOrder::DepthFirst),
            _ => Err(TraversalError::UnknownOrder(s.to_owned())),
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalOrder::BreadthFirst => f.write_str("breadth-first"),
            TraversalOrder::DepthFirst => f.write_str("depth-first"),
        }
    }
}

/// Settings for a bounded traversal, see [visitor::traverse_with].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TraversalConfig {
    pub order: TraversalOrder,

    /// Maximum number of states scheduled for exploration, or [NO_LIMIT].
    pub state_limit: Option<usize>,
}

impl TraversalConfig {
    pub fn new(order: TraversalOrder) -> Self {
        Self {
            order,
            state_limit: NO_LIMIT,
        }
    }

    pub fn with_state_limit(mut self, limit: usize) -> Self {
        self.state_limit = Some(limit);
        self
    }
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self::new(TraversalOrder::BreadthFirst)
    }
}

/// Handle of a record created during one traversal.
///
/// Handles are only meaningful for the traversal that produced them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(usize);

impl RecordId {
    /// Position of the record in creation order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Search mark of a record.
///
/// The variants are ordered, and a record's color only ever moves forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    /// Discovered but not started.
    White,
    /// Started but not finished.
    Gray,
    /// All outgoing transitions explored.
    Black,
}

impl Color {
    /// Move to `next` unless that would go backwards.
    #[inline]
    pub(crate) fn advance(&mut self, next: Color) {
        if next > *self {
            *self = next;
        }
    }
}
