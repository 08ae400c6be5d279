//! Optimistic mutations over a locally held collection.
//!
//! A mutation moves through `Idle -> Pending -> {Committed, RolledBack}`:
//! [`MutationController::begin`] snapshots the affected slice, applies the
//! intended end state locally and claims the item's in-flight key;
//! [`Pending::send`] performs the remote call; [`MutationController::reconcile`]
//! keeps or restores the local state and raises exactly one notice.

use crate::model::ItemId;

mod collection;
mod controller;
mod inflight;
mod intent;

pub use self::collection::{Collection, Draft, Item};
pub use self::controller::{Confirmed, MutationController, Pending, Reconciliation, SendResult};
pub use self::inflight::{FlightKey, InFlight};
pub use self::intent::{Intent, Patch};

/// Local validation failure of a draft, reported per field.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct Invalid {
    pub field: String,
    pub message: String,
}

impl Invalid {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// An intent rejected before any remote call was made. The collection is unchanged.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MutationError {
    #[error("item {0} already has a change in flight")]
    InFlight(ItemId),

    #[error("an add for {0} is already in flight")]
    DraftInFlight(String),

    #[error("item {0} is not in the list")]
    UnknownItem(ItemId),

    #[error("already in the list ({key})")]
    Conflict { key: String },

    #[error(transparent)]
    Invalid(#[from] Invalid),

    #[error("cannot set `{field}`: {reason}")]
    Field { field: String, reason: String },

    #[error("{0} is not supported by this resource")]
    Unsupported(&'static str),

    #[error("no items selected")]
    Empty,

    #[error("nothing to change")]
    NoChanges,
}

#[cfg(test)]
#[path = "tests/mutation/controller_tests.rs"]
mod tests;
