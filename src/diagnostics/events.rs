// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle event types.
//!
//! These events describe what happened to a toast and when, so a host
//! can inspect notification behavior after the fact (e.g. in a debug
//! overlay or an exported report).

use crate::toast::Placement;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// What happened to a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleKind {
    /// A toast joined a placement's visible sequence.
    Added { id: String, placement: Placement },
    /// A toast arrived while its placement was at the visible limit and
    /// is waiting for a slot.
    Queued { id: String, placement: Placement },
    /// A queued toast was promoted into a freed visible slot.
    Promoted { id: String, placement: Placement },
    /// A toast's content or duration was replaced.
    Updated { id: String },
    /// A toast was dismissed by an explicit request.
    Dismissed { id: String },
    /// A toast's visible lifetime elapsed.
    Expired { id: String },
    /// A toast's exit grace period elapsed; it left the registry.
    Removed { id: String },
    /// An `add` collided with an existing id under the reject policy.
    Rejected { id: String },
    /// An `add` collided with an existing id and replaced its content.
    Replaced { id: String },
    /// The manager was torn down, dropping every toast immediately.
    Cleared,
}

/// A lifecycle event with its capture time (monotonic).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// When the event was recorded.
    pub at: Instant,
    /// What happened.
    pub kind: LifecycleKind,
}

impl LifecycleEvent {
    /// Stamps a kind with the current instant.
    #[must_use]
    pub fn new(kind: LifecycleKind) -> Self {
        Self {
            at: Instant::now(),
            kind,
        }
    }
}
