// SPDX-License-Identifier: MPL-2.0
//! Per-toast lifecycle state machine.
//!
//! A [`ToastMachine`] governs one toast's visibility, timed auto-dismiss,
//! pause/resume, and removal after the exit-animation grace period. All
//! transitions take an explicit [`Instant`], so the machine is fully
//! deterministic under test: deadlines are data, not timer tasks, and the
//! host drives them through [`ToastMachine::tick`].
//!
//! Transitions are total over (state, event): an event that is not valid
//! in the current state is ignored, never fatal.

use super::context::{ToastContext, ToastPatch};
use std::fmt;
use std::time::{Duration, Instant};

/// Semantic events accepted by a toast machine.
///
/// Environment-specific input (pointer, focus, keyboard) is translated
/// into these by the binding adapter; the machine itself knows nothing
/// about input devices.
pub enum ToastEvent<C = ()> {
    /// Suspend the auto-dismiss countdown, preserving elapsed time.
    Pause,
    /// Restart the countdown from the remaining time only.
    Resume,
    /// Clear the visible tag and schedule removal after `remove_delay`.
    Dismiss,
    /// Replace content/duration and restart the countdown in full.
    Update(ToastPatch<C>),
}

impl<C> Clone for ToastEvent<C> {
    fn clone(&self) -> Self {
        match self {
            ToastEvent::Pause => ToastEvent::Pause,
            ToastEvent::Resume => ToastEvent::Resume,
            ToastEvent::Dismiss => ToastEvent::Dismiss,
            ToastEvent::Update(patch) => ToastEvent::Update(patch.clone()),
        }
    }
}

impl<C> fmt::Debug for ToastEvent<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastEvent::Pause => f.write_str("Pause"),
            ToastEvent::Resume => f.write_str("Resume"),
            ToastEvent::Dismiss => f.write_str("Dismiss"),
            ToastEvent::Update(patch) => f.debug_tuple("Update").field(patch).finish(),
        }
    }
}

/// Lifecycle state of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastState {
    /// On screen, countdown running (when a duration is armed).
    Visible,
    /// On screen, countdown suspended.
    Paused,
    /// Visible tag cleared; awaiting the exit-animation grace period.
    Dismissing,
    /// Terminal. The manager drops the toast on this signal.
    Removed,
}

impl ToastState {
    /// Returns true while the toast should be rendered as open.
    ///
    /// Cleared on dismiss so the view can start its exit animation
    /// before the toast is physically removed.
    #[must_use]
    pub fn has_visible_tag(&self) -> bool {
        matches!(self, ToastState::Visible | ToastState::Paused)
    }

    /// Returns true while the countdown is suspended.
    #[must_use]
    pub fn has_paused_tag(&self) -> bool {
        matches!(self, ToastState::Paused)
    }
}

/// Signal produced by [`ToastMachine::tick`] when a deadline fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSignal {
    /// The visible lifetime elapsed; the toast began dismissing.
    Dismissed,
    /// The exit-animation grace period elapsed; the toast is gone and
    /// must be dropped from the registry.
    Removed,
}

/// State machine for a single toast.
pub struct ToastMachine<C = ()> {
    context: ToastContext<C>,
    state: ToastState,
    /// Transient: set by an update, cleared by the next event or tick.
    /// Used by views to suppress a progress-animation restart.
    updating: bool,
    /// Auto-dismiss deadline; armed only while `Visible`.
    deadline: Option<Instant>,
    /// Countdown remainder recorded on pause; consumed on resume.
    remaining: Option<Duration>,
    /// Removal deadline; armed only while `Dismissing`.
    removal_at: Option<Instant>,
}

impl<C> ToastMachine<C> {
    /// Creates a machine in the `Visible` state, arming the auto-dismiss
    /// deadline when the context carries an effective duration.
    pub fn new(context: ToastContext<C>, now: Instant) -> Self {
        let deadline = context.effective_duration().map(|d| now + d);
        Self {
            context,
            state: ToastState::Visible,
            updating: false,
            deadline,
            remaining: None,
            removal_at: None,
        }
    }

    /// Dispatches a semantic event at the given instant.
    ///
    /// Returns true when the event caused a transition; invalid
    /// (state, event) pairs are ignored and return false.
    pub fn send(&mut self, event: ToastEvent<C>, now: Instant) -> bool {
        self.updating = false;
        match (self.state, event) {
            (ToastState::Visible, ToastEvent::Pause) => {
                self.remaining = self.deadline.map(|d| d.saturating_duration_since(now));
                self.deadline = None;
                self.state = ToastState::Paused;
                true
            }
            (ToastState::Paused, ToastEvent::Resume) => {
                self.deadline = self.remaining.take().map(|r| now + r);
                self.state = ToastState::Visible;
                true
            }
            (ToastState::Visible | ToastState::Paused, ToastEvent::Dismiss) => {
                self.begin_dismiss(now);
                true
            }
            (ToastState::Visible, ToastEvent::Update(patch)) => {
                self.context.apply(patch);
                self.updating = true;
                // Countdown restarts from the full (possibly new) duration
                self.deadline = self.context.effective_duration().map(|d| now + d);
                true
            }
            (ToastState::Paused, ToastEvent::Update(patch)) => {
                self.context.apply(patch);
                self.updating = true;
                // Still paused; the full new duration runs after resume
                self.remaining = self.context.effective_duration();
                true
            }
            _ => false,
        }
    }

    /// Advances timer logic to `now`.
    ///
    /// This is the only place the machine reaches `Removed`. Returns a
    /// signal when a deadline fired, `None` otherwise.
    pub fn tick(&mut self, now: Instant) -> Option<TickSignal> {
        self.updating = false;
        match self.state {
            ToastState::Visible => {
                if self.deadline.is_some_and(|d| d <= now) {
                    self.begin_dismiss(now);
                    Some(TickSignal::Dismissed)
                } else {
                    None
                }
            }
            ToastState::Dismissing => {
                if self.removal_at.is_some_and(|r| r <= now) {
                    self.removal_at = None;
                    self.state = ToastState::Removed;
                    Some(TickSignal::Removed)
                } else {
                    None
                }
            }
            ToastState::Paused | ToastState::Removed => None,
        }
    }

    /// Clears every countdown deadline and enters `Dismissing`, so no
    /// stale expiry can fire after dismissal.
    fn begin_dismiss(&mut self, now: Instant) {
        self.deadline = None;
        self.remaining = None;
        self.removal_at = Some(now + self.context.remove_delay());
        self.state = ToastState::Dismissing;
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ToastState {
        self.state
    }

    /// Returns the toast's context.
    #[must_use]
    pub fn context(&self) -> &ToastContext<C> {
        &self.context
    }

    /// Returns true while the toast should be rendered as open.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.has_visible_tag()
    }

    /// Returns true while the countdown is suspended.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.has_paused_tag()
    }

    /// Returns true for the tick following a content update.
    #[must_use]
    pub fn is_updating(&self) -> bool {
        self.updating
    }

    /// Returns the earliest pending deadline, if any.
    ///
    /// Hosts that schedule wakeups precisely (instead of polling on a
    /// fixed tick) can sleep until this instant.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            ToastState::Visible => self.deadline,
            ToastState::Dismissing => self.removal_at,
            ToastState::Paused | ToastState::Removed => None,
        }
    }
}

impl<C> fmt::Debug for ToastMachine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastMachine")
            .field("id", self.context.id())
            .field("state", &self.state)
            .field("updating", &self.updating)
            .field("deadline", &self.deadline)
            .field("remaining", &self.remaining)
            .field("removal_at", &self.removal_at)
            .finish()
    }
}
