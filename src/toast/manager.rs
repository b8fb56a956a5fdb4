// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The [`ToastManager`] owns every active toast machine, keyed by id, and
//! the ordered visible sequence per placement. It routes commands to
//! individual machines, enforces the visible limit with an overflow queue,
//! and drops a toast from its registry only when the machine signals that
//! the exit-animation grace period has elapsed.

use super::context::{Placement, ToastContext, ToastId, ToastPatch};
use super::machine::{TickSignal, ToastEvent, ToastMachine};
use crate::config::NotificationConfig;
use crate::diagnostics::{DiagnosticsHandle, LifecycleKind};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::time::Instant;

/// Where a newly added toast joins its placement's visible sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StackingOrder {
    /// New toasts join the front of the sequence.
    #[default]
    NewestFirst,
    /// New toasts join the back of the sequence.
    OldestFirst,
}

/// What `add` does when the id is already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Idempotent no-op: the existing toast is kept untouched.
    #[default]
    Ignore,
    /// The existing toast's content is replaced in place (its stack
    /// position is preserved) and its countdown restarts.
    Replace,
    /// The call fails with `Error::DuplicateId`.
    Reject,
}

/// Snapshot handed to placement observers after a sequence change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementChange {
    /// The placement whose visible sequence changed.
    pub placement: Placement,
    /// The sequence after the change, in stacking order.
    pub ids: Vec<ToastId>,
}

type Observer = Box<dyn FnMut(&PlacementChange)>;

/// Manages the set of active toasts across placements.
pub struct ToastManager<C = ()> {
    config: NotificationConfig,
    /// Registered machines, visible or dismissing.
    machines: HashMap<ToastId, ToastMachine<C>>,
    /// Visible sequence per placement, in stacking order.
    order: HashMap<Placement, VecDeque<ToastId>>,
    /// Toasts waiting for a visible slot, oldest first.
    queues: HashMap<Placement, VecDeque<ToastContext<C>>>,
    observers: Vec<Observer>,
    /// Optional diagnostics handle for recording lifecycle events.
    diagnostics: Option<DiagnosticsHandle>,
}

impl<C> Default for ToastManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ToastManager<C> {
    /// Creates an empty manager with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: NotificationConfig::default(),
            machines: HashMap::new(),
            order: HashMap::new(),
            queues: HashMap::new(),
            observers: Vec::new(),
            diagnostics: None,
        }
    }

    /// Creates an empty manager with the given configuration.
    ///
    /// Fails with `InvalidConfiguration` when the configuration carries
    /// negative durations.
    pub fn with_config(config: NotificationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    /// Sets the diagnostics handle for recording lifecycle events.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Registers an observer invoked whenever a placement's visible
    /// sequence changes (add, removal, promotion, clear).
    pub fn subscribe(&mut self, observer: impl FnMut(&PlacementChange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Adds a toast, timestamped now.
    ///
    /// See [`ToastManager::add_at`].
    pub fn add(&mut self, context: ToastContext<C>) -> Result<ToastId> {
        self.add_at(context, Instant::now())
    }

    /// Adds a toast at the given instant.
    ///
    /// The toast joins its placement's visible sequence at the
    /// stacking-policy end, or the overflow queue when the placement is
    /// at its visible limit. Id collisions follow the configured
    /// [`DuplicatePolicy`]. Returns the toast's id.
    pub fn add_at(&mut self, context: ToastContext<C>, now: Instant) -> Result<ToastId> {
        let id = context.id().clone();
        if id.is_empty() {
            return Err(Error::InvalidConfiguration(
                "toast id must not be empty".to_string(),
            ));
        }

        if self.contains(&id) {
            return match self.config.on_duplicate {
                DuplicatePolicy::Ignore => Ok(id),
                DuplicatePolicy::Reject => {
                    self.record(|| LifecycleKind::Rejected { id: id.to_string() });
                    Err(Error::DuplicateId(id))
                }
                DuplicatePolicy::Replace => {
                    self.replace(context, now);
                    Ok(id)
                }
            };
        }

        let placement = context.placement();
        if self.placement_is_full(placement) {
            self.record(|| LifecycleKind::Queued {
                id: id.to_string(),
                placement,
            });
            self.queues.entry(placement).or_default().push_back(context);
        } else {
            self.record(|| LifecycleKind::Added {
                id: id.to_string(),
                placement,
            });
            self.insert_visible(context, now);
            self.notify(placement);
        }
        Ok(id)
    }

    /// Applies a content/duration patch, timestamped now.
    pub fn update(&mut self, id: &ToastId, patch: ToastPatch<C>) -> Result<()> {
        self.update_at(id, patch, Instant::now())
    }

    /// Applies a content/duration patch at the given instant.
    ///
    /// The target machine resets its countdown to the new full duration.
    /// A queued toast is patched in place. Fails with `NotFound` when the
    /// id is not registered (callers may treat that as already-dismissed).
    pub fn update_at(&mut self, id: &ToastId, patch: ToastPatch<C>, now: Instant) -> Result<()> {
        if let Some(machine) = self.machines.get_mut(id) {
            machine.send(ToastEvent::Update(patch), now);
            self.record(|| LifecycleKind::Updated { id: id.to_string() });
            return Ok(());
        }
        if let Some(context) = self
            .queues
            .values_mut()
            .find_map(|queue| queue.iter_mut().find(|c| c.id() == id))
        {
            context.apply(patch);
            self.record(|| LifecycleKind::Updated { id: id.to_string() });
            return Ok(());
        }
        Err(Error::NotFound(id.clone()))
    }

    /// Dismisses a toast, timestamped now.
    pub fn dismiss(&mut self, id: &ToastId) -> bool {
        self.dismiss_at(id, Instant::now())
    }

    /// Dismisses a toast at the given instant.
    ///
    /// A visible toast starts its exit (removal follows after its
    /// `remove_delay`); a queued toast is dropped outright, having never
    /// been shown. Returns `true` when the id was found. Dismissing an
    /// already-dismissing toast is a safe no-op.
    pub fn dismiss_at(&mut self, id: &ToastId, now: Instant) -> bool {
        if let Some(machine) = self.machines.get_mut(id) {
            if machine.send(ToastEvent::Dismiss, now) {
                self.record(|| LifecycleKind::Dismissed { id: id.to_string() });
            }
            return true;
        }
        let mut dropped = false;
        for queue in self.queues.values_mut() {
            if let Some(pos) = queue.iter().position(|c| c.id() == id) {
                queue.remove(pos);
                dropped = true;
                break;
            }
        }
        if dropped {
            self.record(|| LifecycleKind::Dismissed { id: id.to_string() });
        }
        dropped
    }

    /// Dismisses every toast, optionally scoped to one placement.
    pub fn dismiss_all(&mut self, placement: Option<Placement>) {
        self.dismiss_all_at(placement, Instant::now());
    }

    /// Dismisses every toast at the given instant, optionally scoped to
    /// one placement. Queued toasts in scope are dropped outright.
    pub fn dismiss_all_at(&mut self, placement: Option<Placement>, now: Instant) {
        let ids: Vec<ToastId> = self
            .machines
            .iter()
            .filter(|(_, machine)| {
                placement.is_none_or(|p| machine.context().placement() == p)
            })
            .map(|(id, _)| id.clone())
            .collect();
        for id in ids {
            self.dismiss_at(&id, now);
        }

        match placement {
            Some(p) => {
                if let Some(queue) = self.queues.get_mut(&p) {
                    queue.clear();
                }
            }
            None => self.queues.clear(),
        }
    }

    /// Routes a semantic event (typically produced by the binding
    /// adapter) to a machine, timestamped now.
    pub fn send(&mut self, id: &ToastId, event: ToastEvent<C>) -> bool {
        self.send_at(id, event, Instant::now())
    }

    /// Routes a semantic event to a machine at the given instant.
    ///
    /// Returns `true` when the event caused a transition. Unknown ids
    /// and events invalid in the machine's current state are ignored.
    pub fn send_at(&mut self, id: &ToastId, event: ToastEvent<C>, now: Instant) -> bool {
        if let ToastEvent::Dismiss = event {
            // Queue-aware path, and records the dismissal
            return self.dismiss_at(id, now);
        }
        self.machines
            .get_mut(id)
            .is_some_and(|machine| machine.send(event, now))
    }

    /// Advances timer logic for every machine, timestamped now.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advances timer logic for every machine to the given instant.
    ///
    /// Expired countdowns begin dismissing; elapsed grace periods remove
    /// toasts from the registry and promote queued toasts into the freed
    /// slots. The only path that reclaims a toast.
    pub fn tick_at(&mut self, now: Instant) {
        let ids: Vec<ToastId> = self.machines.keys().cloned().collect();
        let mut changed: Vec<Placement> = Vec::new();

        for id in ids {
            let Some(machine) = self.machines.get_mut(&id) else {
                continue;
            };
            match machine.tick(now) {
                Some(TickSignal::Dismissed) => {
                    self.record(|| LifecycleKind::Expired { id: id.to_string() });
                }
                Some(TickSignal::Removed) => {
                    if let Some(placement) = self.remove(&id, now) {
                        if !changed.contains(&placement) {
                            changed.push(placement);
                        }
                    }
                }
                None => {}
            }
        }

        for placement in changed {
            self.notify(placement);
        }
    }

    /// Immediately drops every toast and queue entry.
    ///
    /// Bypasses exit animations; intended for teardown (e.g. a screen
    /// change), not for user-facing dismissal. Use
    /// [`ToastManager::dismiss_all`] for that.
    pub fn clear(&mut self) {
        let placements: Vec<Placement> = self.order.keys().copied().collect();
        self.machines.clear();
        self.order.clear();
        self.queues.clear();
        self.record(|| LifecycleKind::Cleared);
        for placement in placements {
            self.notify(placement);
        }
    }

    /// Returns the machine registered under `id`, if any.
    #[must_use]
    pub fn machine(&self, id: &ToastId) -> Option<&ToastMachine<C>> {
        self.machines.get(id)
    }

    /// Returns the machines of a placement's visible sequence, in
    /// stacking order. Includes toasts that are still dismissing.
    pub fn toasts(&self, placement: Placement) -> impl Iterator<Item = &ToastMachine<C>> {
        self.order
            .get(&placement)
            .into_iter()
            .flatten()
            .filter_map(|id| self.machines.get(id))
    }

    /// Returns a placement's visible sequence of ids, in stacking order.
    #[must_use]
    pub fn ordered_ids(&self, placement: Placement) -> Vec<ToastId> {
        self.order
            .get(&placement)
            .map(|seq| seq.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns the number of registered toasts across all placements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.machines.len()
    }

    /// Returns true when no toast is registered or queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.machines.is_empty() && self.queues.values().all(VecDeque::is_empty)
    }

    /// Returns the number of toasts waiting in a placement's queue.
    #[must_use]
    pub fn queued_count(&self, placement: Placement) -> usize {
        self.queues.get(&placement).map_or(0, VecDeque::len)
    }

    /// Returns the earliest pending deadline across all machines.
    ///
    /// Hosts that schedule wakeups precisely can sleep until this
    /// instant instead of polling on a fixed tick.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.machines
            .values()
            .filter_map(ToastMachine::next_deadline)
            .min()
    }

    /// True when the id is registered or queued.
    fn contains(&self, id: &ToastId) -> bool {
        self.machines.contains_key(id)
            || self
                .queues
                .values()
                .any(|queue| queue.iter().any(|c| c.id() == id))
    }

    fn placement_is_full(&self, placement: Placement) -> bool {
        self.config
            .max_visible
            .is_some_and(|max| self.order.get(&placement).map_or(0, VecDeque::len) >= max)
    }

    /// Swaps a duplicate id's content in place, preserving its stack
    /// position; the replacement machine restarts its countdown.
    fn replace(&mut self, context: ToastContext<C>, now: Instant) {
        let id = context.id().clone();
        self.record(|| LifecycleKind::Replaced { id: id.to_string() });
        if self.machines.contains_key(&id) {
            self.machines.insert(id, ToastMachine::new(context, now));
            return;
        }
        for queue in self.queues.values_mut() {
            if let Some(slot) = queue.iter_mut().find(|c| c.id() == &id) {
                *slot = context;
                return;
            }
        }
    }

    fn insert_visible(&mut self, context: ToastContext<C>, now: Instant) {
        let id = context.id().clone();
        let placement = context.placement();
        self.machines.insert(id.clone(), ToastMachine::new(context, now));
        let seq = self.order.entry(placement).or_default();
        match self.config.stacking {
            StackingOrder::NewestFirst => seq.push_front(id),
            StackingOrder::OldestFirst => seq.push_back(id),
        }
    }

    /// Drops a removed toast from both maps and promotes queued toasts
    /// into the freed slot. Idempotent: a second removal request for an
    /// already-removed id is a safe no-op. Returns the placement whose
    /// sequence changed.
    fn remove(&mut self, id: &ToastId, now: Instant) -> Option<Placement> {
        let machine = self.machines.remove(id)?;
        let placement = machine.context().placement();
        if let Some(seq) = self.order.get_mut(&placement) {
            if let Some(pos) = seq.iter().position(|i| i == id) {
                seq.remove(pos);
            }
        }
        self.record(|| LifecycleKind::Removed { id: id.to_string() });
        self.promote_from_queue(placement, now);
        Some(placement)
    }

    /// Promotes queued toasts while visible slots are free. Promoted
    /// toasts join the back of the sequence so already-visible toasts
    /// never reorder.
    fn promote_from_queue(&mut self, placement: Placement, now: Instant) {
        while !self.placement_is_full(placement) {
            let Some(context) = self
                .queues
                .get_mut(&placement)
                .and_then(VecDeque::pop_front)
            else {
                break;
            };
            let id = context.id().clone();
            self.record(|| LifecycleKind::Promoted {
                id: id.to_string(),
                placement,
            });
            self.machines.insert(id.clone(), ToastMachine::new(context, now));
            self.order.entry(placement).or_default().push_back(id);
        }
    }

    fn notify(&mut self, placement: Placement) {
        if self.observers.is_empty() {
            return;
        }
        let change = PlacementChange {
            placement,
            ids: self.ordered_ids(placement),
        };
        for observer in &mut self.observers {
            observer(&change);
        }
    }

    fn record(&self, kind: impl FnOnce() -> LifecycleKind) {
        if let Some(handle) = &self.diagnostics {
            handle.record(kind());
        }
    }
}

impl<C> std::fmt::Debug for ToastManager<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastManager")
            .field("config", &self.config)
            .field("machines", &self.machines.len())
            .field("order", &self.order)
            .field("observers", &self.observers.len())
            .finish()
    }
}
