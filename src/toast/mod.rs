// SPDX-License-Identifier: MPL-2.0
//! Toast notification system core.
//!
//! Non-intrusive notifications following toast/snackbar UX patterns:
//! each toast runs a lifecycle state machine (visible → paused ↔ visible
//! → dismissing → removed), a manager stacks concurrent toasts per
//! placement, and a binding adapter projects machine state into plain
//! data for any view layer.
//!
//! # Components
//!
//! - [`context`] - `ToastContext` record plus the id/type/placement
//!   vocabularies and the `ToastPatch` update payload
//! - [`machine`] - `ToastMachine` lifecycle state machine with explicit
//!   `Instant`-driven timer logic
//! - [`manager`] - `ToastManager` registry: per-placement ordering,
//!   visible limit with overflow queue, command routing, observers
//! - [`bindings`] - `ToastBindings` render-agnostic attribute/handler
//!   projection
//!
//! # Usage
//!
//! ```
//! use lens_notify::toast::{ToastBindings, ToastContext, ToastManager};
//! use std::time::{Duration, Instant};
//!
//! let mut manager: ToastManager = ToastManager::new();
//! let now = Instant::now();
//!
//! let id = manager
//!     .add_at(
//!         ToastContext::success()
//!             .with_title("Image saved")
//!             .with_duration(Duration::from_secs(3)),
//!         now,
//!     )
//!     .expect("fresh id cannot collide");
//!
//! // In the host's render pass
//! let machine = manager.machine(&id).expect("just added");
//! let bindings = ToastBindings::from_machine(machine);
//! assert!(bindings.is_visible);
//!
//! // In the host's timer loop
//! manager.tick_at(now + Duration::from_millis(100));
//! ```

pub mod bindings;
pub mod context;
pub mod machine;
pub mod manager;

pub use bindings::{
    CloseButtonAttrs, KeyOutcome, ProgressbarAttrs, RootAttrs, RootStyle, TitleAttrs,
    ToastBindings,
};
pub use context::{
    Direction, Placement, RenderArgs, RenderFn, ToastContext, ToastId, ToastPatch, ToastType,
};
pub use machine::{TickSignal, ToastEvent, ToastMachine, ToastState};
pub use manager::{DuplicatePolicy, PlacementChange, StackingOrder, ToastManager};
