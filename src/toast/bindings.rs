// SPDX-License-Identifier: MPL-2.0
//! Render-agnostic projection of toast machine state.
//!
//! [`ToastBindings`] turns a machine snapshot into plain data any view
//! layer can consume: derived state flags, attribute bundles for the
//! container, progress indicator, title region and dismiss control, and
//! translation of environment input (keyboard, focus, pointer) into the
//! machine's semantic events. The adapter owns no state and performs no
//! dispatch itself: every handler yields the event value for the host
//! to route back through the manager, the same way a message-driven view
//! attaches a message to a widget.

use super::context::{Direction, Placement, RenderArgs, RenderFn, ToastId, ToastType};
use super::machine::{ToastEvent, ToastMachine};
use std::fmt;

/// Inline style data for the toast container.
///
/// Duration and removal delay are exposed as CSS custom properties so a
/// stylesheet can drive progress and exit animations without asking the
/// machine for time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootStyle {
    pub position: &'static str,
    pub pointer_events: &'static str,
    pub margin: &'static str,
    /// Effective visible lifetime in milliseconds; 0 when no timer runs.
    pub duration_ms: u64,
    /// Exit-animation budget in milliseconds.
    pub remove_delay_ms: u64,
}

impl RootStyle {
    /// The `--duration`/`--remove-delay` custom-property pairs.
    #[must_use]
    pub fn custom_properties(&self) -> [(&'static str, String); 2] {
        [
            ("--duration", format!("{}ms", self.duration_ms)),
            ("--remove-delay", format!("{}ms", self.remove_delay_ms)),
        ]
    }
}

/// Attribute bundle for the toast container element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootAttrs {
    pub data_part: &'static str,
    /// Stable element id derived from the toast id.
    pub id: String,
    pub dir: Direction,
    /// Set while the toast carries the visible tag; cleared on dismiss
    /// so the view can run its exit animation.
    pub data_open: bool,
    pub data_type: &'static str,
    pub data_placement: &'static str,
    /// ARIA live-region role; updates are announced politely.
    pub role: &'static str,
    pub aria_atomic: &'static str,
    pub tab_index: i32,
    pub style: RootStyle,
}

/// Attribute bundle for the progress indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressbarAttrs {
    pub data_part: &'static str,
    pub data_type: &'static str,
    pub opacity: f32,
    /// `Some("none")` for the tick following an update, suppressing an
    /// animation restart while content swaps in place.
    pub animation_name: Option<&'static str>,
    /// Fill direction, mirrored for right-to-left text.
    pub transform_origin: &'static str,
    pub animation_play_state: &'static str,
    pub animation_duration_ms: u64,
    pub animation_fill_mode: Option<&'static str>,
}

/// Attribute bundle for the title region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleAttrs {
    pub data_part: &'static str,
    pub id: String,
}

/// Attribute bundle for the dismiss control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseButtonAttrs {
    pub data_part: &'static str,
    pub id: String,
    pub button_type: &'static str,
    pub aria_label: &'static str,
}

/// Outcome of a key press the adapter wants to consume.
#[derive(Debug, Clone)]
pub struct KeyOutcome<C = ()> {
    /// The semantic event to dispatch.
    pub event: ToastEvent<C>,
    /// The host should suppress the environment's default behavior.
    pub prevent_default: bool,
    /// The host should stop further propagation of the input event.
    pub stop_propagation: bool,
}

/// A render-agnostic snapshot of one toast, ready for a view layer.
pub struct ToastBindings<C = ()> {
    id: ToastId,
    pause_on_interaction: bool,
    render: Option<RenderFn<C>>,
    /// Toast kind, for view styling decisions.
    pub toast_type: ToastType,
    /// Display title, if any.
    pub title: Option<String>,
    /// Display description, if any.
    pub description: Option<String>,
    /// Placement of the stack this toast belongs to.
    pub placement: Placement,
    /// True while the toast should be rendered as open.
    pub is_visible: bool,
    /// True while the countdown is suspended.
    pub is_paused: bool,
    /// True for the tick following a content update.
    pub is_updating: bool,
    /// Container attributes.
    pub root: RootAttrs,
    /// Progress indicator attributes.
    pub progressbar: ProgressbarAttrs,
    /// Title region attributes.
    pub title_region: TitleAttrs,
    /// Dismiss control attributes.
    pub close_button: CloseButtonAttrs,
}

impl<C> ToastBindings<C> {
    /// Projects a machine's current state into a binding bundle.
    pub fn from_machine(machine: &ToastMachine<C>) -> Self {
        let context = machine.context();
        let id = context.id().clone();
        let is_visible = machine.is_visible();
        let is_paused = machine.is_paused();
        let is_updating = machine.is_updating();
        let is_rtl = context.dir().is_rtl();
        let duration_ms = context
            .effective_duration()
            .map_or(0, |d| d.as_millis() as u64);
        let remove_delay_ms = context.remove_delay().as_millis() as u64;

        let root = RootAttrs {
            data_part: "root",
            id: format!("toast:{}", id),
            dir: context.dir(),
            data_open: is_visible,
            data_type: context.toast_type().as_str(),
            data_placement: context.placement().as_str(),
            role: "status",
            aria_atomic: "true",
            tab_index: 0,
            style: RootStyle {
                position: "relative",
                pointer_events: "auto",
                margin: "calc(var(--toast-gutter) / 2)",
                duration_ms,
                remove_delay_ms,
            },
        };

        let progressbar = ProgressbarAttrs {
            data_part: "progressbar",
            data_type: context.toast_type().as_str(),
            opacity: if is_visible { 1.0 } else { 0.0 },
            animation_name: is_updating.then_some("none"),
            transform_origin: if is_rtl { "right" } else { "left" },
            animation_play_state: if is_paused { "paused" } else { "running" },
            animation_duration_ms: duration_ms,
            animation_fill_mode: if is_updating { None } else { Some("forwards") },
        };

        let title_region = TitleAttrs {
            data_part: "title",
            id: format!("toast:{}:title", id),
        };

        let close_button = CloseButtonAttrs {
            data_part: "close-button",
            id: format!("toast:{}:close", id),
            button_type: "button",
            aria_label: "Dismiss notification",
        };

        Self {
            pause_on_interaction: context.pause_on_interaction(),
            render: context.render().cloned(),
            toast_type: context.toast_type(),
            title: context.title().map(str::to_string),
            description: context.description().map(str::to_string),
            placement: context.placement(),
            is_visible,
            is_paused,
            is_updating,
            root,
            progressbar,
            title_region,
            close_button,
            id,
        }
    }

    /// Returns the id of the projected toast.
    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    /// The event that suspends the countdown.
    #[must_use]
    pub fn pause(&self) -> ToastEvent<C> {
        ToastEvent::Pause
    }

    /// The event that restarts the countdown from the remaining time.
    #[must_use]
    pub fn resume(&self) -> ToastEvent<C> {
        ToastEvent::Resume
    }

    /// The event that dismisses the toast.
    #[must_use]
    pub fn dismiss(&self) -> ToastEvent<C> {
        ToastEvent::Dismiss
    }

    /// Keyboard contract for the container: Escape dismisses and
    /// consumes the key. Every other key is ignored.
    #[must_use]
    pub fn on_key_down(&self, key: &str) -> Option<KeyOutcome<C>> {
        if key == "Escape" {
            Some(KeyOutcome {
                event: ToastEvent::Dismiss,
                prevent_default: true,
                stop_propagation: true,
            })
        } else {
            None
        }
    }

    /// Focus entering the container pauses the countdown when the toast
    /// opted into pause-on-interaction.
    #[must_use]
    pub fn on_focus(&self) -> Option<ToastEvent<C>> {
        self.pause_on_interaction.then_some(ToastEvent::Pause)
    }

    /// Focus leaving the container resumes the countdown when the toast
    /// opted into pause-on-interaction.
    #[must_use]
    pub fn on_blur(&self) -> Option<ToastEvent<C>> {
        self.pause_on_interaction.then_some(ToastEvent::Resume)
    }

    /// Pointer entering the container, same contract as focus.
    #[must_use]
    pub fn on_pointer_enter(&self) -> Option<ToastEvent<C>> {
        self.pause_on_interaction.then_some(ToastEvent::Pause)
    }

    /// Pointer leaving the container, same contract as blur.
    #[must_use]
    pub fn on_pointer_leave(&self) -> Option<ToastEvent<C>> {
        self.pause_on_interaction.then_some(ToastEvent::Resume)
    }

    /// Activating the dismiss control.
    #[must_use]
    pub fn on_close_click(&self) -> ToastEvent<C> {
        ToastEvent::Dismiss
    }

    /// Invokes the context's custom render hook, if one was supplied.
    ///
    /// The hook receives the toast's id, type and a ready-to-dispatch
    /// dismiss event. Returns `None` when no hook exists; callers fall
    /// back to the title/description display.
    #[must_use]
    pub fn render(&self) -> Option<C> {
        let hook = self.render.as_ref()?;
        Some(hook(RenderArgs {
            id: &self.id,
            toast_type: self.toast_type,
            dismiss: ToastEvent::Dismiss,
        }))
    }
}

impl<C> fmt::Debug for ToastBindings<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastBindings")
            .field("id", &self.id)
            .field("toast_type", &self.toast_type)
            .field("is_visible", &self.is_visible)
            .field("is_paused", &self.is_paused)
            .field("is_updating", &self.is_updating)
            .field("placement", &self.placement)
            .finish()
    }
}
