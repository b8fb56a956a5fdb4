// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the per-toast record ([`ToastContext`]) together
//! with the small closed vocabularies it is built from: [`ToastId`],
//! [`ToastType`], [`Placement`] and [`Direction`], plus the
//! [`ToastPatch`] payload applied by content updates.

use super::machine::ToastEvent;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Unique identifier for a toast.
///
/// Ids are either supplied by the caller (so later `update`/`dismiss`
/// calls can reference the toast) or generated from a process-wide
/// counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToastId(String);

impl ToastId {
    /// Creates a new system-assigned unique toast ID.
    pub fn auto() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(format!("toast-{}", COUNTER.fetch_add(1, Ordering::Relaxed)))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the id carries no characters.
    ///
    /// Empty ids are rejected by the manager as invalid configuration.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ToastId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ToastId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a toast, determining default lifetime and visual treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastType {
    /// Informational message.
    #[default]
    Info,
    /// Operation completed successfully.
    Success,
    /// Error requiring attention (manual dismiss).
    Error,
    /// Operation in progress; stays until updated or dismissed.
    Loading,
    /// Caller-defined content, typically paired with a render hook.
    Custom,
}

impl ToastType {
    /// Returns the default auto-dismiss duration for this type.
    ///
    /// Returns `None` for errors and loading toasts (manual dismiss
    /// required). An explicit duration on the context overrides this.
    #[must_use]
    pub fn auto_dismiss_duration(&self) -> Option<Duration> {
        match self {
            ToastType::Info | ToastType::Success | ToastType::Custom => {
                Some(Duration::from_secs(3))
            }
            ToastType::Error | ToastType::Loading => None,
        }
    }

    /// Stable lowercase name, used for `data-type` attributes.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastType::Info => "info",
            ToastType::Success => "success",
            ToastType::Error => "error",
            ToastType::Loading => "loading",
            ToastType::Custom => "custom",
        }
    }
}

impl fmt::Display for ToastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical screen region where a group of toasts stacks.
///
/// Fixed at creation; a toast never migrates between placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    TopStart,
    Top,
    TopEnd,
    BottomStart,
    Bottom,
    /// Bottom trailing corner, the default stack position.
    #[default]
    BottomEnd,
}

impl Placement {
    /// All placements, in reading order.
    pub const ALL: [Placement; 6] = [
        Placement::TopStart,
        Placement::Top,
        Placement::TopEnd,
        Placement::BottomStart,
        Placement::Bottom,
        Placement::BottomEnd,
    ];

    /// Stable kebab-case name, used for `data-placement` attributes.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::TopStart => "top-start",
            Placement::Top => "top",
            Placement::TopEnd => "top-end",
            Placement::BottomStart => "bottom-start",
            Placement::Bottom => "bottom",
            Placement::BottomEnd => "bottom-end",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text direction. Affects progress-indicator orientation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// Returns true for right-to-left text direction.
    #[must_use]
    pub fn is_rtl(&self) -> bool {
        matches!(self, Direction::Rtl)
    }

    /// Stable lowercase name, used for `dir` attributes.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// Arguments handed to a custom render hook.
#[derive(Debug, Clone)]
pub struct RenderArgs<'a, C = ()> {
    /// Id of the toast being rendered.
    pub id: &'a ToastId,
    /// Kind of the toast being rendered.
    pub toast_type: ToastType,
    /// The ready-to-dispatch event that dismisses this toast. Hosts
    /// embed it in whatever message their close affordance emits.
    pub dismiss: ToastEvent<C>,
}

/// Caller-supplied hook producing custom toast content.
///
/// The core never inspects the produced value; `C` is the host's
/// content or message type.
pub type RenderFn<C> = Rc<dyn Fn(RenderArgs<'_, C>) -> C>;

/// A toast to be displayed to the user.
///
/// Built with the constructor-per-type plus `with_*` builder idiom:
///
/// ```
/// use lens_notify::toast::{Placement, ToastContext};
/// use std::time::Duration;
///
/// let toast: ToastContext = ToastContext::success()
///     .with_id("save-ok")
///     .with_title("Saved")
///     .with_placement(Placement::TopEnd)
///     .with_duration(Duration::from_secs(5));
/// assert_eq!(toast.id().as_str(), "save-ok");
/// ```
pub struct ToastContext<C = ()> {
    /// Unique identifier for this toast.
    id: ToastId,
    /// Kind (determines default lifetime).
    toast_type: ToastType,
    /// Optional display title.
    title: Option<String>,
    /// Optional display description.
    description: Option<String>,
    /// Screen region; fixed at creation.
    placement: Placement,
    /// Visible lifetime before auto-dismiss. `None` falls back to the
    /// type default; an explicit zero disables auto-dismiss entirely.
    duration: Option<Duration>,
    /// Grace period between dismiss and removal (exit-animation budget).
    remove_delay: Duration,
    /// Suspend the countdown while the user is focused/hovering.
    pause_on_interaction: bool,
    /// Text direction.
    dir: Direction,
    /// Optional custom content hook, passed through opaquely.
    render: Option<RenderFn<C>>,
}

impl<C> ToastContext<C> {
    /// Creates a toast of the given type with a system-assigned id.
    pub fn new(toast_type: ToastType) -> Self {
        Self {
            id: ToastId::auto(),
            toast_type,
            title: None,
            description: None,
            placement: Placement::default(),
            duration: None,
            remove_delay: Duration::from_millis(crate::config::DEFAULT_REMOVE_DELAY_MS),
            pause_on_interaction: crate::config::DEFAULT_PAUSE_ON_INTERACTION,
            dir: Direction::default(),
            render: None,
        }
    }

    /// Creates an info toast.
    pub fn info() -> Self {
        Self::new(ToastType::Info)
    }

    /// Creates a success toast.
    pub fn success() -> Self {
        Self::new(ToastType::Success)
    }

    /// Creates an error toast.
    pub fn error() -> Self {
        Self::new(ToastType::Error)
    }

    /// Creates a loading toast.
    pub fn loading() -> Self {
        Self::new(ToastType::Loading)
    }

    /// Creates a custom toast, typically paired with [`with_render`].
    ///
    /// [`with_render`]: ToastContext::with_render
    pub fn custom() -> Self {
        Self::new(ToastType::Custom)
    }

    /// Sets a caller-assigned id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ToastId>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the display description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the placement. Immutable after the toast is added.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Sets the visible lifetime, overriding the type default.
    ///
    /// A zero duration disables auto-dismiss.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Sets the delay between dismiss and physical removal.
    #[must_use]
    pub fn with_remove_delay(mut self, remove_delay: Duration) -> Self {
        self.remove_delay = remove_delay;
        self
    }

    /// Enables or disables pausing the countdown on focus/hover.
    #[must_use]
    pub fn with_pause_on_interaction(mut self, pause: bool) -> Self {
        self.pause_on_interaction = pause;
        self
    }

    /// Sets the text direction.
    #[must_use]
    pub fn with_dir(mut self, dir: Direction) -> Self {
        self.dir = dir;
        self
    }

    /// Attaches a custom content hook.
    #[must_use]
    pub fn with_render(mut self, render: impl Fn(RenderArgs<'_, C>) -> C + 'static) -> Self {
        self.render = Some(Rc::new(render));
        self
    }

    /// Returns the toast's unique ID.
    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    /// Returns the toast type.
    #[must_use]
    pub fn toast_type(&self) -> ToastType {
        self.toast_type
    }

    /// Returns the display title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the display description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the placement.
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Returns the explicitly configured duration, if any.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Returns the lifetime the countdown actually runs with.
    ///
    /// An explicit duration takes precedence over the type default; an
    /// explicit zero (and a type without a default) yields `None`,
    /// meaning no timer is armed and the toast waits for an explicit
    /// dismiss.
    #[must_use]
    pub fn effective_duration(&self) -> Option<Duration> {
        match self.duration {
            Some(d) if d.is_zero() => None,
            Some(d) => Some(d),
            None => self.toast_type.auto_dismiss_duration(),
        }
    }

    /// Returns the exit-animation grace period.
    #[must_use]
    pub fn remove_delay(&self) -> Duration {
        self.remove_delay
    }

    /// Returns whether interaction pauses the countdown.
    #[must_use]
    pub fn pause_on_interaction(&self) -> bool {
        self.pause_on_interaction
    }

    /// Returns the text direction.
    #[must_use]
    pub fn dir(&self) -> Direction {
        self.dir
    }

    /// Returns the custom render hook, if any.
    #[must_use]
    pub fn render(&self) -> Option<&RenderFn<C>> {
        self.render.as_ref()
    }

    /// Applies a content/duration patch in place.
    ///
    /// Only the fields present in the patch are replaced; `id` and
    /// `placement` are never touched.
    pub(crate) fn apply(&mut self, patch: ToastPatch<C>) {
        if let Some(toast_type) = patch.toast_type {
            self.toast_type = toast_type;
        }
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(duration) = patch.duration {
            self.duration = Some(duration);
        }
        if let Some(render) = patch.render {
            self.render = Some(render);
        }
    }
}

// Hand-written so cloning does not demand `C: Clone`; the render hook
// is shared, not duplicated.
impl<C> Clone for ToastContext<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            toast_type: self.toast_type,
            title: self.title.clone(),
            description: self.description.clone(),
            placement: self.placement,
            duration: self.duration,
            remove_delay: self.remove_delay,
            pause_on_interaction: self.pause_on_interaction,
            dir: self.dir,
            render: self.render.clone(),
        }
    }
}

impl<C> fmt::Debug for ToastContext<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastContext")
            .field("id", &self.id)
            .field("toast_type", &self.toast_type)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("placement", &self.placement)
            .field("duration", &self.duration)
            .field("remove_delay", &self.remove_delay)
            .field("pause_on_interaction", &self.pause_on_interaction)
            .field("dir", &self.dir)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Replacement payload for a content/duration update.
///
/// Fields left unset keep their current value on the target toast.
pub struct ToastPatch<C = ()> {
    pub(crate) toast_type: Option<ToastType>,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) duration: Option<Duration>,
    pub(crate) render: Option<RenderFn<C>>,
}

impl<C> ToastPatch<C> {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            toast_type: None,
            title: None,
            description: None,
            duration: None,
            render: None,
        }
    }

    /// Replaces the toast type (e.g. loading → success).
    #[must_use]
    pub fn toast_type(mut self, toast_type: ToastType) -> Self {
        self.toast_type = Some(toast_type);
        self
    }

    /// Replaces the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the duration. The countdown restarts from this value.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Replaces the custom render hook.
    #[must_use]
    pub fn render(mut self, render: impl Fn(RenderArgs<'_, C>) -> C + 'static) -> Self {
        self.render = Some(Rc::new(render));
        self
    }
}

impl<C> Default for ToastPatch<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for ToastPatch<C> {
    fn clone(&self) -> Self {
        Self {
            toast_type: self.toast_type,
            title: self.title.clone(),
            description: self.description.clone(),
            duration: self.duration,
            render: self.render.clone(),
        }
    }
}

impl<C> fmt::Debug for ToastPatch<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastPatch")
            .field("toast_type", &self.toast_type)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("duration", &self.duration)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_ids_are_unique() {
        let a = ToastId::auto();
        let b = ToastId::auto();
        assert_ne!(a, b);
    }

    #[test]
    fn constructors_set_correct_type() {
        assert_eq!(ToastContext::<()>::info().toast_type(), ToastType::Info);
        assert_eq!(
            ToastContext::<()>::success().toast_type(),
            ToastType::Success
        );
        assert_eq!(ToastContext::<()>::error().toast_type(), ToastType::Error);
        assert_eq!(
            ToastContext::<()>::loading().toast_type(),
            ToastType::Loading
        );
        assert_eq!(ToastContext::<()>::custom().toast_type(), ToastType::Custom);
    }

    #[test]
    fn error_and_loading_have_no_default_duration() {
        assert!(ToastType::Error.auto_dismiss_duration().is_none());
        assert!(ToastType::Loading.auto_dismiss_duration().is_none());
    }

    #[test]
    fn explicit_duration_overrides_type_default() {
        let toast = ToastContext::<()>::success().with_duration(Duration::from_secs(10));
        assert_eq!(toast.effective_duration(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn zero_duration_disables_auto_dismiss() {
        let toast = ToastContext::<()>::success().with_duration(Duration::ZERO);
        assert_eq!(toast.effective_duration(), None);
    }

    #[test]
    fn type_default_applies_when_no_duration_given() {
        let toast = ToastContext::<()>::info();
        assert_eq!(toast.effective_duration(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn builder_pattern_sets_all_fields() {
        let toast = ToastContext::<()>::error()
            .with_id("e1")
            .with_title("Failed")
            .with_description("Could not save file")
            .with_placement(Placement::TopStart)
            .with_remove_delay(Duration::from_millis(500))
            .with_pause_on_interaction(false)
            .with_dir(Direction::Rtl);

        assert_eq!(toast.id().as_str(), "e1");
        assert_eq!(toast.title(), Some("Failed"));
        assert_eq!(toast.description(), Some("Could not save file"));
        assert_eq!(toast.placement(), Placement::TopStart);
        assert_eq!(toast.remove_delay(), Duration::from_millis(500));
        assert!(!toast.pause_on_interaction());
        assert!(toast.dir().is_rtl());
    }

    #[test]
    fn patch_replaces_only_present_fields() {
        let mut toast = ToastContext::<()>::loading()
            .with_id("job")
            .with_title("Uploading");

        toast.apply(
            ToastPatch::new()
                .toast_type(ToastType::Success)
                .title("Upload complete"),
        );

        assert_eq!(toast.toast_type(), ToastType::Success);
        assert_eq!(toast.title(), Some("Upload complete"));
        assert_eq!(toast.id().as_str(), "job");
        assert_eq!(toast.description(), None);
    }

    #[test]
    fn placement_names_are_kebab_case() {
        assert_eq!(Placement::TopStart.as_str(), "top-start");
        assert_eq!(Placement::BottomEnd.as_str(), "bottom-end");
        for placement in Placement::ALL {
            assert!(!placement.as_str().is_empty());
        }
    }

    #[test]
    fn placement_serde_round_trip() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            placement: Placement,
        }

        let serialized =
            toml::to_string(&Wrapper {
                placement: Placement::TopEnd,
            })
            .expect("failed to serialize placement");
        assert!(serialized.contains("top-end"));

        let parsed: Wrapper =
            toml::from_str("placement = \"bottom-start\"").expect("failed to parse placement");
        assert_eq!(parsed.placement, Placement::BottomStart);
    }
}
