// SPDX-License-Identifier: MPL-2.0
//! End-to-end lifecycle scenarios across the manager, machines,
//! bindings, formatter cache and configuration.
//!
//! Every timed scenario is driven with explicit `Instant`s, so no test
//! sleeps or depends on wall-clock timing.

use lens_notify::config::{self, NotificationConfig};
use lens_notify::diagnostics::{DiagnosticsHandle, LifecycleKind};
use lens_notify::i18n::{NumberFormatCache, NumberFormatOptions};
use lens_notify::toast::{
    Placement, PlacementChange, StackingOrder, ToastBindings, ToastContext, ToastId, ToastManager,
    ToastPatch, ToastState,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tempfile::tempdir;

const MS: Duration = Duration::from_millis(1);

fn bindings_for(manager: &ToastManager, id: &ToastId) -> ToastBindings {
    ToastBindings::from_machine(manager.machine(id).expect("toast should be registered"))
}

#[test]
fn timed_toast_dismisses_then_leaves_the_registry() {
    let t0 = Instant::now();
    let mut manager: ToastManager = ToastManager::new();

    let id = manager
        .add_at(
            ToastContext::info()
                .with_id("t1")
                .with_duration(Duration::from_millis(3000))
                .with_remove_delay(Duration::from_millis(300)),
            t0,
        )
        .expect("add should succeed");

    // Countdown running: still visible shortly before expiry
    manager.tick_at(t0 + 2999 * MS);
    assert!(bindings_for(&manager, &id).is_visible);

    // At t=3000 the toast starts dismissing but is still rendered
    manager.tick_at(t0 + 3000 * MS);
    let machine = manager.machine(&id).expect("dismissing toast is kept");
    assert_eq!(machine.state(), ToastState::Dismissing);
    let bindings = ToastBindings::from_machine(machine);
    assert!(!bindings.is_visible);
    assert!(!bindings.root.data_open);

    // Not a millisecond before the grace period elapses...
    manager.tick_at(t0 + 3299 * MS);
    assert!(manager.machine(&id).is_some());

    // ...and gone at t=3300
    manager.tick_at(t0 + 3300 * MS);
    assert!(manager.machine(&id).is_none());
    assert!(manager.is_empty());
}

#[test]
fn interaction_pause_suspends_and_resumes_the_countdown() {
    let t0 = Instant::now();
    let mut manager: ToastManager = ToastManager::new();

    let id = manager
        .add_at(
            ToastContext::info()
                .with_id("t2")
                .with_duration(Duration::from_millis(2000))
                .with_pause_on_interaction(true),
            t0,
        )
        .expect("add should succeed");

    // Focus enters: the binding layer translates it into a pause
    let focus_event = bindings_for(&manager, &id)
        .on_focus()
        .expect("pause_on_interaction toast should pause on focus");
    manager.send_at(&id, focus_event, t0 + 500 * MS);
    assert!(bindings_for(&manager, &id).is_paused);

    // The countdown is suspended well past the original deadline
    manager.tick_at(t0 + 10_000 * MS);
    assert!(bindings_for(&manager, &id).is_visible);

    // Blur resumes with the remaining 1500ms only
    let blur_event = bindings_for(&manager, &id)
        .on_blur()
        .expect("pause_on_interaction toast should resume on blur");
    manager.send_at(&id, blur_event, t0 + 10_000 * MS);
    assert!(!bindings_for(&manager, &id).is_paused);

    manager.tick_at(t0 + 11_499 * MS);
    assert!(bindings_for(&manager, &id).is_visible);
    manager.tick_at(t0 + 11_500 * MS);
    assert_eq!(
        manager.machine(&id).expect("still registered").state(),
        ToastState::Dismissing
    );
}

#[test]
fn pause_resume_round_trip_preserves_total_duration() {
    let t0 = Instant::now();
    let mut manager: ToastManager = ToastManager::new();
    let id = manager
        .add_at(
            ToastContext::info()
                .with_id("t")
                .with_duration(Duration::from_millis(3000)),
            t0,
        )
        .expect("add should succeed");

    let mid = t0 + 1500 * MS;
    let pause = bindings_for(&manager, &id).pause();
    manager.send_at(&id, pause, mid);
    let resume = bindings_for(&manager, &id).resume();
    manager.send_at(&id, resume, mid);

    // No inflation: expiry still lands at the original t=3000
    manager.tick_at(t0 + 2999 * MS);
    assert!(bindings_for(&manager, &id).is_visible);
    manager.tick_at(t0 + 3000 * MS);
    assert!(!bindings_for(&manager, &id).is_visible);
}

#[test]
fn dismissing_twice_equals_dismissing_once() {
    let t0 = Instant::now();
    let mut manager: ToastManager = ToastManager::new();
    let id = manager
        .add_at(
            ToastContext::error()
                .with_id("e")
                .with_remove_delay(Duration::from_millis(300)),
            t0,
        )
        .expect("add should succeed");

    manager.dismiss_at(&id, t0 + 100 * MS);
    // Second dismissal must not reschedule the pending removal
    manager.dismiss_at(&id, t0 + 350 * MS);

    manager.tick_at(t0 + 399 * MS);
    assert!(manager.machine(&id).is_some());
    manager.tick_at(t0 + 400 * MS);
    assert!(manager.machine(&id).is_none());
}

#[test]
fn update_restarts_the_countdown_in_full() {
    let t0 = Instant::now();
    let mut manager: ToastManager = ToastManager::new();
    let id = manager
        .add_at(
            ToastContext::loading()
                .with_id("job")
                .with_title("Uploading")
                .with_duration(Duration::from_millis(5000)),
            t0,
        )
        .expect("add should succeed");

    manager
        .update_at(
            &id,
            ToastPatch::new()
                .title("Upload complete")
                .duration(Duration::from_millis(5000)),
            t0 + 4000 * MS,
        )
        .expect("update should find the toast");

    let bindings = bindings_for(&manager, &id);
    assert!(bindings.is_updating);
    assert_eq!(bindings.title.as_deref(), Some("Upload complete"));

    // A further 5000ms, not the leftover 1000ms
    manager.tick_at(t0 + 6000 * MS);
    assert!(bindings_for(&manager, &id).is_visible);
    manager.tick_at(t0 + 9000 * MS);
    assert!(!bindings_for(&manager, &id).is_visible);
}

#[test]
fn placement_order_is_stable_across_removals() {
    let t0 = Instant::now();
    let mut manager: ToastManager = ToastManager::new();
    for (i, id) in ["a", "b", "c"].into_iter().enumerate() {
        manager
            .add_at(
                ToastContext::info()
                    .with_id(id)
                    .with_duration(Duration::ZERO)
                    .with_remove_delay(Duration::from_millis(100)),
                t0 + i as u32 * MS,
            )
            .expect("add should succeed");
    }

    let b = ToastId::from("b");
    manager.dismiss_at(&b, t0 + 10 * MS);
    manager.tick_at(t0 + 110 * MS);

    let ids = manager.ordered_ids(Placement::BottomEnd);
    assert_eq!(ids, vec![ToastId::from("c"), ToastId::from("a")]);
}

#[test]
fn escape_key_contract_dismisses_through_the_manager() {
    let t0 = Instant::now();
    let mut manager: ToastManager = ToastManager::new();
    let id = manager
        .add_at(ToastContext::info().with_id("esc"), t0)
        .expect("add should succeed");

    let outcome = bindings_for(&manager, &id)
        .on_key_down("Escape")
        .expect("escape should be consumed");
    assert!(outcome.prevent_default);
    assert!(outcome.stop_propagation);

    manager.send_at(&id, outcome.event, t0 + MS);
    assert_eq!(
        manager.machine(&id).expect("still registered").state(),
        ToastState::Dismissing
    );
}

#[test]
fn observers_track_stack_changes_per_placement() {
    let t0 = Instant::now();
    let mut manager: ToastManager = ToastManager::new();
    let seen: Rc<RefCell<Vec<PlacementChange>>> = Rc::default();
    let sink = Rc::clone(&seen);
    manager.subscribe(move |change| sink.borrow_mut().push(change.clone()));

    manager
        .add_at(
            ToastContext::info()
                .with_id("one")
                .with_duration(Duration::from_millis(100))
                .with_remove_delay(Duration::from_millis(50))
                .with_placement(Placement::TopStart),
            t0,
        )
        .expect("add should succeed");
    // First tick starts the exit, second one removes the toast
    manager.tick_at(t0 + 100 * MS);
    manager.tick_at(t0 + 150 * MS);

    let changes = seen.borrow();
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].ids, vec![ToastId::from("one")]);
    assert!(changes[1].ids.is_empty());
    assert!(changes.iter().all(|c| c.placement == Placement::TopStart));
}

#[test]
fn diagnostics_capture_the_whole_lifecycle() {
    let t0 = Instant::now();
    let mut manager: ToastManager = ToastManager::new();
    let handle = DiagnosticsHandle::new();
    manager.set_diagnostics(handle.clone());

    manager
        .add_at(
            ToastContext::info()
                .with_id("d")
                .with_duration(Duration::from_millis(100))
                .with_remove_delay(Duration::from_millis(50)),
            t0,
        )
        .expect("add should succeed");
    manager.tick_at(t0 + 100 * MS);
    manager.tick_at(t0 + 150 * MS);

    let kinds = handle.kinds();
    assert_eq!(
        kinds,
        vec![
            LifecycleKind::Added {
                id: "d".to_string(),
                placement: Placement::BottomEnd,
            },
            LifecycleKind::Expired {
                id: "d".to_string(),
            },
            LifecycleKind::Removed {
                id: "d".to_string(),
            },
        ]
    );
}

#[test]
fn manager_honors_configuration_loaded_from_disk() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("notifications.toml");

    let saved = NotificationConfig {
        max_visible: Some(1),
        stacking: StackingOrder::OldestFirst,
        ..NotificationConfig::default()
    };
    config::save_to_path(&saved, &path).expect("failed to save config");

    let loaded = config::load_from_path(&path).expect("failed to load config");
    assert_eq!(loaded, saved);

    let t0 = Instant::now();
    let mut manager: ToastManager =
        ToastManager::with_config(loaded).expect("loaded config should validate");

    manager
        .add_at(ToastContext::info().with_id("first"), t0)
        .expect("add should succeed");
    manager
        .add_at(ToastContext::info().with_id("second"), t0)
        .expect("add should succeed");

    // One visible slot; the second toast waits in the queue
    assert_eq!(
        manager.ordered_ids(Placement::BottomEnd),
        vec![ToastId::from("first")]
    );
    assert_eq!(manager.queued_count(Placement::BottomEnd), 1);
}

#[test]
fn invalid_config_file_degrades_to_defaults() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("notifications.toml");
    std::fs::write(&path, "max_visible = \"lots\"").expect("failed to write bad toml");

    let loaded = config::load_from_path(&path).expect("load should not error");
    assert_eq!(loaded, NotificationConfig::default());
}

#[test]
fn formatter_cache_reuses_instances_and_distinguishes_locales() {
    let mut cache = NumberFormatCache::new();
    let options = NumberFormatOptions::default();
    let english = "en-US".parse().expect("locale should parse");
    let german = "de-DE".parse().expect("locale should parse");

    let first = cache.formatter(&english, &options);
    let second = cache.formatter(&english, &options);
    assert!(Rc::ptr_eq(&first, &second));

    // Distinct locales get functionally distinct formatters
    assert_eq!(cache.format(1234.5, &english, &options), "1,234.5");
    assert_eq!(cache.format(1234.5, &german, &options), "1.234,5");
    assert_eq!(cache.len(), 2);
}

#[test]
fn formatted_numbers_flow_into_toast_updates() {
    let t0 = Instant::now();
    let mut cache = NumberFormatCache::new();
    let locale = "en-US".parse().expect("locale should parse");
    let percent = NumberFormatOptions::percent();

    let mut manager: ToastManager = ToastManager::new();
    let id = manager
        .add_at(ToastContext::loading().with_id("progress"), t0)
        .expect("add should succeed");

    for (i, ratio) in [0.25_f64, 0.5, 1.0].into_iter().enumerate() {
        let label = cache.format(ratio, &locale, &percent);
        manager
            .update_at(
                &id,
                ToastPatch::new().title(format!("Uploading {label}")),
                t0 + (i as u32 + 1) * MS,
            )
            .expect("update should find the toast");
    }

    assert_eq!(
        bindings_for(&manager, &id).title.as_deref(),
        Some("Uploading 100%")
    );
    // One formatter served every update
    assert_eq!(cache.len(), 1);
}
