use std::time::{Duration, Instant};

use searchpane_core::config::Config;
use searchpane_core::contract::DisplayState;
use searchpane_core::controller::{ControllerError, SearchController};
use searchpane_core::model::{TabId, VisibilitySettings};
use searchpane_core::result_store::ResultStore;
use searchpane_core::shortcut::{FocusTarget, KeyEvent, MockKeyListenerRegistry, ShortcutOutcome};

fn mounted_controller() -> (SearchController, MockKeyListenerRegistry) {
    let registry = MockKeyListenerRegistry::default();
    let mut controller = SearchController::new(ResultStore::sample(), Box::new(registry.clone()));
    controller.mount().unwrap();
    (controller, registry)
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn rapid_keystrokes_only_commit_the_last_query() {
    let start = Instant::now();
    let (mut controller, _registry) = mounted_controller();

    let mut committed = Vec::new();
    for (offset, text) in [(0, "d"), (120, "dr"), (250, "dri"), (400, "drib")] {
        let at = start + ms(offset);
        if let Some(snapshot) = controller.poll(at) {
            committed.push(snapshot.committed_query);
        }
        controller.on_query_input(text, at).unwrap();
        assert!(controller.session().is_loading);
    }

    assert!(controller.poll(start + ms(1_150)).is_none());
    let snapshot = controller.poll(start + ms(1_200)).unwrap();
    committed.push(snapshot.committed_query.clone());

    assert_eq!(committed, vec!["drib".to_string()]);
    assert!(!snapshot.is_loading);
    assert!(controller.poll(start + ms(5_000)).is_none());
}

#[test]
fn keystroke_after_deadline_keeps_overdue_commit() {
    let start = Instant::now();
    let (mut controller, _registry) = mounted_controller();

    controller.on_query_input("dri", start).unwrap();
    let snapshot = controller.on_query_input("drib", start + ms(900)).unwrap().unwrap();

    assert_eq!(snapshot.committed_query, "dri");
    assert_eq!(snapshot.raw_query, "drib");
    assert!(snapshot.is_loading);
    assert_eq!(snapshot.display, DisplayState::Loading);
    assert_eq!(controller.next_deadline(), Some(start + ms(1_700)));
}

#[test]
fn clearing_is_synchronous_even_with_pending_commit() {
    let start = Instant::now();
    let (mut controller, _registry) = mounted_controller();

    controller.on_query_input("dri", start).unwrap();
    controller.poll(start + ms(800)).unwrap();
    controller.on_query_input("dribbble", start + ms(900)).unwrap();

    let cleared = controller.on_query_input("   ", start + ms(950)).unwrap().unwrap();
    assert!(!cleared.is_loading);
    assert_eq!(cleared.committed_query, "");
    assert_eq!(cleared.display, DisplayState::Collapsed);
    assert_eq!(cleared.visible_results.len(), 6);

    assert!(controller.poll(start + ms(5_000)).is_none());
    assert_eq!(controller.session().committed_query, "");
}

#[test]
fn clear_event_matches_empty_input() {
    let start = Instant::now();
    let (mut controller, _registry) = mounted_controller();
    controller.on_query_input("video", start).unwrap();

    let cleared = controller.on_clear(start + ms(10)).unwrap().unwrap();

    assert_eq!(cleared.raw_query, "");
    assert!(!cleared.is_loading);
    assert_eq!(controller.next_deadline(), None);
}

#[test]
fn loading_tracks_pending_commit_exactly() {
    let start = Instant::now();
    let (mut controller, _registry) = mounted_controller();
    assert!(!controller.session().is_loading);

    controller.on_query_input("a", start).unwrap();
    assert!(controller.session().is_loading);
    assert_eq!(controller.next_deadline(), Some(start + ms(800)));

    controller.poll(start + ms(800)).unwrap();
    assert!(!controller.session().is_loading);
    assert_eq!(controller.next_deadline(), None);
}

#[test]
fn disabling_active_tab_resets_in_same_snapshot() {
    let (mut controller, _registry) = mounted_controller();
    controller.on_tab_select("people").unwrap().unwrap();

    let next = VisibilitySettings {
        people: false,
        ..controller.settings()
    };
    let snapshot = controller.on_visibility_change(next).unwrap().unwrap();

    assert_eq!(snapshot.active_tab_id, TabId::All);
    assert!(!snapshot.settings.people);
    let people = snapshot.tabs.iter().find(|tab| tab.id == TabId::People).unwrap();
    assert!(!people.enabled);
    assert_eq!(controller.session().active_tab_id, TabId::All);
}

#[test]
fn toggling_inactive_tab_keeps_active_tab() {
    let (mut controller, _registry) = mounted_controller();
    controller.on_tab_select("files").unwrap();

    let snapshot = controller.on_toggle_visibility("people").unwrap().unwrap();
    assert_eq!(snapshot.active_tab_id, TabId::Files);

    let snapshot = controller.on_toggle_visibility("chats").unwrap().unwrap();
    assert_eq!(snapshot.active_tab_id, TabId::Files);
    assert!(snapshot.settings.chats);
}

#[test]
fn selecting_disabled_tab_is_a_silent_no_op() {
    let (mut controller, _registry) = mounted_controller();
    controller.on_tab_select("files").unwrap();

    assert!(controller.on_tab_select("chats").unwrap().is_none());
    assert_eq!(controller.session().active_tab_id, TabId::Files);
}

#[test]
fn unknown_tab_is_a_typed_error() {
    let (mut controller, _registry) = mounted_controller();
    assert!(matches!(
        controller.on_tab_select("messages"),
        Err(ControllerError::UnknownTab(_))
    ));
    assert!(matches!(
        controller.on_toggle_visibility("messages"),
        Err(ControllerError::UnknownTab(_))
    ));
}

#[test]
fn toggling_all_changes_nothing() {
    let (mut controller, _registry) = mounted_controller();
    assert!(controller.on_toggle_visibility("all").unwrap().is_none());
}

#[test]
fn people_tab_scenario_reports_zero_matches() {
    let start = Instant::now();
    let (mut controller, _registry) = mounted_controller();
    controller.on_query_input("dri", start).unwrap();
    controller.poll(start + ms(800)).unwrap();

    let snapshot = controller.on_tab_select("people").unwrap().unwrap();

    let people: Vec<&str> = snapshot.visible_results.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(people, vec!["Caroline Dribsson"]);
    let files = snapshot.tabs.iter().find(|tab| tab.id == TabId::Files).unwrap();
    assert_eq!(files.matched_count, 3);
    let chats = snapshot.tabs.iter().find(|tab| tab.id == TabId::Chats).unwrap();
    assert_eq!(chats.matched_count, 0);
}

#[test]
fn mount_registers_exactly_once() {
    let (mut controller, registry) = mounted_controller();
    controller.mount().unwrap();
    controller.mount().unwrap();

    assert_eq!(registry.subscribe_calls(), 1);
    assert!(registry.is_listening('s'));
    assert!(controller.is_mounted());
}

#[test]
fn dispose_releases_listener_and_cancels_commit() {
    let start = Instant::now();
    let (mut controller, registry) = mounted_controller();
    controller.on_query_input("javier", start).unwrap();
    let before = controller.session();

    controller.dispose();

    assert_eq!(registry.unsubscribe_calls(), 1);
    assert!(!registry.is_listening('s'));
    assert!(controller.poll(start + ms(10_000)).is_none());
    assert_eq!(controller.next_deadline(), None);
    assert_eq!(controller.session().committed_query, before.committed_query);
    assert_eq!(controller.session().committed_query, "");
}

#[test]
fn disposed_controller_rejects_every_entry_point() {
    let now = Instant::now();
    let (mut controller, registry) = mounted_controller();
    controller.dispose();
    let frozen = controller.session();
    let frozen_settings = controller.settings();

    assert!(matches!(controller.on_query_input("x", now), Err(ControllerError::Disposed)));
    assert!(matches!(controller.on_tab_select("files"), Err(ControllerError::Disposed)));
    assert!(matches!(
        controller.on_visibility_change(VisibilitySettings::default().toggled(TabId::Lists)),
        Err(ControllerError::Disposed)
    ));
    assert!(matches!(
        controller.on_key(&KeyEvent::plain("s"), FocusTarget::Document),
        Err(ControllerError::Disposed)
    ));
    assert!(matches!(controller.mount(), Err(ControllerError::Disposed)));

    assert_eq!(controller.session(), frozen);
    assert_eq!(controller.settings(), frozen_settings);
    assert_eq!(registry.subscribe_calls(), 1);

    controller.dispose();
    assert_eq!(registry.unsubscribe_calls(), 1);
}

#[test]
fn drop_releases_listener() {
    let registry = MockKeyListenerRegistry::default();
    {
        let mut controller =
            SearchController::new(ResultStore::sample(), Box::new(registry.clone()));
        controller.mount().unwrap();
        assert!(registry.is_listening('s'));
    }
    assert!(!registry.is_listening('s'));
    assert_eq!(registry.unsubscribe_calls(), 1);
}

#[test]
fn shortcut_only_fires_while_mounted() {
    let registry = MockKeyListenerRegistry::default();
    let mut controller = SearchController::new(ResultStore::sample(), Box::new(registry));
    let event = KeyEvent::plain("s");

    assert_eq!(
        controller.on_key(&event, FocusTarget::Document).unwrap(),
        ShortcutOutcome::Propagate
    );

    controller.mount().unwrap();
    assert_eq!(
        controller.on_key(&event, FocusTarget::Document).unwrap(),
        ShortcutOutcome::FocusSearch
    );
    assert_eq!(
        controller.on_key(&event, FocusTarget::TextInput).unwrap(),
        ShortcutOutcome::Propagate
    );
}

#[test]
fn config_drives_delay_key_and_default_tabs() {
    let start = Instant::now();
    let config = Config {
        debounce_ms: 200,
        shortcut_key: "/".to_string(),
        default_visibility: VisibilitySettings {
            files: true,
            people: false,
            chats: true,
            lists: false,
        },
        ..Default::default()
    };
    let registry = MockKeyListenerRegistry::default();
    let mut controller =
        SearchController::from_config(&config, ResultStore::sample(), Box::new(registry.clone()))
            .unwrap();
    controller.mount().unwrap();

    assert!(registry.is_listening('/'));
    assert_eq!(
        controller.on_key(&KeyEvent::plain("/"), FocusTarget::Document).unwrap(),
        ShortcutOutcome::FocusSearch
    );

    controller.on_query_input("folder", start).unwrap();
    let snapshot = controller.poll(start + ms(200)).unwrap();
    assert_eq!(snapshot.committed_query, "folder");

    assert!(controller.on_tab_select("people").unwrap().is_none());
    assert!(controller.on_tab_select("chats").unwrap().is_some());
}

#[test]
fn invalid_config_is_rejected() {
    let config = Config {
        debounce_ms: 0,
        ..Default::default()
    };
    let result = SearchController::from_config(
        &config,
        ResultStore::sample(),
        Box::new(MockKeyListenerRegistry::default()),
    );
    assert!(matches!(result, Err(ControllerError::Config(_))));
}
