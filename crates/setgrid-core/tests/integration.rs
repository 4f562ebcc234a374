//! Integration tests for setgrid-core.
//!
//! These drive the public API the way a host frame loop would.

use setgrid_core::{
    AnimationConfig, AnimationDriver, BoardAction, BoardState, CardId, CardOrientation,
    CardUniverse, CardVisualState, DispatchContext, DisplaySettings, FileSettings, InputConfig,
    InputDispatcher, Key, KeyEvent, KeyboardLayoutId, KeyboardLayoutTable, LayoutOrientation,
    MemorySettings, Modifiers, Point, SettingsStore, SoundCue, VisualMap,
};

const FRAME: f64 = 1.0 / 60.0;

fn deck(count: u32) -> Vec<CardId> {
    (0..count).map(CardId).collect()
}

// =============================================================================
// Input Integration Tests
// =============================================================================

#[test]
fn test_keyboard_session_round_trip() {
    let mut store = MemorySettings::new();
    store.set("keyboardLayout", "QWERTZ").unwrap();
    store.set("volume", "off").unwrap();

    let mut dispatcher = InputDispatcher::new(InputConfig::from_settings(&store).unwrap());
    let board = BoardState::new(deck(81), 12).board();
    let ctx = DispatchContext::new(&board, LayoutOrientation::Portrait);

    // Not yet listening.
    assert_eq!(dispatcher.handle_key(&KeyEvent::char('1'), &ctx).action, None);

    dispatcher.subscribe();
    // 'y' is slot 9 on QWERTZ portrait.
    let outcome = dispatcher.handle_key(&KeyEvent::char('y'), &ctx);
    assert_eq!(outcome.action, Some(BoardAction::SelectCard(CardId(9))));
    assert!(outcome.prevent_default);

    let toggle = dispatcher.handle_key(&KeyEvent::char('ö'), &ctx);
    assert_eq!(toggle.action, Some(BoardAction::ToggleCardOrientation));
    assert_eq!(toggle.sound, None, "volume is off");

    dispatcher.unsubscribe();
    assert!(!dispatcher.handle_key(&KeyEvent::char('y'), &ctx).prevent_default);
}

#[test]
fn test_chain_prefix_occupies_first_shortcuts() {
    let mut dispatcher = InputDispatcher::new(InputConfig::new(KeyboardLayoutId::Qwerty, true));
    dispatcher.subscribe();

    let state = BoardState::new(deck(81), 9).with_chain(vec![CardId(100), CardId(101), CardId(102)]);
    let board = state.board();
    let ctx = DispatchContext::new(&board, LayoutOrientation::Portrait);

    let first = dispatcher.handle_key(&KeyEvent::char('1'), &ctx);
    assert_eq!(first.action, Some(BoardAction::SelectCard(CardId(100))));
    let fourth = dispatcher.handle_key(&KeyEvent::char('q'), &ctx);
    assert_eq!(fourth.action, Some(BoardAction::SelectCard(CardId(0))));
}

#[test]
fn test_toggle_feeds_persisted_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");

    let mut dispatcher = InputDispatcher::new(InputConfig::default());
    dispatcher.subscribe();
    let board = BoardState::new(deck(81), 12).board();

    let mut store = FileSettings::open(&path).unwrap();
    let mut display = DisplaySettings::load(&store);
    let ctx = DispatchContext::new(&board, display.layout);

    let outcome = dispatcher.handle_key(&KeyEvent::char('\''), &ctx);
    assert_eq!(outcome.sound, Some(SoundCue::LayoutChange));
    let action = outcome.action.unwrap();
    assert!(display.apply_and_save(action, &mut store).unwrap());

    let reloaded = DisplaySettings::load(&FileSettings::open(&path).unwrap());
    assert_eq!(reloaded.layout, LayoutOrientation::Landscape);
    assert_eq!(reloaded.card, CardOrientation::Vertical);
}

#[test]
fn test_modified_keys_pass_through() {
    let mut dispatcher = InputDispatcher::new(InputConfig::default());
    dispatcher.subscribe();
    let board = BoardState::new(deck(81), 12).board();
    let ctx = DispatchContext::new(&board, LayoutOrientation::Portrait);

    for modifiers in [Modifiers::CTRL, Modifiers::ALT, Modifiers::META, Modifiers::SHIFT] {
        let outcome = dispatcher.handle_key(&KeyEvent::new(Key::Char('q'), modifiers), &ctx);
        assert_eq!(outcome.action, None);
        assert!(!outcome.prevent_default);
    }
}

#[test]
fn test_escape_with_modifier_keeps_selection() {
    let mut dispatcher = InputDispatcher::new(InputConfig::default());
    dispatcher.subscribe();
    let board = BoardState::new(deck(81), 12).board();
    let ctx = DispatchContext::new(&board, LayoutOrientation::Landscape);

    let outcome = dispatcher.handle_key(&KeyEvent::new(Key::Escape, Modifiers::SHIFT), &ctx);
    assert_eq!(outcome.action, None);
    assert!(!outcome.prevent_default);
}

#[test]
fn test_custom_layout_table_from_yaml() {
    let yaml = r"
layouts:
  numpad:
    portrait: '789456123'
    landscape: '741852963'
    orientation_key: '+'
    layout_key: '-'
";
    let mut table = KeyboardLayoutTable::standard();
    table.merge(KeyboardLayoutTable::from_yaml_str(yaml).unwrap());

    let layout = table.get("numpad").unwrap().clone();
    let mut dispatcher = InputDispatcher::new(InputConfig {
        keyboard_layout: layout,
        sound: true,
    });
    dispatcher.subscribe();
    let board = BoardState::new(deck(81), 9).board();
    let ctx = DispatchContext::new(&board, LayoutOrientation::Portrait);
    let outcome = dispatcher.handle_key(&KeyEvent::char('1'), &ctx);
    assert_eq!(outcome.action, Some(BoardAction::SelectCard(CardId(6))));
    assert!(table.get("QWERTY").is_ok());
}

// =============================================================================
// Board State Integration Tests
// =============================================================================

#[test]
fn test_board_partitions_are_validated() {
    let universe = CardUniverse::sequential(81);
    let good = BoardState::new(deck(81), 12);
    assert!(good.validate(&universe).is_ok());

    let mut dup = deck(20);
    dup.push(CardId(3));
    assert!(BoardState::new(dup, 12).validate(&universe).is_err());
}

// =============================================================================
// Animation Integration Tests
// =============================================================================

fn slot(x: f32, y: f32) -> CardVisualState {
    CardVisualState::on_board(Point::new(x, y), false, false)
}

#[test]
fn test_deal_then_retire_animation() {
    let mut driver = AnimationDriver::new(AnimationConfig::default());

    // Card 1 waits off to the right, card 0 is on the board.
    let mut targets: VisualMap = VisualMap::new();
    targets.insert(CardId(0), slot(8.0, 8.0));
    targets.insert(CardId(1), CardVisualState::off_board(Point::new(200.0, 65.0)));
    driver.set_targets(&targets, 0.0);
    assert!(!driver.is_animating());

    // Deal card 1, retire card 0 to the left.
    targets.insert(CardId(0), CardVisualState::off_board(Point::new(-61.0, 65.0)));
    targets.insert(CardId(1), slot(8.0, 8.0));
    driver.set_targets(&targets, 0.0);
    assert_eq!(driver.active_count(), 2);

    let mut previous = driver.render_states();
    for _ in 0..300 {
        let current = driver.tick(FRAME);
        for (before, after) in previous.iter().zip(&current) {
            assert_eq!(before.card, after.card);
            let dx = after.position.x - before.position.x;
            let dy = after.position.y - before.position.y;
            assert!(dx.hypot(dy) < 40.0);
        }
        previous = current;
    }

    assert!(!driver.is_animating());
    let retired = driver.get(CardId(0)).unwrap();
    assert!(!retired.visible && !retired.interactive);
    let dealt = driver.get(CardId(1)).unwrap();
    assert!(dealt.visible && dealt.interactive);
    assert_eq!(dealt.position, Point::new(8.0, 8.0));
}
