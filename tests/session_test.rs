//! Session tests: text input, double-click deletion, rendering, REPL

use std::io::Cursor;
use std::sync::Arc;

use rstest::{fixture, rstest};

use avlviz::application::{ClickOutcome, TreeSession};
use avlviz::cli::repl;
use avlviz::config::Settings;
use avlviz::infrastructure::{ManualClock, ServiceContainer};
use avlviz::util::testing;

struct Harness {
    session: TreeSession,
    clock: Arc<ManualClock>,
}

#[fixture]
fn harness() -> Harness {
    testing::init_test_setup();
    let clock = Arc::new(ManualClock::new());
    let container = ServiceContainer::with_deps(Settings::default(), clock.clone());
    let mut session = container.session();
    for key in ["20", "10", "30"] {
        session.insert_input(key).unwrap();
    }
    Harness { session, clock }
}

// ============================================================
// Double-click deletion
// ============================================================

#[rstest]
fn given_two_clicks_within_threshold_when_clicking_node_then_node_deleted(mut harness: Harness) {
    assert_eq!(harness.session.click(10), ClickOutcome::Pending);
    harness.clock.advance_ms(150);
    assert_eq!(harness.session.click(10), ClickOutcome::Deleted(10));

    assert_eq!(harness.session.tree().in_order(), vec![20, 30]);
    harness.session.tree().validate().unwrap();
}

#[rstest]
fn given_two_clicks_too_far_apart_when_clicking_node_then_node_kept(mut harness: Harness) {
    harness.session.click(10);
    harness.clock.advance_ms(300);
    assert_eq!(harness.session.click(10), ClickOutcome::Pending);

    assert!(harness.session.tree().contains(10));
}

#[rstest]
fn given_clicks_on_two_nodes_when_clicking_then_nothing_deleted(mut harness: Harness) {
    harness.session.click(10);
    harness.clock.advance_ms(50);
    assert_eq!(harness.session.click(30), ClickOutcome::Pending);

    assert_eq!(harness.session.tree().len(), 3);
}

#[rstest]
fn given_click_on_missing_node_when_clicking_then_ignored(mut harness: Harness) {
    assert_eq!(harness.session.click(99), ClickOutcome::Ignored);
}

#[rstest]
fn given_custom_threshold_when_clicking_then_threshold_respected() {
    let clock = Arc::new(ManualClock::new());
    let settings = Settings {
        double_click_threshold_ms: 1000,
        ..Settings::default()
    };
    let mut session = ServiceContainer::with_deps(settings, clock.clone()).session();
    session.insert(5);

    session.click(5);
    clock.advance_ms(900);
    assert_eq!(session.click(5), ClickOutcome::Deleted(5));
    assert!(session.tree().is_empty());
}

#[rstest]
fn given_root_double_clicked_when_deleting_then_tree_rebalanced(mut harness: Harness) {
    for key in ["5", "25", "35", "40"] {
        harness.session.insert_input(key).unwrap();
    }

    harness.session.click(20);
    harness.clock.advance_ms(10);
    assert_eq!(harness.session.click(20), ClickOutcome::Deleted(20));

    harness.session.tree().validate().unwrap();
    assert_eq!(harness.session.tree().in_order(), vec![5, 10, 25, 30, 35, 40]);
}

// ============================================================
// Rendering
// ============================================================

#[rstest]
fn given_session_when_rendering_then_labels_include_balance_factor(harness: Harness) {
    let rendered = harness.session.render();
    assert!(rendered.starts_with("20 (BF: 0)"));
    assert!(rendered.contains("10 (BF: 0)"));
    assert!(rendered.contains("30 (BF: 0)"));
}

#[rstest]
fn given_session_when_rendering_json_then_nested_snapshot() {
    let settings = Settings {
        pretty_json: false,
        ..Settings::default()
    };
    let mut session = ServiceContainer::new(settings).session();
    session.insert(2);
    session.insert(1);

    let json = session.render_json().unwrap();

    assert_eq!(
        json,
        r#"{"value":2,"balanceFactor":1,"children":[{"value":1,"balanceFactor":0,"children":[]}]}"#
    );
}

// ============================================================
// REPL
// ============================================================

fn run_repl(session: &mut TreeSession, script: &str) -> String {
    let mut out = Vec::new();
    repl::run(session, Cursor::new(script.as_bytes()), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[rstest]
fn given_script_when_running_repl_then_applies_commands_in_order(mut harness: Harness) {
    let out = run_repl(
        &mut harness.session,
        "insert 40\ninsert 40\nfind 40\nfind 41\ndelete 41\nshow\nquit\ninsert 50\n",
    );

    assert!(out.contains("40 already present"));
    assert!(out.contains("40 found"));
    assert!(out.contains("41 not found"));
    // quit stops before the last line
    assert!(!harness.session.tree().contains(50));
    assert_eq!(harness.session.tree().in_order(), vec![10, 20, 30, 40]);
}

#[rstest]
fn given_double_click_lines_when_running_repl_then_node_deleted(mut harness: Harness) {
    // the manual clock stands still, so both clicks fall inside the window
    let out = run_repl(&mut harness.session, "click 30\nclick 30\n");

    assert!(out.contains("click 30 again to delete it"));
    assert!(out.contains("deleted 30"));
    assert!(!harness.session.tree().contains(30));
}

#[rstest]
fn given_bad_input_when_running_repl_then_reports_and_continues(mut harness: Harness) {
    let out = run_repl(&mut harness.session, "insert abc\nfrobnicate\ninsert 1\n");

    assert!(out.contains("error: invalid key \"abc\": not a number"));
    assert!(out.contains("unknown command"));
    assert!(harness.session.tree().contains(1));
}

#[rstest]
fn given_clear_when_running_repl_then_tree_emptied(mut harness: Harness) {
    let out = run_repl(&mut harness.session, "clear\nshow\njson\n");

    assert!(out.contains("cleared"));
    assert!(out.contains("Empty"));
    assert!(out.contains("\"Empty\""));
    assert!(harness.session.tree().is_empty());
}
