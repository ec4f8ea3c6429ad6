//! Memory-symbol behaviour through the public session surface.

use railbird::config::DebugConfig;
use railbird::engine::registry::EngineRegistry;
use railbird::engine::session::Session;
use railbird::history::NullHistory;

use crate::mock_table::FrameBuilder;

fn session_watching(watch: Vec<String>) -> Session {
    Session::new(
        EngineRegistry::standard().unwrap(),
        Box::new(NullHistory),
        DebugConfig::default(),
        watch,
    )
}

fn session() -> Session {
    session_watching(Vec::new())
}

#[test]
fn test_memory_persists_across_hands() {
    let mut session = session();
    session.process_frame(&FrameBuilder::frame("t1", 1).build());
    session.evaluate("me_st_rivers_1");

    session.process_frame(&FrameBuilder::frame("t1", 2).dealer(1).build());
    session.evaluate("me_inc_rivers");
    assert_eq!(session.evaluate("me_re_rivers"), Some(2.0));
}

#[test]
fn test_memory_clears_when_the_table_changes() {
    let mut session = session();
    session.process_frame(&FrameBuilder::frame("t1", 1).build());
    session.evaluate("me_st_rivers_4");
    assert_eq!(session.evaluate("me_re_rivers"), Some(4.0));

    session.process_frame(&FrameBuilder::frame("t2", 900).build());
    assert_eq!(session.evaluate("me_re_rivers"), Some(0.0));
}

#[test]
fn test_command_casing_is_immaterial() {
    let mut session = session();
    session.process_frame(&FrameBuilder::frame("t1", 1).build());
    session.evaluate("me_st_StackDepth_42_5");
    assert_eq!(session.evaluate("me_re_stackdepth"), Some(42.5));
    assert_eq!(session.evaluate("me_re_STACKDEPTH"), Some(42.5));
}

#[test]
fn test_rhs_resolves_sibling_providers() {
    let mut session = session();
    session.process_frame(&FrameBuilder::frame("t1", 1).board(3).build());

    session.evaluate("me_st_round_betround");
    assert_eq!(session.evaluate("me_re_round"), Some(2.0));

    session.evaluate("me_st_chairs_nchairs");
    assert_eq!(session.evaluate("me_re_chairs"), Some(6.0));
}

#[test]
fn test_unknown_rhs_stores_the_sentinel() {
    let mut session = session();
    session.process_frame(&FrameBuilder::frame("t1", 1).build());
    session.evaluate("me_st_x_nosuchsymbol");
    assert_eq!(session.evaluate("me_re_x"), Some(0.0));
}

#[test]
fn test_unrecognised_operator_resolves_to_nothing() {
    let mut session = session();
    session.process_frame(&FrameBuilder::frame("t1", 1).build());
    // Routed to the memory provider by prefix, rejected there, silently.
    assert_eq!(session.evaluate("me_store_x_1"), None);
    assert_eq!(session.evaluate("me_re_x"), Some(0.0));
}

#[test]
fn test_watch_list_drives_a_frame_counter() {
    let mut session = session_watching(vec![
        "me_inc_frames".to_string(),
        "me_re_frames".to_string(),
    ]);

    session.process_frame(&FrameBuilder::frame("t1", 1).build());
    session.process_frame(&FrameBuilder::frame("t1", 1).build());
    let report = session.process_frame(&FrameBuilder::frame("t1", 1).build());

    // The increment runs once per frame; the recall right after sees it.
    assert_eq!(report.watch[0], ("me_inc_frames".to_string(), Some(0.0)));
    assert_eq!(report.watch[1], ("me_re_frames".to_string(), Some(3.0)));
    assert_eq!(session.evaluate("me_re_frames"), Some(3.0));
}
