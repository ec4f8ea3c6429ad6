//! Boundary detection and blind classification through a full session.

use std::io::Write;
use uuid::Uuid;

use railbird::config::{DebugConfig, TableConfig};
use railbird::engine::registry::EngineRegistry;
use railbird::engine::session::Session;
use railbird::table::replay::ReplaySource;
use railbird::table::FrameSource;

use crate::mock_table::{FrameBuilder, Posting, RecordingHistory};

fn session_with(recorder: &RecordingHistory) -> Session {
    Session::new(
        EngineRegistry::standard().unwrap(),
        Box::new(recorder.clone()),
        DebugConfig::default(),
        Vec::new(),
    )
}

#[test]
fn test_standard_hand_classifies_blinds_and_ante() {
    let recorder = RecordingHistory::new();
    let mut session = session_with(&recorder);

    let table = FrameBuilder::frame("t1", 1)
        .wager(1, 1.0)
        .wager(2, 2.0)
        .dealt(3)
        .wager(4, 1.0)
        .dealt(5)
        .build();
    session.process_frame(&table);

    assert_eq!(
        recorder.postings(),
        vec![
            Posting::Hand(Some(1)),
            Posting::SmallBlind(1),
            Posting::BigBlind(2),
            Posting::Ante(4),
        ]
    );
}

#[test]
fn test_classification_happens_once_per_hand() {
    let recorder = RecordingHistory::new();
    let mut session = session_with(&recorder);

    let table = FrameBuilder::frame("t1", 1)
        .wager(1, 1.0)
        .wager(2, 2.0)
        .build();
    session.process_frame(&table);
    session.process_frame(&table);
    session.process_frame(&table);

    assert_eq!(
        recorder.postings(),
        vec![
            Posting::Hand(Some(1)),
            Posting::SmallBlind(1),
            Posting::BigBlind(2),
        ]
    );
}

#[test]
fn test_mid_hand_join_yields_no_classifications() {
    let recorder = RecordingHistory::new();
    let mut session = session_with(&recorder);

    // First frame we ever see is already on the flop with live wagers.
    let table = FrameBuilder::frame("t1", 7)
        .board(3)
        .wager(1, 4.0)
        .wager(2, 4.0)
        .build();
    session.process_frame(&table);

    assert_eq!(recorder.postings(), vec![Posting::Hand(Some(7))]);
}

#[test]
fn test_lone_large_wager_reads_as_big_blind() {
    let recorder = RecordingHistory::new();
    let mut session = session_with(&recorder);

    let table = FrameBuilder::frame("t1", 1).wager(3, 5.0).build();
    session.process_frame(&table);

    assert_eq!(
        recorder.postings(),
        vec![Posting::Hand(Some(1)), Posting::BigBlind(3)]
    );
}

#[test]
fn test_detector_waits_for_the_deal() {
    let recorder = RecordingHistory::new();
    let mut session = session_with(&recorder);

    // Frame before any cards are out: nothing to classify yet.
    session.process_frame(&FrameBuilder::frame("t1", 1).build());
    assert_eq!(recorder.postings(), vec![Posting::Hand(Some(1))]);

    // Cards arrive a frame later, same hand: scan fires now.
    let dealt = FrameBuilder::frame("t1", 1)
        .wager(1, 1.0)
        .wager(2, 2.0)
        .build();
    session.process_frame(&dealt);
    assert_eq!(
        recorder.postings(),
        vec![
            Posting::Hand(Some(1)),
            Posting::SmallBlind(1),
            Posting::BigBlind(2),
        ]
    );
}

#[test]
fn test_consecutive_hands_rearm_the_detector() {
    let recorder = RecordingHistory::new();
    let mut session = session_with(&recorder);

    session.process_frame(
        &FrameBuilder::frame("t1", 1)
            .wager(1, 1.0)
            .wager(2, 2.0)
            .build(),
    );
    session.process_frame(
        &FrameBuilder::frame("t1", 2)
            .dealer(1)
            .wager(2, 1.0)
            .wager(3, 2.0)
            .build(),
    );

    assert_eq!(
        recorder.postings(),
        vec![
            Posting::Hand(Some(1)),
            Posting::SmallBlind(1),
            Posting::BigBlind(2),
            Posting::Hand(Some(2)),
            Posting::SmallBlind(2),
            Posting::BigBlind(3),
        ]
    );
}

#[test]
fn test_scan_wraps_around_the_button() {
    let recorder = RecordingHistory::new();
    let mut session = session_with(&recorder);

    let table = FrameBuilder::frame("t1", 1)
        .dealer(4)
        .wager(5, 1.0)
        .wager(0, 2.0)
        .build();
    session.process_frame(&table);

    assert_eq!(
        recorder.postings(),
        vec![
            Posting::Hand(Some(1)),
            Posting::SmallBlind(5),
            Posting::BigBlind(0),
        ]
    );
}

#[tokio::test]
async fn test_replayed_sitting_end_to_end() {
    let frames = [
        FrameBuilder::frame("t1", 1)
            .wager(1, 1.0)
            .wager(2, 2.0)
            .build(),
        FrameBuilder::frame("t1", 1)
            .board(3)
            .dealt(1)
            .dealt(2)
            .build(),
        FrameBuilder::frame("t1", 2)
            .dealer(1)
            .wager(2, 1.0)
            .wager(3, 2.0)
            .build(),
    ];
    let path = std::env::temp_dir().join(format!("railbird-e2e-{}.jsonl", Uuid::new_v4()));
    let mut file = std::fs::File::create(&path).unwrap();
    for frame in &frames {
        writeln!(file, "{}", serde_json::to_string(frame).unwrap()).unwrap();
    }
    drop(file);

    let recorder = RecordingHistory::new();
    let mut session = session_with(&recorder);
    let mut source = ReplaySource::from_file(&path, TableConfig::default()).unwrap();
    while let Some(frame) = source.next_frame().await.unwrap() {
        session.process_frame(&frame);
    }

    assert_eq!(session.frames(), 3);
    assert_eq!(session.hands(), 2);
    assert_eq!(session.connections(), 1);
    assert_eq!(
        recorder.postings(),
        vec![
            Posting::Hand(Some(1)),
            Posting::SmallBlind(1),
            Posting::BigBlind(2),
            Posting::Hand(Some(2)),
            Posting::SmallBlind(2),
            Posting::BigBlind(3),
        ]
    );
    std::fs::remove_file(&path).ok();
}
