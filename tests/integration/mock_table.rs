//! Shared fixtures: a fluent frame builder and a recording history sink.

use std::sync::{Arc, Mutex};

use railbird::history::HandHistory;
use railbird::types::{Seat, TableState};

// ---------------------------------------------------------------------------
// Frame builder
// ---------------------------------------------------------------------------

/// Builds table snapshots for feeding into a session: six chairs, dealer
/// at chair 0, blinds 1/2 unless overridden.
pub struct FrameBuilder {
    table: TableState,
}

impl FrameBuilder {
    pub fn frame(table_id: &str, hand_no: u64) -> Self {
        Self {
            table: TableState {
                table_id: table_id.to_string(),
                hand_no: Some(hand_no),
                dealer: 0,
                seats: vec![Seat::default(); 6],
                board_cards: 0,
                sblind: 1.0,
                bblind: 2.0,
                ante: 0.0,
                hero_to_act: false,
            },
        }
    }

    pub fn dealer(mut self, chair: usize) -> Self {
        self.table.dealer = chair;
        self
    }

    pub fn board(mut self, cards: u8) -> Self {
        self.table.board_cards = cards;
        self
    }

    pub fn hero_to_act(mut self) -> Self {
        self.table.hero_to_act = true;
        self
    }

    /// Seat a player holding cards with the given wager in front.
    pub fn wager(mut self, chair: usize, amount: f64) -> Self {
        self.table.seats[chair] = Seat::dealt_with_wager(amount, 100.0);
        self
    }

    /// Seat a player holding cards with nothing wagered yet.
    pub fn dealt(mut self, chair: usize) -> Self {
        self.table.seats[chair] = Seat::dealt_with_wager(0.0, 100.0);
        self
    }

    pub fn build(self) -> TableState {
        self.table
    }
}

// ---------------------------------------------------------------------------
// Recording history sink
// ---------------------------------------------------------------------------

/// Everything a session reported to its hand-history sink, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Posting {
    Hand(Option<u64>),
    SmallBlind(usize),
    BigBlind(usize),
    Ante(usize),
}

/// Clone-able sink: hand a clone to the session, keep one to inspect.
#[derive(Clone, Default)]
pub struct RecordingHistory {
    postings: Arc<Mutex<Vec<Posting>>>,
}

impl RecordingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn postings(&self) -> Vec<Posting> {
        self.postings.lock().unwrap().clone()
    }

    fn push(&self, posting: Posting) {
        self.postings.lock().unwrap().push(posting);
    }
}

impl HandHistory for RecordingHistory {
    fn begin_hand(&self, hand_no: Option<u64>) {
        self.push(Posting::Hand(hand_no));
    }

    fn posts_small_blind(&self, chair: usize) {
        self.push(Posting::SmallBlind(chair));
    }

    fn posts_big_blind(&self, chair: usize) {
        self.push(Posting::BigBlind(chair));
    }

    fn posts_ante(&self, chair: usize) {
        self.push(Posting::Ante(chair));
    }
}

// ---------------------------------------------------------------------------
// Fixture sanity
// ---------------------------------------------------------------------------

#[test]
fn test_frame_builder_defaults() {
    let table = FrameBuilder::frame("t1", 3).wager(1, 1.0).dealt(4).build();
    assert_eq!(table.table_id, "t1");
    assert_eq!(table.hand_no, Some(3));
    assert_eq!(table.seat_count(), 6);
    assert!((table.wager(1) - 1.0).abs() < 1e-10);
    assert!(table.seats[4].dealt);
    assert_eq!(table.wager(4), 0.0);
}

#[test]
fn test_recording_history_keeps_order() {
    let recorder = RecordingHistory::new();
    let observer = recorder.clone();
    recorder.begin_hand(Some(1));
    recorder.posts_small_blind(1);
    recorder.posts_big_blind(2);
    assert_eq!(
        observer.postings(),
        vec![
            Posting::Hand(Some(1)),
            Posting::SmallBlind(1),
            Posting::BigBlind(2),
        ]
    );
}
