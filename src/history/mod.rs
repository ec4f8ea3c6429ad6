//! Hand-history sink.
//!
//! Defines the `HandHistory` trait — the fire-and-forget surface the blind
//! detector reports classifications to — and a no-op implementation for
//! running without recording. The line-oriented text recorder lives in
//! `recorder`.

pub mod recorder;

#[cfg(test)]
use mockall::automock;

/// Abstraction over hand-history recording.
///
/// All calls are fire-and-forget: implementations swallow their own IO
/// errors (after logging) and never propagate failure into the engine.
#[cfg_attr(test, automock)]
pub trait HandHistory: Send {
    /// A new hand has started. `hand_no` is the site-reported hand number
    /// when the scraper could read one.
    fn begin_hand(&self, hand_no: Option<u64>) {
        let _ = hand_no;
    }

    /// The given chair posted the small blind.
    fn posts_small_blind(&self, chair: usize);

    /// The given chair posted the big blind.
    fn posts_big_blind(&self, chair: usize);

    /// The given chair posted an ante.
    fn posts_ante(&self, chair: usize);
}

/// A sink that records nothing.
pub struct NullHistory;

impl HandHistory for NullHistory {
    fn posts_small_blind(&self, _chair: usize) {}

    fn posts_big_blind(&self, _chair: usize) {}

    fn posts_ante(&self, _chair: usize) {}
}
