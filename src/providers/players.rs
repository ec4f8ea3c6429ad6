//! Player-count bookkeeping.
//!
//! Maintains three chair bitmasks per frame: who is seated, who currently
//! holds cards, and who has held cards at any point this hand. The last
//! mask only accumulates — a player who folds drops out of `playing` but
//! stays in `dealt` until the next hand — which is what lets downstream
//! consumers tell "cards are out" from "nobody dealt yet".

use tracing::trace;

use super::{Evaluation, SymbolContext, SymbolProvider, SymbolScope};

pub struct ActivePlayers {
    seated: u64,
    playing: u64,
    dealt: u64,
}

impl ActivePlayers {
    pub fn new() -> Self {
        Self {
            seated: 0,
            playing: 0,
            dealt: 0,
        }
    }

    /// Chairs dealt into the current hand, as a bitmask.
    pub fn dealt_mask(&self) -> u64 {
        self.dealt
    }
}

impl Default for ActivePlayers {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolProvider for ActivePlayers {
    fn name(&self) -> &'static str {
        "players"
    }

    fn symbols(&self) -> &'static [&'static str] {
        &[
            "nplayersseated",
            "nplayersplaying",
            "nplayersdealt",
            "playersdealtbits",
        ]
    }

    fn on_hand_reset(&mut self) {
        self.dealt = 0;
    }

    fn on_heartbeat(&mut self, ctx: &SymbolContext, _scope: &mut dyn SymbolScope) {
        self.seated = 0;
        self.playing = 0;
        // Masks cap at 64 chairs.
        for (chair, seat) in ctx.table.seats.iter().enumerate().take(64) {
            if seat.occupied {
                self.seated |= 1 << chair;
            }
            if seat.dealt {
                self.playing |= 1 << chair;
            }
        }
        self.dealt |= self.playing;
        trace!(
            seated = self.seated.count_ones(),
            playing = self.playing.count_ones(),
            dealt = self.dealt.count_ones(),
            "player masks refreshed"
        );
    }

    fn evaluate(
        &mut self,
        name: &str,
        _ctx: &SymbolContext,
        _scope: &mut dyn SymbolScope,
    ) -> Evaluation {
        let value = match name {
            "nplayersseated" => f64::from(self.seated.count_ones()),
            "nplayersplaying" => f64::from(self.playing.count_ones()),
            "nplayersdealt" => f64::from(self.dealt.count_ones()),
            // Exact for up to 2^53, far beyond any chair mask we build.
            "playersdealtbits" => self.dealt as f64,
            _ => return Evaluation::NotMine,
        };
        Evaluation::Value(value)
    }
}
