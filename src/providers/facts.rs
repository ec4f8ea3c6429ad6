//! Stateless table facts, read straight off the current frame.

use super::{Evaluation, SymbolContext, SymbolProvider, SymbolScope};

pub struct TableFacts;

impl TableFacts {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableFacts {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolProvider for TableFacts {
    fn name(&self) -> &'static str {
        "facts"
    }

    fn symbols(&self) -> &'static [&'static str] {
        &["dealerchair", "nchairs", "sblind", "bblind", "ante"]
    }

    fn evaluate(
        &mut self,
        name: &str,
        ctx: &SymbolContext,
        _scope: &mut dyn SymbolScope,
    ) -> Evaluation {
        let value = match name {
            "dealerchair" => ctx.table.dealer as f64,
            "nchairs" => ctx.table.seat_count() as f64,
            "sblind" => ctx.table.sblind,
            "bblind" => ctx.table.bblind,
            "ante" => ctx.table.ante,
            _ => return Evaluation::NotMine,
        };
        Evaluation::Value(value)
    }
}
