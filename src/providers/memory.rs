//! Memory-symbol interpreter.
//!
//! Implements the `me_*` command language: persistent named variables with
//! store, recall, increment, add and subtract operations, parsed out of a
//! fixed textual grammar:
//!
//! ```text
//! me_<op>_<name>[_<expr>]      <op> ∈ {st, re, inc, add, sub}
//! ```
//!
//! The name sits between the second and third underscore of the command;
//! the expression, when one is required (`st`/`add`/`sub`), is everything
//! after the third. Stored keys are lower-cased, so command casing never
//! affects variable identity. Variables persist across hands within one
//! sitting and clear on every new table connection.

use std::collections::HashMap;
use tracing::{debug, warn};

use super::{Evaluation, SymbolContext, SymbolProvider, SymbolScope, UNSET_VALUE};

/// Name prefix owned by this provider.
const MEMORY_PREFIX: &str = "me_";

// ---------------------------------------------------------------------------
// Command grammar
// ---------------------------------------------------------------------------

/// Which grammar family a malformed command broke — the two families carry
/// different user-facing diagnostics.
#[derive(Debug, Clone, Copy)]
enum Grammar {
    /// `me_st_` / `me_add_` / `me_sub_`: name and expression required.
    Store,
    /// `me_re_` / `me_inc_`: name required, no expression.
    Recall,
}

/// A structurally valid memory command.
#[derive(Debug)]
enum Command<'c> {
    Store { key: String, expr: &'c str },
    Add { key: String, expr: &'c str },
    Subtract { key: String, expr: &'c str },
    Increment { key: String },
    Recall { key: String },
}

enum ParseOutcome<'c> {
    Command(Command<'c>),
    /// No `me_` prefix, or an unrecognised operator token. Silent.
    NotMemory,
    /// Recognised operator but broken delimiter structure.
    Malformed(Grammar),
}

/// Single-pass parse of a raw command string. Exactly one outcome per
/// command, so the caller raises at most one diagnostic.
fn parse_command(command: &str) -> ParseOutcome<'_> {
    let Some(rest) = command.strip_prefix(MEMORY_PREFIX) else {
        return ParseOutcome::NotMemory;
    };

    // The operator token runs to the second underscore of the full command.
    let (token, tail) = match rest.split_once('_') {
        Some((token, tail)) => (token, Some(tail)),
        None => (rest, None),
    };
    let grammar = match token {
        "st" | "add" | "sub" => Grammar::Store,
        "re" | "inc" => Grammar::Recall,
        // Shaped like a memory command, but no recognised operator.
        _ => return ParseOutcome::NotMemory,
    };

    // The name sits between the second and third underscore, or runs to the
    // end of the command when no third underscore exists.
    let Some(tail) = tail else {
        return ParseOutcome::Malformed(grammar);
    };
    let (name, expr) = match tail.split_once('_') {
        Some((name, expr)) => (name, Some(expr)),
        None => (tail, None),
    };
    if name.is_empty() {
        return ParseOutcome::Malformed(grammar);
    }
    let key = name.to_lowercase();

    let command = match token {
        "st" | "add" | "sub" => {
            let Some(expr) = expr.filter(|e| !e.is_empty()) else {
                return ParseOutcome::Malformed(grammar);
            };
            match token {
                "st" => Command::Store { key, expr },
                "add" => Command::Add { key, expr },
                _ => Command::Subtract { key, expr },
            }
        }
        "re" => Command::Recall { key },
        // Trailing text after a third underscore is ignored for re/inc.
        _ => Command::Increment { key },
    };
    ParseOutcome::Command(command)
}

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

/// Provider owning the memory-variable table.
///
/// Evaluating a `me_st_`, `me_inc_`, `me_add_` or `me_sub_` command
/// *mutates* the table — evaluation is not pure for this provider, and
/// callers must not re-evaluate speculatively.
pub struct MemorySymbols {
    vars: HashMap<String, f64>,
    parse_errors: u64,
}

impl MemorySymbols {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
            parse_errors: 0,
        }
    }

    /// Peek at a variable without running a command. Keys are matched
    /// case-insensitively, like the command grammar.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.vars.get(&name.to_lowercase()).copied()
    }

    /// Number of variables currently stored.
    pub fn variable_count(&self) -> usize {
        self.vars.len()
    }

    /// Number of malformed commands seen so far — one per diagnostic raised.
    pub fn parse_errors(&self) -> u64 {
        self.parse_errors
    }

    fn execute(
        &mut self,
        command: &str,
        ctx: &SymbolContext,
        scope: &mut dyn SymbolScope,
    ) -> Evaluation {
        match parse_command(command) {
            ParseOutcome::Command(cmd) => Evaluation::Value(self.run(cmd, ctx, scope)),
            ParseOutcome::NotMemory => Evaluation::NotMine,
            ParseOutcome::Malformed(grammar) => {
                self.report_malformed(grammar, command);
                Evaluation::Malformed
            }
        }
    }

    fn run(&mut self, command: Command, ctx: &SymbolContext, scope: &mut dyn SymbolScope) -> f64 {
        match command {
            Command::Store { key, expr } => {
                let value = self.evaluate_rhs(expr, ctx, scope);
                self.vars.insert(key, value);
                UNSET_VALUE
            }
            Command::Add { key, expr } => {
                let value = self.evaluate_rhs(expr, ctx, scope);
                *self.vars.entry(key).or_insert(UNSET_VALUE) += value;
                UNSET_VALUE
            }
            Command::Subtract { key, expr } => {
                let value = self.evaluate_rhs(expr, ctx, scope);
                *self.vars.entry(key).or_insert(UNSET_VALUE) -= value;
                UNSET_VALUE
            }
            Command::Increment { key } => {
                *self.vars.entry(key).or_insert(UNSET_VALUE) += 1.0;
                UNSET_VALUE
            }
            // Recall never creates the variable; unset reads as the sentinel.
            Command::Recall { key } => self.vars.get(&key).copied().unwrap_or(UNSET_VALUE),
        }
    }

    /// Evaluate the right-hand side of a store/add/subtract command.
    ///
    /// Possible shapes: a numeric literal (`me_st_x_3_141`), a nested memory
    /// command (`me_st_x_me_re_y`), or any other symbol name, resolved
    /// through the engine scope (`me_st_x_betround`).
    fn evaluate_rhs(
        &mut self,
        expr: &str,
        ctx: &SymbolContext,
        scope: &mut dyn SymbolScope,
    ) -> f64 {
        let value = if expr.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            // Numeric literal. One uniform underscore -> decimal-point pass
            // over the whole substring, so a literal holds at most one
            // separator; anything lexically invalid reads as the sentinel.
            expr.replace('_', ".").parse::<f64>().unwrap_or(UNSET_VALUE)
        } else if expr.starts_with(MEMORY_PREFIX) {
            // Nested memory command. The suffix is strictly shorter than
            // the enclosing command, so the recursion terminates.
            match self.execute(expr, ctx, scope) {
                Evaluation::Value(v) => v,
                Evaluation::NotMine | Evaluation::Malformed => UNSET_VALUE,
            }
        } else {
            scope.evaluate(expr, ctx).unwrap_or(UNSET_VALUE)
        };
        if ctx.debug.memory_symbols {
            debug!(expr, value, "memory right-hand side evaluated");
        }
        value
    }

    fn report_malformed(&mut self, grammar: Grammar, command: &str) {
        self.parse_errors += 1;
        match grammar {
            Grammar::Store => warn!(
                command,
                "invalid memory symbol: store commands need the me_st_/me_add_/me_sub_ \
                 prefix, a variable name, another underscore and a value, \
                 e.g. me_st_pi_3_141592653"
            ),
            Grammar::Recall => warn!(
                command,
                "invalid memory symbol: missing variable name; recall and increment \
                 commands look like me_re_potsraised or me_inc_potsraised"
            ),
        }
    }
}

impl Default for MemorySymbols {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolProvider for MemorySymbols {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn symbols(&self) -> &'static [&'static str] {
        &["me_"]
    }

    fn describe(&self) -> String {
        "me_st_* me_re_* me_inc_* me_add_* me_sub_*".to_string()
    }

    /// Memory variables persist across hands but not across sittings.
    fn on_connection(&mut self) {
        if !self.vars.is_empty() {
            debug!(
                dropped = self.vars.len(),
                "memory variables cleared on new connection"
            );
        }
        self.vars.clear();
    }

    fn evaluate(
        &mut self,
        name: &str,
        ctx: &SymbolContext,
        scope: &mut dyn SymbolScope,
    ) -> Evaluation {
        if !name.starts_with(MEMORY_PREFIX) {
            return Evaluation::NotMine;
        }
        if ctx.debug.memory_symbols {
            debug!(command = name, "evaluating memory command");
        }
        self.execute(name, ctx, scope)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
