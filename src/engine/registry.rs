//! Provider registry: ownership, dependency ordering, symbol dispatch.
//!
//! The registry owns one boxed instance of every provider, stored in
//! dependency order so that lifecycle broadcasts always reach a provider
//! after everything it declared in `depends_on()`. Symbol lookups route
//! through two maps — exact names and `_`-terminated prefix families — so
//! resolution costs at most two hash probes regardless of provider count.
//!
//! During any dispatched call the active provider is moved out of its slot
//! and the registry itself is handed back as the lookup scope. A provider
//! that queries its own symbols mid-evaluation therefore finds the slot
//! empty and reads `None` instead of recursing forever.

use std::collections::HashMap;
use std::fmt;
use tracing::info;

use crate::providers::betround::BetroundCalculator;
use crate::providers::blinds::BlindDetector;
use crate::providers::facts::TableFacts;
use crate::providers::memory::MemorySymbols;
use crate::providers::players::ActivePlayers;
use crate::providers::{Evaluation, SymbolContext, SymbolProvider, SymbolScope};
use crate::types::RailbirdError;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// One provider in dependency order. `provider` is `None` only while that
/// provider is executing a dispatched call.
struct Slot {
    name: &'static str,
    provider: Option<Box<dyn SymbolProvider>>,
}

pub struct EngineRegistry {
    slots: Vec<Slot>,
    exact: HashMap<&'static str, usize>,
    families: HashMap<&'static str, usize>,
}

impl fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("providers", &self.provider_order())
            .finish()
    }
}

impl EngineRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The standard provider set: table facts, betround calculator,
    /// player masks, memory symbols, blind-posting detector.
    pub fn standard() -> Result<Self, RailbirdError> {
        RegistryBuilder::new()
            .register(Box::new(TableFacts::new()))
            .register(Box::new(BetroundCalculator::new()))
            .register(Box::new(ActivePlayers::new()))
            .register(Box::new(MemorySymbols::new()))
            .register(Box::new(BlindDetector::new()))
            .build()
    }

    /// Provider names in broadcast (dependency) order.
    pub fn provider_order(&self) -> Vec<&'static str> {
        self.slots.iter().map(|slot| slot.name).collect()
    }

    /// One line naming every provider and the symbols it serves.
    pub fn describe_all(&self) -> String {
        self.slots
            .iter()
            .map(|slot| {
                let symbols = slot
                    .provider
                    .as_ref()
                    .map_or_else(String::new, |p| p.describe());
                format!("{}[{}]", slot.name, symbols)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn owner_of(&self, name: &str) -> Option<usize> {
        if let Some(&idx) = self.exact.get(name) {
            return Some(idx);
        }
        let prefix_end = name.find('_')?;
        self.families.get(&name[..=prefix_end]).copied()
    }

    /// Run one provider's `evaluate` with its slot vacated.
    fn dispatch(&mut self, idx: usize, name: &str, ctx: &SymbolContext) -> Option<f64> {
        let Some(mut provider) = self.slots[idx].provider.take() else {
            // The owner is already on the call stack: re-entrant self-lookup.
            return None;
        };
        let outcome = provider.evaluate(name, ctx, self);
        self.slots[idx].provider = Some(provider);
        match outcome {
            Evaluation::Value(v) => Some(v),
            Evaluation::NotMine | Evaluation::Malformed => None,
        }
    }

    // ---- lifecycle broadcasts, in dependency order ----

    pub fn init_on_startup(&mut self) {
        for slot in &mut self.slots {
            if let Some(provider) = slot.provider.as_mut() {
                provider.init_on_startup();
            }
        }
    }

    pub fn broadcast_connection(&mut self) {
        for slot in &mut self.slots {
            if let Some(provider) = slot.provider.as_mut() {
                provider.on_connection();
            }
        }
    }

    pub fn broadcast_hand_reset(&mut self) {
        for slot in &mut self.slots {
            if let Some(provider) = slot.provider.as_mut() {
                provider.on_hand_reset();
            }
        }
    }

    pub fn broadcast_new_round(&mut self) {
        for slot in &mut self.slots {
            if let Some(provider) = slot.provider.as_mut() {
                provider.on_new_round();
            }
        }
    }

    pub fn broadcast_my_turn(&mut self) {
        for slot in &mut self.slots {
            if let Some(provider) = slot.provider.as_mut() {
                provider.on_my_turn();
            }
        }
    }

    /// Per-frame heartbeat. Each provider runs with its own slot vacated
    /// and may consult every *other* provider through the scope.
    pub fn broadcast_heartbeat(&mut self, ctx: &SymbolContext) {
        for idx in 0..self.slots.len() {
            let Some(mut provider) = self.slots[idx].provider.take() else {
                continue;
            };
            provider.on_heartbeat(ctx, self);
            self.slots[idx].provider = Some(provider);
        }
    }
}

impl SymbolScope for EngineRegistry {
    fn evaluate(&mut self, name: &str, ctx: &SymbolContext) -> Option<f64> {
        let idx = self.owner_of(name)?;
        self.dispatch(idx, name, ctx)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects providers, then validates names, dependencies and symbol
/// claims in one shot. All failures are startup errors; nothing about the
/// registry can fail after `build` returns.
pub struct RegistryBuilder {
    providers: Vec<Box<dyn SymbolProvider>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    pub fn register(mut self, provider: Box<dyn SymbolProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn build(self) -> Result<EngineRegistry, RailbirdError> {
        let names: Vec<&'static str> = self.providers.iter().map(|p| p.name()).collect();

        let mut index_of: HashMap<&'static str, usize> = HashMap::new();
        for (i, &name) in names.iter().enumerate() {
            if index_of.insert(name, i).is_some() {
                return Err(RailbirdError::DuplicateProvider(name.to_string()));
            }
        }

        // Edges run dependency -> dependent; indegree counts unmet deps.
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.providers.len()];
        let mut indegree: Vec<usize> = vec![0; self.providers.len()];
        for (i, provider) in self.providers.iter().enumerate() {
            for &dep in provider.depends_on() {
                let Some(&j) = index_of.get(dep) else {
                    return Err(RailbirdError::UnknownDependency {
                        provider: names[i].to_string(),
                        dependency: dep.to_string(),
                    });
                };
                dependents[j].push(i);
                indegree[i] += 1;
            }
        }

        // Kahn's algorithm, always taking the lowest registration index
        // among the ready providers, so the order is deterministic.
        let mut order: Vec<usize> = Vec::with_capacity(self.providers.len());
        let mut placed = vec![false; self.providers.len()];
        while order.len() < self.providers.len() {
            let Some(next) = (0..self.providers.len()).find(|&i| !placed[i] && indegree[i] == 0)
            else {
                let stuck: Vec<&str> = (0..self.providers.len())
                    .filter(|&i| !placed[i])
                    .map(|i| names[i])
                    .collect();
                return Err(RailbirdError::DependencyCycle(stuck.join(", ")));
            };
            placed[next] = true;
            for &dependent in &dependents[next] {
                indegree[dependent] -= 1;
            }
            order.push(next);
        }

        let slot_names: Vec<&'static str> = order.iter().map(|&i| names[i]).collect();

        // Dispatch maps. A trailing underscore declares a prefix family;
        // anything else is an exact name. Each literal has one owner.
        let mut exact: HashMap<&'static str, usize> = HashMap::new();
        let mut families: HashMap<&'static str, usize> = HashMap::new();
        for (slot_idx, &i) in order.iter().enumerate() {
            for &symbol in self.providers[i].symbols() {
                let map = if symbol.ends_with('_') {
                    &mut families
                } else {
                    &mut exact
                };
                if let Some(&first) = map.get(symbol) {
                    return Err(RailbirdError::DuplicateSymbol {
                        symbol: symbol.to_string(),
                        first: slot_names[first].to_string(),
                        second: names[i].to_string(),
                    });
                }
                map.insert(symbol, slot_idx);
            }
        }

        let mut remaining: Vec<Option<Box<dyn SymbolProvider>>> =
            self.providers.into_iter().map(Some).collect();
        let slots: Vec<Slot> = order
            .iter()
            .zip(slot_names.iter())
            .map(|(&i, &name)| Slot {
                name,
                provider: remaining[i].take(),
            })
            .collect();

        info!(
            order = %slot_names.join(" -> "),
            "provider registry initialised"
        );
        Ok(EngineRegistry {
            slots,
            exact,
            families,
        })
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
