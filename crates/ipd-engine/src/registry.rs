//! Process-wide strategy-kind registry
//!
//! Holds the immutable classifier of every known kind, the factories of the
//! built-in catalog, and the class-shared state ("genomes") some kinds keep
//! across all of their instances.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

use tracing::debug;

use crate::action::Action;
use crate::classifier::Classifier;
use crate::error::MatchError;
use crate::strategies;
use crate::strategy::Strategy;

/// A kind's shared plan of future actions. One object per kind at a time.
pub type Genome = Arc<Mutex<Vec<Action>>>;

/// Builds a fresh built-in strategy instance
pub type Factory = fn() -> Box<dyn Strategy>;

struct Entry {
    classifier: Classifier,
    factory: Option<Factory>,
}

struct SharedSlot {
    seed: Vec<Action>,
    current: Genome,
}

struct Registry {
    entries: RwLock<HashMap<&'static str, Entry>>,
    shared: Mutex<HashMap<&'static str, SharedSlot>>,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let entries = strategies::catalog()
            .into_iter()
            .map(|(kind, classifier, factory)| (kind, Entry { classifier, factory: Some(factory) }))
            .collect();
        Registry { entries: RwLock::new(entries), shared: Mutex::new(HashMap::new()) }
    })
}

/// Register an external strategy kind.
///
/// Registering the same classifier twice is a no-op; a different classifier
/// for a known kind is rejected.
pub fn register(kind: &'static str, classifier: Classifier) -> Result<(), MatchError> {
    let mut entries = registry().entries.write().unwrap_or_else(PoisonError::into_inner);
    match entries.get(kind) {
        Some(entry) if entry.classifier == classifier => Ok(()),
        Some(_) => Err(MatchError::AlreadyRegistered { kind: kind.to_string() }),
        None => {
            debug!(kind, "registered strategy kind");
            entries.insert(kind, Entry { classifier, factory: None });
            Ok(())
        }
    }
}

/// Classifier lookup
pub fn classifier_for(kind: &str) -> Result<Classifier, MatchError> {
    let entries = registry().entries.read().unwrap_or_else(PoisonError::into_inner);
    entries
        .get(kind)
        .map(|entry| entry.classifier.clone())
        .ok_or_else(|| MatchError::UnregisteredStrategy { kind: kind.to_string() })
}

pub fn is_registered(kind: &str) -> bool {
    let entries = registry().entries.read().unwrap_or_else(PoisonError::into_inner);
    entries.contains_key(kind)
}

/// Built-in kinds, sorted by name
pub fn kinds() -> Vec<&'static str> {
    let entries = registry().entries.read().unwrap_or_else(PoisonError::into_inner);
    let mut kinds: Vec<_> = entries
        .iter()
        .filter(|(_, entry)| entry.factory.is_some())
        .map(|(kind, _)| *kind)
        .collect();
    kinds.sort_unstable();
    kinds
}

/// Fresh instance of a built-in kind
pub fn create(kind: &str) -> Option<Box<dyn Strategy>> {
    let factory = {
        let entries = registry().entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(kind)?.factory?
    };
    Some(factory())
}

/// The kind's current shared plan, created from `seed` on first use.
pub fn shared_genome(kind: &'static str, seed: &[Action]) -> Genome {
    let mut shared = registry().shared.lock().unwrap_or_else(PoisonError::into_inner);
    let slot = shared.entry(kind).or_insert_with(|| SharedSlot {
        seed: seed.to_vec(),
        current: Arc::new(Mutex::new(seed.to_vec())),
    });
    Arc::clone(&slot.current)
}

/// Discard a kind's accumulated shared state.
///
/// The plan is replaced by a new object holding its seed value; every
/// instance reads the new plan from then on. Kinds without shared state are
/// left alone.
pub fn reset_shared_state(kind: &str) -> Result<(), MatchError> {
    if !is_registered(kind) {
        return Err(MatchError::UnregisteredStrategy { kind: kind.to_string() });
    }
    let mut shared = registry().shared.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(slot) = shared.get_mut(kind) {
        slot.current = Arc::new(Mutex::new(slot.seed.clone()));
        debug!(kind, "reset shared state");
    }
    Ok(())
}
