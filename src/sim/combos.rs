//! Combination registry
//!
//! Symmetric pair -> result table. Pairs are canonicalized (smaller id
//! first) before hashing so `(a, b)` and `(b, a)` share one entry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::catalog::{ElementCatalog, ElementId};
use crate::error::SimError;

/// The standard recipe book, by element name
pub const STANDARD_RULES: [(&str, &str, &str); 22] = [
    // Basic pairs
    ("Fire", "Water", "Steam"),
    ("Fire", "Earth", "Lava"),
    ("Fire", "Air", "Smoke"),
    ("Water", "Earth", "Mud"),
    ("Water", "Air", "Mist"),
    ("Earth", "Air", "Dust"),
    // Doublings
    ("Fire", "Fire", "Energy"),
    ("Water", "Water", "Ocean"),
    ("Earth", "Earth", "Mountain"),
    ("Air", "Air", "Wind"),
    // Higher tiers
    ("Steam", "Air", "Cloud"),
    ("Cloud", "Water", "Rain"),
    ("Mud", "Energy", "Plant"),
    ("Lava", "Air", "Stone"),
    ("Lava", "Mountain", "Volcano"),
    ("Energy", "Air", "Lightning"),
    ("Water", "Wind", "Ice"),
    ("Stone", "Wind", "Sand"),
    ("Mud", "Plant", "Swamp"),
    ("Plant", "Plant", "Forest"),
    ("Sand", "Sand", "Desert"),
    ("Energy", "Plant", "Life"),
];

/// Unordered pair of elements, stored sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey(ElementId, ElementId);

impl PairKey {
    pub fn new(a: ElementId, b: ElementId) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn elements(&self) -> (ElementId, ElementId) {
        (self.0, self.1)
    }
}

/// Pure lookup table from element pairs to results
#[derive(Debug, Clone, Default)]
pub struct CombinationRegistry {
    rules: HashMap<PairKey, ElementId>,
    /// Rules as written, in insertion order
    order: Vec<(ElementId, ElementId)>,
}

impl CombinationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard table against a catalog
    pub fn standard(catalog: &ElementCatalog) -> Result<Self, SimError> {
        Self::from_named_rules(catalog, &STANDARD_RULES)
    }

    /// Build a table from `(a, b, result)` name triples
    pub fn from_named_rules(
        catalog: &ElementCatalog,
        rules: &[(&str, &str, &str)],
    ) -> Result<Self, SimError> {
        let mut registry = Self::new();
        for &(a, b, result) in rules {
            let a = resolve_name(catalog, a)?;
            let b = resolve_name(catalog, b)?;
            let result = resolve_name(catalog, result)?;
            registry.insert(catalog, a, b, result)?;
        }
        log::debug!("Combination registry built with {} rules", registry.len());
        Ok(registry)
    }

    /// Add a rule. Re-adding the same rule is a no-op; mapping an existing
    /// pair to a different result is refused.
    pub fn insert(
        &mut self,
        catalog: &ElementCatalog,
        a: ElementId,
        b: ElementId,
        result: ElementId,
    ) -> Result<(), SimError> {
        for id in [a, b, result] {
            catalog.get(id)?;
        }
        let key = PairKey::new(a, b);
        match self.rules.get(&key) {
            Some(&existing) if existing == result => Ok(()),
            Some(&existing) => Err(SimError::ConflictingRule {
                a: catalog.name(a).to_string(),
                b: catalog.name(b).to_string(),
                existing: catalog.name(existing).to_string(),
                requested: catalog.name(result).to_string(),
            }),
            None => {
                self.rules.insert(key, result);
                self.order.push((a, b));
                Ok(())
            }
        }
    }

    pub fn is_valid(&self, a: ElementId, b: ElementId) -> bool {
        self.rules.contains_key(&PairKey::new(a, b))
    }

    pub fn resolve(&self, a: ElementId, b: ElementId) -> Option<ElementId> {
        self.rules.get(&PairKey::new(a, b)).copied()
    }

    /// First registered pair that produces `result`, in the order it was written
    pub fn recipe_for(&self, result: ElementId) -> Option<(ElementId, ElementId)> {
        self.order
            .iter()
            .copied()
            .find(|&(a, b)| self.resolve(a, b) == Some(result))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (PairKey, ElementId)> + '_ {
        self.order.iter().map(|&(a, b)| {
            let key = PairKey::new(a, b);
            (key, self.rules[&key])
        })
    }
}

fn resolve_name(catalog: &ElementCatalog, name: &str) -> Result<ElementId, SimError> {
    catalog
        .lookup(name)
        .ok_or_else(|| SimError::UnknownName(name.to_string()))
}
