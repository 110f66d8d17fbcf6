//! Error types
//!
//! Nothing in the simulation is fatal. Every variant here is a refused
//! operation that leaves state untouched.

use thiserror::Error;

use crate::sim::ElementId;

/// A refused simulation operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The id was never registered in the catalog (logic fault)
    #[error("unknown element id {0:?}")]
    UnknownElement(ElementId),

    /// A rule or lookup named an element the catalog does not have
    #[error("no element named {0}")]
    UnknownName(String),

    /// Explicit spawn of an element the player has not discovered yet
    #[error("element {0} has not been discovered")]
    Undiscovered(String),

    /// Explicit spawn while the sandbox is full
    #[error("sandbox is full ({max} objects)")]
    CapacityExceeded { max: usize },

    /// Every `ElementId` is already assigned
    #[error("catalog is full ({max} elements)")]
    CatalogFull { max: usize },

    /// A second rule for a pair that already has a different result
    #[error("{a} + {b} already produces {existing}, cannot also produce {requested}")]
    ConflictingRule {
        a: String,
        b: String,
        existing: String,
        requested: String,
    },
}

/// Failure to load or validate [`crate::Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
