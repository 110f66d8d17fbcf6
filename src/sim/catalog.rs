//! Element catalog
//!
//! Owns every element definition for the lifetime of the game. Instances in
//! the world refer to elements by [`ElementId`] only, so removing an
//! instance can never touch the element itself.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Stable index of an element in its catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u16);

impl ElementId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A discoverable substance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub description: String,
    /// One-way: once true, stays true
    pub discovered: bool,
    /// Spawns plus combination products, never decremented
    pub creation_count: u32,
}

impl Element {
    pub fn new(name: impl Into<String>, description: impl Into<String>, discovered: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            discovered,
            creation_count: 0,
        }
    }
}

/// The four primitives, discovered from the start
pub const PRIMITIVES: [(&str, &str); 4] = [
    ("Fire", "A blazing flame"),
    ("Water", "Crystal clear liquid"),
    ("Earth", "Rich brown soil"),
    ("Air", "Invisible breeze"),
];

/// Everything that must be made by combining
pub const DERIVED: [(&str, &str); 22] = [
    // Two primitives
    ("Steam", "Hot water vapor"),
    ("Lava", "Molten rock and fire"),
    ("Smoke", "Cloudy haze"),
    ("Mud", "Wet and sticky earth"),
    ("Mist", "Gentle water vapor"),
    ("Dust", "Fine particles in air"),
    // Doubled primitives
    ("Energy", "Pure concentrated power"),
    ("Ocean", "Vast body of water"),
    ("Mountain", "Towering earthen peak"),
    ("Wind", "Strong moving air"),
    // Higher tiers
    ("Cloud", "Fluffy sky formation"),
    ("Rain", "Falling water droplets"),
    ("Plant", "Green growing life"),
    ("Stone", "Hard solid rock"),
    ("Volcano", "Explosive mountain"),
    ("Lightning", "Electric bolt"),
    ("Ice", "Frozen water crystal"),
    ("Sand", "Tiny rock particles"),
    ("Swamp", "Muddy wetland"),
    ("Forest", "Dense tree collection"),
    ("Desert", "Vast sandy wasteland"),
    ("Life", "The essence of living things"),
];

/// Indexed store of all elements, in registration order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementCatalog {
    elements: Vec<Element>,
}

impl ElementCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full 26-element set: primitives first, then derived elements
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        let primitives = PRIMITIVES.iter().map(|(n, d)| Element::new(*n, *d, true));
        let derived = DERIVED.iter().map(|(n, d)| Element::new(*n, *d, false));
        for element in primitives.chain(derived) {
            if let Err(e) = catalog.register(element) {
                log::error!("{e}");
            }
        }
        catalog
    }

    /// Add an element, returning its id. Names are expected to be unique;
    /// a duplicate name returns the existing id unchanged. Refused once
    /// every `ElementId` is taken.
    pub fn register(&mut self, element: Element) -> Result<ElementId, SimError> {
        if let Some(id) = self.lookup(&element.name) {
            log::warn!("Element {} registered twice, keeping the first", element.name);
            return Ok(id);
        }
        let Ok(index) = u16::try_from(self.elements.len()) else {
            log::warn!("Catalog full, refusing {}", element.name);
            return Err(SimError::CatalogFull {
                max: usize::from(u16::MAX) + 1,
            });
        };
        self.elements.push(element);
        Ok(ElementId(index))
    }

    pub fn get(&self, id: ElementId) -> Result<&Element, SimError> {
        self.elements
            .get(id.index())
            .ok_or(SimError::UnknownElement(id))
    }

    fn get_mut(&mut self, id: ElementId) -> Result<&mut Element, SimError> {
        self.elements
            .get_mut(id.index())
            .ok_or(SimError::UnknownElement(id))
    }

    /// Find an element by exact name
    pub fn lookup(&self, name: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.name == name)
            .map(|i| ElementId(i as u16))
    }

    /// Name of an element, or `"?"` for an unknown id
    pub fn name(&self, id: ElementId) -> &str {
        self.get(id).map(|e| e.name.as_str()).unwrap_or("?")
    }

    /// Set the discovered flag. Returns true only on the first discovery.
    pub fn mark_discovered(&mut self, id: ElementId) -> Result<bool, SimError> {
        let element = self.get_mut(id)?;
        let first = !element.discovered;
        element.discovered = true;
        Ok(first)
    }

    pub fn increment_created(&mut self, id: ElementId) -> Result<u32, SimError> {
        let element = self.get_mut(id)?;
        element.creation_count = element.creation_count.saturating_add(1);
        Ok(element.creation_count)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements with their ids, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (ElementId(i as u16), e))
    }

    /// Discovered elements in sidebar order
    pub fn discovered(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.iter().filter(|(_, e)| e.discovered)
    }

    pub fn discovered_count(&self) -> usize {
        self.elements.iter().filter(|e| e.discovered).count()
    }
}
