//! Element encyclopedia
//!
//! Lists every element; undiscovered ones stay hidden behind `???` until
//! the player makes them. While open, the book takes every press and wheel
//! event; the sandbox sees none of them.

use glam::Vec2;

use crate::sim::{CombinationRegistry, ElementCatalog, ElementId, Rect};

/// Placeholder for anything the player has not discovered
pub const HIDDEN: &str = "???";

/// Formula text for elements no rule produces
pub const BASIC_FORMULA: &str = "Basic Element";

/// Row height of the book's element list
const LIST_ROW: f32 = 30.0;
/// Visible height of the book's element list
const LIST_HEIGHT: f32 = 400.0;
const LIST_PADDING: f32 = 50.0;

// === Layout ===
/// Icon that opens the book, top-left of the view
const ICON_POS: Vec2 = Vec2::new(10.0, 10.0);
const ICON_SIZE: Vec2 = Vec2::new(64.0, 64.0);
/// Open book panel; a press outside closes it
const PANEL_MIN: Vec2 = Vec2::new(100.0, 100.0);
const PANEL_MAX: Vec2 = Vec2::new(700.0, 500.0);
/// Close button, top-right corner of the panel
const EXIT_POS: Vec2 = Vec2::new(668.0, 100.0);
const EXIT_SIZE: Vec2 = Vec2::new(32.0, 32.0);
/// First list row; rows are `LIST_ROW` apart
const LIST_ORIGIN: Vec2 = Vec2::new(130.0, 100.0);
const LIST_ROW_WIDTH: f32 = 100.0;
/// Wheel input scrolls the list only over this column
const LIST_SCROLL_MIN: Vec2 = Vec2::new(100.0, 100.0);
const LIST_SCROLL_MAX: Vec2 = Vec2::new(200.0, 500.0);

/// One line of the element list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEntry {
    pub id: ElementId,
    /// Element name, or `???` while undiscovered
    pub label: String,
    pub discovered: bool,
}

/// Detail panel for the selected element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDetails {
    pub name: String,
    pub created: String,
    pub description: String,
    pub formula: String,
}

impl ElementDetails {
    /// Panel text, one field per line
    pub fn text(&self) -> String {
        format!(
            "Name: {}\nCreated: {}\nDescription: {}\nFormula: {}",
            self.name, self.created, self.description, self.formula
        )
    }

    fn hidden() -> Self {
        Self {
            name: HIDDEN.into(),
            created: HIDDEN.into(),
            description: HIDDEN.into(),
            formula: HIDDEN.into(),
        }
    }
}

/// Open/closed state, selection and list scroll of the encyclopedia
#[derive(Debug, Clone, Default)]
pub struct ElementBook {
    open: bool,
    selected: Option<ElementId>,
    pub scroll: f32,
}

impl ElementBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open or close; either way the selection is cleared
    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.selected = None;
    }

    pub fn select(&mut self, id: ElementId) {
        if self.open {
            self.selected = Some(id);
        }
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn scroll_by(&mut self, delta: f32, entries: usize) {
        let max = (entries as f32 * LIST_ROW - LIST_HEIGHT + LIST_PADDING).max(0.0);
        self.scroll = (self.scroll - delta * LIST_ROW).clamp(0.0, max);
    }

    /// Route a press. Returns true when the book consumed it: a press on
    /// the icon while closed, or any press while open.
    pub fn press(&mut self, pos: Vec2, catalog: &ElementCatalog) -> bool {
        if !self.open {
            if Rect::new(ICON_POS, ICON_SIZE).contains(pos) {
                self.toggle();
                log::debug!("Element book opened");
                return true;
            }
            return false;
        }

        let outside = pos.cmplt(PANEL_MIN).any() || pos.cmpgt(PANEL_MAX).any();
        if outside || Rect::new(EXIT_POS, EXIT_SIZE).contains(pos) {
            self.toggle();
            log::debug!("Element book closed");
            return true;
        }

        if let Some(id) = self.row_at(pos, catalog) {
            self.selected = Some(id);
        }
        true
    }

    /// Route a wheel event. Returns true while the book is open.
    pub fn wheel(&mut self, pos: Vec2, delta: f32, entries: usize) -> bool {
        if !self.open {
            return false;
        }
        if pos.cmpge(LIST_SCROLL_MIN).all() && pos.cmple(LIST_SCROLL_MAX).all() {
            self.scroll_by(delta, entries);
        }
        true
    }

    /// List row under `pos`; rows scrolled well out of the panel never match
    fn row_at(&self, pos: Vec2, catalog: &ElementCatalog) -> Option<ElementId> {
        catalog
            .iter()
            .enumerate()
            .find(|(i, _)| {
                let y = LIST_ORIGIN.y + *i as f32 * LIST_ROW - self.scroll;
                let row = Rect::new(
                    Vec2::new(LIST_ORIGIN.x, y),
                    Vec2::new(LIST_ROW_WIDTH, LIST_ROW),
                );
                (LIST_ORIGIN.y - LIST_ROW..=PANEL_MAX.y).contains(&y) && row.contains(pos)
            })
            .map(|(_, (id, _))| id)
    }

    /// Every element in catalog order
    pub fn entries(&self, catalog: &ElementCatalog) -> Vec<BookEntry> {
        catalog
            .iter()
            .map(|(id, e)| BookEntry {
                id,
                label: if e.discovered {
                    e.name.clone()
                } else {
                    HIDDEN.to_string()
                },
                discovered: e.discovered,
            })
            .collect()
    }

    /// Details for the current selection, if any
    pub fn details(
        &self,
        catalog: &ElementCatalog,
        registry: &CombinationRegistry,
    ) -> Option<ElementDetails> {
        let id = self.selected?;
        let element = catalog.get(id).ok()?;
        if !element.discovered {
            return Some(ElementDetails::hidden());
        }

        let formula = match registry.recipe_for(id) {
            Some((a, b)) => format!("{} + {}", catalog.name(a), catalog.name(b)),
            None => BASIC_FORMULA.to_string(),
        };
        Some(ElementDetails {
            name: element.name.clone(),
            created: element.creation_count.to_string(),
            description: element.description.clone(),
            formula,
        })
    }
}
