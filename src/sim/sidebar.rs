//! Catalog sidebar hit-testing
//!
//! Discovered elements are listed top to bottom in catalog order. The list
//! scrolls; rows scrolled out of view cannot be clicked.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::{ElementCatalog, ElementId};
use super::geom::Rect;
use crate::settings::Settings;

/// Extra room below the last row when fully scrolled
const SCROLL_PADDING: f32 = 50.0;
/// Width of the strip along the right edge that takes wheel input
const SCROLL_ZONE: f32 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sidebar {
    origin: Vec2,
    row: Vec2,
    view_width: f32,
    view_height: f32,
    scroll_step: f32,
    /// Current scroll offset in pixels (0 = top)
    pub scroll: f32,
}

impl Sidebar {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            origin: settings.sidebar_origin,
            row: settings.sidebar_row,
            view_width: settings.view_width,
            view_height: settings.view_height,
            scroll_step: settings.scroll_step,
            scroll: 0.0,
        }
    }

    /// Whether a point is over the sidebar strip (right edge of the view)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.view_width - SCROLL_ZONE
    }

    /// Visible rows with their clickable boxes
    pub fn rows<'a>(
        &'a self,
        catalog: &'a ElementCatalog,
    ) -> impl Iterator<Item = (ElementId, Rect)> + 'a {
        catalog
            .discovered()
            .enumerate()
            .map(move |(i, (id, _))| {
                let y = self.origin.y + i as f32 * self.row.y - self.scroll;
                (id, Rect::new(Vec2::new(self.origin.x, y), self.row))
            })
            .filter(move |(_, rect)| rect.pos.y >= -self.row.y && rect.pos.y <= self.view_height)
    }

    /// The discovered element whose row is under `point`
    pub fn entry_at(&self, catalog: &ElementCatalog, point: Vec2) -> Option<ElementId> {
        self.rows(catalog)
            .find(|(_, rect)| rect.contains(point))
            .map(|(id, _)| id)
    }

    /// Apply wheel movement (positive = up), clamped to the list length
    pub fn scroll_by(&mut self, delta: f32, discovered: usize) {
        self.scroll -= delta * self.scroll_step;
        self.clamp(discovered);
    }

    /// Re-clamp after the list changed length
    pub fn clamp(&mut self, discovered: usize) {
        self.scroll = self.scroll.clamp(0.0, self.max_scroll(discovered));
    }

    pub fn max_scroll(&self, discovered: usize) -> f32 {
        (discovered as f32 * self.row.y - self.view_height + SCROLL_PADDING).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Sidebar, ElementCatalog) {
        (
            Sidebar::from_settings(&Settings::default()),
            ElementCatalog::standard(),
        )
    }

    #[test]
    fn test_entry_at_rows() {
        let (sidebar, catalog) = setup();
        // Rows at y = 10, 40, 70, 100 for Fire, Water, Earth, Air
        let hit = |y| sidebar.entry_at(&catalog, Vec2::new(720.0, y));
        assert_eq!(hit(15.0), catalog.lookup("Fire"));
        assert_eq!(hit(45.0), catalog.lookup("Water"));
        assert_eq!(hit(105.0), catalog.lookup("Air"));
        assert_eq!(hit(200.0), None);
        assert_eq!(sidebar.entry_at(&catalog, Vec2::new(400.0, 15.0)), None);
    }

    #[test]
    fn test_undiscovered_not_listed() {
        let (sidebar, mut catalog) = setup();
        assert_eq!(sidebar.rows(&catalog).count(), 4);

        let lava = catalog.lookup("Lava").unwrap();
        catalog.mark_discovered(lava).unwrap();
        let rows: Vec<_> = sidebar.rows(&catalog).map(|(id, _)| id).collect();
        assert_eq!(rows.len(), 5);
        // Catalog order, not discovery order
        assert_eq!(rows[4], lava);
    }

    #[test]
    fn test_scroll_clamps() {
        let (mut sidebar, _) = setup();
        // 4 rows fit easily: no scrolling
        sidebar.scroll_by(-3.0, 4);
        assert_eq!(sidebar.scroll, 0.0);

        // 26 rows: 780 - 600 + 50 = 230
        assert_eq!(sidebar.max_scroll(26), 230.0);
        sidebar.scroll_by(-100.0, 26);
        assert_eq!(sidebar.scroll, 230.0);
        sidebar.scroll_by(2.0, 26);
        assert_eq!(sidebar.scroll, 170.0);
    }

    #[test]
    fn test_scrolled_rows_shift() {
        let (mut sidebar, mut catalog) = setup();
        let ids: Vec<_> = catalog.iter().map(|(id, _)| id).collect();
        for id in ids {
            catalog.mark_discovered(id).unwrap();
        }
        sidebar.scroll_by(-1.0, catalog.discovered_count());
        assert_eq!(sidebar.scroll, 30.0);
        // Fire's row moved to y = -20; Water now sits at y = 10
        assert_eq!(
            sidebar.entry_at(&catalog, Vec2::new(720.0, 15.0)),
            catalog.lookup("Water")
        );
    }

    #[test]
    fn test_scroll_zone_is_right_edge() {
        let (sidebar, _) = setup();
        assert!(!sidebar.contains(Vec2::new(700.0, 300.0)));
        assert!(sidebar.contains(Vec2::new(701.0, 300.0)));
        assert!(sidebar.contains(Vec2::new(799.0, 590.0)));
        // Past the row width still counts
        assert!(sidebar.contains(Vec2::new(810.0, 300.0)));
        assert!(!sidebar.contains(Vec2::new(650.0, 15.0)));
    }
}
