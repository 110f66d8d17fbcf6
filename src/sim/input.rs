//! Pointer interaction
//!
//! A two-state machine over a single pointer. Idle: a press either spawns
//! from the sidebar or picks up the topmost instance. Dragging: the held
//! instance follows the pointer; release drops it in the trash or hands it
//! to the collision resolver.
//!
//! The element book sees presses and wheel events first. While it is open
//! the sandbox gets no input at all.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{DropContext, DropOutcome, resolve_drop};
use super::state::{DragMode, GameEvent, GameState};
use super::world::InstanceId;

/// Raw pointer input in sandbox coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
    /// Wheel movement; positive scrolls the list up
    Scroll { pos: Vec2, delta: f32 },
}

/// Apply one pointer event at clock `time`.
///
/// Spawns and combination products are stamped with the state clock, which
/// never runs backward even if `time` does.
pub fn handle_pointer(state: &mut GameState, event: PointerEvent, time: f32) {
    state.advance_clock(time);
    let time = state.time;
    match event {
        PointerEvent::Down(pos) => pointer_down(state, pos, time),
        PointerEvent::Move(_) | PointerEvent::Up(_) if state.book.is_open() => {}
        PointerEvent::Move(pos) => pointer_move(state, pos),
        PointerEvent::Up(_) => pointer_up(state, time),
        PointerEvent::Scroll { pos, delta } => {
            let entries = state.catalog.len();
            if state.book.wheel(pos, delta, entries) {
                return;
            }
            if state.sidebar.contains(pos) {
                let discovered = state.catalog.discovered_count();
                state.sidebar.scroll_by(delta, discovered);
            }
        }
    }
}

fn pointer_down(state: &mut GameState, pos: Vec2, time: f32) {
    // A press without a release in between: drop the stale grab first
    if let DragMode::Dragging { instance } = state.drag {
        log::warn!("Pointer down while still dragging {:?}", instance);
        state.world.set_dragging(instance, false);
        state.drag = DragMode::Idle;
    }

    if state.book.press(pos, &state.catalog) {
        return;
    }

    if let Some(element) = state.sidebar.entry_at(&state.catalog, pos) {
        if let Err(e) = state.spawn_from_catalog(element, time) {
            log::debug!("Spawn refused: {e}");
            state.push_event(GameEvent::Refused(e));
        }
        return;
    }

    if let Some(instance) = state.world.topmost_at(pos) {
        state.world.set_dragging(instance, true);
        state.drag = DragMode::Dragging { instance };
        log::debug!("Picked up {:?}", instance);
    }
}

fn pointer_move(state: &mut GameState, pos: Vec2) {
    let DragMode::Dragging { instance } = state.drag else {
        return;
    };
    let anchor = state.settings.drag_anchor;
    match state.world.get_mut(instance) {
        Some(obj) => obj.pos = pos - anchor,
        // Evicted out from under the pointer
        None => state.drag = DragMode::Idle,
    }
}

fn pointer_up(state: &mut GameState, time: f32) {
    let DragMode::Dragging { instance } = state.drag else {
        return;
    };
    state.drag = DragMode::Idle;

    let Some(bounds) = state.world.bounds(instance) else {
        return;
    };

    if bounds.intersects(&state.settings.trash) {
        if let Some(obj) = state.world.remove(instance) {
            log::debug!("Trashed {}", state.catalog.name(obj.element));
            state.push_event(GameEvent::Trashed {
                instance,
                element: obj.element,
            });
        }
        return;
    }

    release(state, instance, time);
    state.world.set_dragging(instance, false);
}

fn release(state: &mut GameState, instance: InstanceId, time: f32) {
    let ctx = DropContext {
        world: &mut state.world,
        catalog: &mut state.catalog,
        registry: &state.registry,
        marker: &mut state.invalid_marker,
        mark_secs: state.settings.invalid_mark_secs,
    };
    let outcome = match resolve_drop(ctx, instance, time) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::warn!("Combination aborted: {e}");
            state.push_event(GameEvent::Refused(e));
            return;
        }
    };

    match outcome {
        DropOutcome::Combined {
            inputs,
            result,
            instance,
            first_discovery,
        } => {
            log::debug!(
                "{} + {} = {}",
                state.catalog.name(inputs.0),
                state.catalog.name(inputs.1),
                state.catalog.name(result)
            );
            state.push_event(GameEvent::Combined {
                inputs,
                result,
                instance,
            });
            if first_discovery {
                log::info!("Discovered {}!", state.catalog.name(result));
                state.push_event(GameEvent::Discovered { element: result });
            }
        }
        DropOutcome::Rejected { misses } => {
            state.push_event(GameEvent::Rejected { misses });
        }
        DropOutcome::NoContact => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::ElementId;

    fn state() -> GameState {
        GameState::new(Settings::default()).unwrap()
    }

    fn id(state: &GameState, name: &str) -> ElementId {
        state.catalog.lookup(name).unwrap()
    }

    /// Press on the sidebar row of a discovered element
    fn click_sidebar(state: &mut GameState, name: &str, time: f32) {
        let target = id(state, name);
        let (_, rect) = state
            .sidebar
            .rows(&state.catalog)
            .find(|(e, _)| *e == target)
            .unwrap();
        let at = rect.center();
        handle_pointer(state, PointerEvent::Down(at), time);
        handle_pointer(state, PointerEvent::Up(at), time);
    }

    fn drag(state: &mut GameState, from: Vec2, to: Vec2, time: f32) {
        handle_pointer(state, PointerEvent::Down(from), time);
        handle_pointer(state, PointerEvent::Move(to), time);
        handle_pointer(state, PointerEvent::Up(to), time);
    }

    #[test]
    fn test_sidebar_click_spawns_without_drag() {
        let mut state = state();
        click_sidebar(&mut state, "Water", 0.5);

        assert_eq!(state.world.len(), 1);
        let obj = state.world.iter().next().unwrap();
        assert_eq!(obj.element, id(&state, "Water"));
        assert_eq!(obj.pos, Vec2::new(400.0, 300.0));
        assert!(!obj.dragging);
        assert_eq!(state.drag, DragMode::Idle);
    }

    #[test]
    fn test_press_on_instance_starts_drag() {
        let mut state = state();
        click_sidebar(&mut state, "Fire", 0.0);
        let fire = state.world.iter().next().unwrap().id;

        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(425.0, 325.0)), 1.0);
        assert_eq!(state.drag, DragMode::Dragging { instance: fire });
        assert_eq!(state.world.dragging(), Some(fire));

        handle_pointer(&mut state, PointerEvent::Move(Vec2::new(200.0, 200.0)), 1.1);
        assert_eq!(state.world.get(fire).unwrap().pos, Vec2::new(175.0, 175.0));

        handle_pointer(&mut state, PointerEvent::Up(Vec2::new(200.0, 200.0)), 1.2);
        assert_eq!(state.drag, DragMode::Idle);
        assert_eq!(state.world.dragging(), None);
        assert_eq!(state.world.get(fire).unwrap().pos, Vec2::new(175.0, 175.0));
    }

    #[test]
    fn test_press_on_empty_space_does_nothing() {
        let mut state = state();
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(100.0, 100.0)), 0.0);
        handle_pointer(&mut state, PointerEvent::Move(Vec2::new(120.0, 100.0)), 0.1);
        handle_pointer(&mut state, PointerEvent::Up(Vec2::new(120.0, 100.0)), 0.2);
        assert_eq!(state.drag, DragMode::Idle);
        assert!(state.world.is_empty());
    }

    #[test]
    fn test_topmost_instance_is_picked() {
        let mut state = state();
        click_sidebar(&mut state, "Fire", 0.0);
        click_sidebar(&mut state, "Water", 0.1);
        let water = state.world.iter().last().unwrap().id;

        // Both sit at the spawn origin; the later one is on top
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(410.0, 310.0)), 1.0);
        assert_eq!(state.dragged(), Some(water));
    }

    #[test]
    fn test_drop_in_trash() {
        let mut state = state();
        click_sidebar(&mut state, "Earth", 0.0);
        click_sidebar(&mut state, "Fire", 0.1);
        state.drain_events();

        // Fire is on top; drop it on the trash bin even though Earth is underneath
        drag(&mut state, Vec2::new(425.0, 325.0), Vec2::new(40.0, 550.0), 1.0);
        assert_eq!(state.world.len(), 1);
        assert_eq!(state.world.iter().next().unwrap().element, id(&state, "Earth"));
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::Trashed { .. }]
        ));
        // Trash never counts as a combination
        assert_eq!(state.catalog.discovered_count(), 4);
    }

    #[test]
    fn test_drag_onto_partner_combines() {
        let mut state = state();
        click_sidebar(&mut state, "Fire", 0.0);
        let fire = state.world.iter().next().unwrap().id;
        // Move Fire aside, then spawn Water at the origin
        drag(&mut state, Vec2::new(425.0, 325.0), Vec2::new(225.0, 225.0), 0.5);
        click_sidebar(&mut state, "Water", 1.0);
        state.drain_events();

        // Drag Fire back over Water
        drag(&mut state, Vec2::new(225.0, 225.0), Vec2::new(440.0, 330.0), 2.0);

        let steam = id(&state, "Steam");
        assert_eq!(state.world.len(), 1);
        let obj = state.world.iter().next().unwrap();
        assert_eq!(obj.element, steam);
        assert_eq!(obj.created_at, 2.0);
        assert!(state.world.get(fire).is_none());
        assert_eq!(state.drag, DragMode::Idle);

        let events = state.drain_events();
        assert!(matches!(events[0], GameEvent::Combined { result, .. } if result == steam));
        assert_eq!(events[1], GameEvent::Discovered { element: steam });
    }

    #[test]
    fn test_sidebar_full_refuses_and_does_not_drag() {
        let mut state = GameState::new(Settings::with_max_objects(1)).unwrap();
        click_sidebar(&mut state, "Fire", 0.0);
        click_sidebar(&mut state, "Fire", 0.1);
        assert_eq!(state.world.len(), 1);
        assert_eq!(state.catalog.get(id(&state, "Fire")).unwrap().creation_count, 1);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Refused(crate::SimError::CapacityExceeded { .. })))
        );
    }

    #[test]
    fn test_second_press_clears_stale_drag() {
        let mut state = state();
        click_sidebar(&mut state, "Fire", 0.0);
        drag(&mut state, Vec2::new(425.0, 325.0), Vec2::new(125.0, 125.0), 0.5);
        click_sidebar(&mut state, "Water", 1.0);

        // Press on Fire, no release, then press on Water
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(110.0, 110.0)), 2.0);
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(410.0, 310.0)), 2.1);
        assert_eq!(state.world.iter().filter(|o| o.dragging).count(), 1);
    }

    #[test]
    fn test_scroll_only_over_sidebar() {
        let mut state = state();
        let ids: Vec<_> = state.catalog.iter().map(|(id, _)| id).collect();
        for id in ids {
            state.catalog.mark_discovered(id).unwrap();
        }
        handle_pointer(
            &mut state,
            PointerEvent::Scroll {
                pos: Vec2::new(300.0, 300.0),
                delta: -1.0,
            },
            0.0,
        );
        assert_eq!(state.sidebar.scroll, 0.0);
        handle_pointer(
            &mut state,
            PointerEvent::Scroll {
                pos: Vec2::new(720.0, 300.0),
                delta: -1.0,
            },
            0.0,
        );
        assert_eq!(state.sidebar.scroll, 30.0);
    }

    #[test]
    fn test_book_blocks_sandbox_input() {
        let mut state = state();
        click_sidebar(&mut state, "Fire", 0.0);
        state.drain_events();

        // Book icon sits top-left
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(40.0, 40.0)), 1.0);
        assert!(state.book.is_open());

        // Sidebar rows lie outside the panel: the press only closes the book
        let (_, row) = state.sidebar.rows(&state.catalog).next().unwrap();
        handle_pointer(&mut state, PointerEvent::Scroll { pos: row.center(), delta: -1.0 }, 1.1);
        handle_pointer(&mut state, PointerEvent::Down(row.center()), 1.2);
        assert_eq!(state.world.len(), 1);
        assert!(state.drain_events().is_empty());
        assert!(!state.book.is_open());

        // Instances inside the panel cannot be picked up while it is open
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(40.0, 40.0)), 2.0);
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(425.0, 325.0)), 2.1);
        handle_pointer(&mut state, PointerEvent::Move(Vec2::new(200.0, 200.0)), 2.2);
        handle_pointer(&mut state, PointerEvent::Up(Vec2::new(200.0, 200.0)), 2.3);
        assert!(state.book.is_open());
        assert_eq!(state.drag, DragMode::Idle);
        assert_eq!(state.world.iter().next().unwrap().pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_book_takes_wheel_events() {
        let mut state = state();
        let ids: Vec<_> = state.catalog.iter().map(|(id, _)| id).collect();
        for id in ids {
            state.catalog.mark_discovered(id).unwrap();
        }
        state.book.toggle();

        let sidebar = Vec2::new(720.0, 300.0);
        handle_pointer(&mut state, PointerEvent::Scroll { pos: sidebar, delta: -1.0 }, 0.0);
        assert_eq!(state.sidebar.scroll, 0.0);

        let list = Vec2::new(150.0, 300.0);
        handle_pointer(&mut state, PointerEvent::Scroll { pos: list, delta: -1.0 }, 0.0);
        assert_eq!(state.book.scroll, 30.0);
    }

    #[test]
    fn test_spawn_stamped_with_monotonic_clock() {
        let mut state = state();
        click_sidebar(&mut state, "Fire", 5.0);
        // Caller clock jumps backward
        click_sidebar(&mut state, "Water", 2.0);

        let stamps: Vec<_> = state.world.iter().map(|o| o.created_at).collect();
        assert_eq!(stamps, [5.0, 5.0]);
        assert_eq!(state.time, 5.0);
    }
}
