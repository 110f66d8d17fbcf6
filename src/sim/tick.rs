//! Per-frame simulation tick
//!
//! One frame: drain every queued pointer event in order, then run the two
//! maintenance passes (capacity eviction and rejection reset).

use super::input::{PointerEvent, handle_pointer};
use super::state::{DragMode, GameEvent, GameState};

/// Input collected since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<PointerEvent>,
}

impl TickInput {
    pub fn new(events: impl IntoIterator<Item = PointerEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

/// Advance the game by one frame at clock `time`
pub fn tick(state: &mut GameState, input: &TickInput, time: f32) {
    for event in &input.events {
        handle_pointer(state, *event, time);
    }
    end_frame(state, time);
}

/// The maintenance half of a tick, without input
pub fn end_frame(state: &mut GameState, time: f32) {
    state.advance_clock(time);

    let evicted = state.world.evict_overflow();
    for obj in evicted {
        log::debug!(
            "Evicted {} (created at {:.2})",
            state.catalog.name(obj.element),
            obj.created_at
        );
        if state.drag == (DragMode::Dragging { instance: obj.id }) {
            state.drag = DragMode::Idle;
        }
        state.push_event(GameEvent::Evicted {
            instance: obj.id,
            element: obj.element,
        });
    }

    state.world.clear_rejections();

    let discovered = state.catalog.discovered_count();
    state.sidebar.clamp(discovered);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec2;

    #[test]
    fn test_tick_drains_events_in_order() {
        let mut state = GameState::new(Settings::default()).unwrap();
        let fire_row = Vec2::new(720.0, 20.0);
        let input = TickInput::new([
            PointerEvent::Down(fire_row),
            PointerEvent::Up(fire_row),
            PointerEvent::Down(Vec2::new(410.0, 310.0)),
            PointerEvent::Move(Vec2::new(100.0, 100.0)),
        ]);
        tick(&mut state, &input, 1.0);

        assert_eq!(state.world.len(), 1);
        let obj = state.world.iter().next().unwrap();
        assert_eq!(obj.pos, Vec2::new(75.0, 75.0));
        assert!(obj.dragging);
        assert_eq!(state.time, 1.0);
    }

    #[test]
    fn test_tick_restores_capacity() {
        let mut state = GameState::new(Settings::with_max_objects(3)).unwrap();
        let fire = state.catalog.lookup("Fire").unwrap();
        for t in 0..5 {
            state.world.spawn(fire, Vec2::ZERO, t as f32);
        }
        tick(&mut state, &TickInput::default(), 10.0);

        assert_eq!(state.world.len(), 3);
        let times: Vec<_> = state.world.iter().map(|o| o.created_at).collect();
        assert_eq!(times, [2.0, 3.0, 4.0]);
        let evicted = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Evicted { .. }))
            .count();
        assert_eq!(evicted, 2);
    }

    #[test]
    fn test_evicting_dragged_instance_ends_drag() {
        let mut state = GameState::new(Settings::with_max_objects(1)).unwrap();
        let fire = state.catalog.lookup("Fire").unwrap();
        let old = state.world.spawn(fire, Vec2::ZERO, 0.0);
        state.world.spawn(fire, Vec2::new(300.0, 300.0), 1.0);
        state.world.set_dragging(old, true);
        state.drag = DragMode::Dragging { instance: old };

        tick(&mut state, &TickInput::default(), 2.0);
        assert_eq!(state.drag, DragMode::Idle);

        // Later move/up are harmless
        let input = TickInput::new([
            PointerEvent::Move(Vec2::new(50.0, 50.0)),
            PointerEvent::Up(Vec2::new(50.0, 50.0)),
        ]);
        tick(&mut state, &input, 3.0);
        assert_eq!(state.world.len(), 1);
    }

    #[test]
    fn test_tick_resets_rejections() {
        let mut state = GameState::new(Settings::default()).unwrap();
        let fire = state.catalog.lookup("Fire").unwrap();
        let id = state.world.spawn(fire, Vec2::ZERO, 0.0);
        state.world.get_mut(id).unwrap().rejected = true;

        tick(&mut state, &TickInput::default(), 0.1);
        assert!(!state.world.get(id).unwrap().rejected);
    }
}
