//! Little Alchemist entry point
//!
//! There is no window here: the native binary runs a headless autoplay
//! session that feeds pointer events into the simulation and reports what
//! it discovered.
//!
//! Usage: `little-alchemist [settings.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use little_alchemist::consts::FRAME_DT;
    use little_alchemist::sim::{GameEvent, GameState, PointerEvent, TickInput, tick};

    /// Frames simulated per session (about a minute at 60 Hz)
    const FRAMES: u32 = 3600;
    /// Sandbox area the autoplayer scatters instances over (clear of the trash bin)
    const SCATTER_MIN: Vec2 = Vec2::new(100.0, 40.0);
    const SCATTER_MAX: Vec2 = Vec2::new(620.0, 480.0);

    pub struct Autoplayer {
        rng: Pcg32,
    }

    impl Autoplayer {
        pub fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed),
            }
        }

        fn scatter_point(&mut self) -> Vec2 {
            Vec2::new(
                self.rng.random_range(SCATTER_MIN.x..SCATTER_MAX.x),
                self.rng.random_range(SCATTER_MIN.y..SCATTER_MAX.y),
            )
        }

        /// Drag whatever is under `from` to `to`
        fn drag(events: &mut Vec<PointerEvent>, from: Vec2, to: Vec2) {
            events.push(PointerEvent::Down(from));
            events.push(PointerEvent::Move(to));
            events.push(PointerEvent::Up(to));
        }

        /// Decide this frame's input
        pub fn plan(&mut self, state: &GameState) -> TickInput {
            let mut events = Vec::new();
            let anchor = state.settings.drag_anchor;
            let objects: Vec<Vec2> = state.world.iter().map(|o| o.pos + anchor).collect();

            let roll: f32 = self.rng.random();
            if objects.len() < 2 || roll < 0.3 {
                // Spawn a visible sidebar entry, then move it off the spawn point
                let rows: Vec<_> = state.sidebar.rows(&state.catalog).collect();
                if rows.is_empty() {
                    events.push(PointerEvent::Scroll {
                        pos: state.settings.sidebar_origin,
                        delta: 1.0,
                    });
                } else {
                    let (_, row) = rows[self.rng.random_range(0..rows.len())];
                    events.push(PointerEvent::Down(row.center()));
                    events.push(PointerEvent::Up(row.center()));
                    let origin = state.settings.spawn_origin + anchor;
                    let to = self.scatter_point();
                    Self::drag(&mut events, origin, to);
                }
            } else if roll < 0.35 {
                // Scroll the sidebar so later spawns reach the whole list
                let delta = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
                events.push(PointerEvent::Scroll {
                    pos: state.settings.sidebar_origin,
                    delta,
                });
            } else if roll < 0.38 {
                let from = objects[self.rng.random_range(0..objects.len())];
                let to = state.settings.trash.center();
                Self::drag(&mut events, from, to);
            } else {
                let a = self.rng.random_range(0..objects.len());
                let mut b = self.rng.random_range(0..objects.len());
                if a == b {
                    b = (b + 1) % objects.len();
                }
                Self::drag(&mut events, objects[a], objects[b] + Vec2::new(5.0, 5.0));
            }

            TickInput { events }
        }
    }

    pub fn run(state: &mut GameState, seed: u64) {
        let mut player = Autoplayer::new(seed);
        let mut combinations = 0u32;

        for frame in 0..FRAMES {
            let time = frame as f32 * FRAME_DT;
            let input = player.plan(state);
            tick(state, &input, time);

            for event in state.drain_events() {
                match event {
                    GameEvent::Combined { .. } => combinations += 1,
                    GameEvent::Discovered { element } => {
                        log::info!(
                            "[{:>6.2}s] Discovered {}",
                            time,
                            state.catalog.name(element)
                        );
                    }
                    _ => {}
                }
            }
        }

        log::info!(
            "Session over: {} combinations, {}/{} elements discovered, {} objects on the board",
            combinations,
            state.catalog.discovered_count(),
            state.catalog.len(),
            state.world.len()
        );
        for (_, element) in state.catalog.discovered() {
            log::info!("  {:<10} created {:>4}x", element.name, element.creation_count);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use little_alchemist::Settings;
    use little_alchemist::sim::GameState;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Little Alchemist (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0xA1C4E);

    let mut state = match GameState::new(settings) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to build recipe book: {e}");
            std::process::exit(1);
        }
    };
    log::info!("Autoplay seed: {}", seed);
    autoplay::run(&mut state, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {}
