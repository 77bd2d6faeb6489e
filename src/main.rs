//! Skyhop entry point
//!
//! On native there is no window: the binary plays a few headless runs with a
//! simple autopilot and logs the outcome. The browser build is driven from JS
//! through `platform::web::WebGame`.

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use skyhop::sim::{Clock, GameEvent, GamePhase, ManualClock, Simulation, Snapshot};
    use skyhop::{GameConfig, MemoryStore};

    /// Runs to play before exiting
    const RUNS: u32 = 3;
    /// Give up on a run after this much simulated time
    const MAX_RUN_MS: f64 = 120_000.0;
    /// Nominal display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Flap when falling below the middle of the next gap
    fn wants_flap(snapshot: &Snapshot<'_>, config: &GameConfig) -> bool {
        let avatar = snapshot.avatar;
        let target = snapshot
            .obstacles
            .iter()
            .find(|o| o.right() + config.avatar_radius >= avatar.x)
            .map(|o| (o.gap_start() + o.gap_end()) / 2.0 + config.gap_height * 0.15)
            .unwrap_or(config.avatar_start_y);
        avatar.vy >= 0.0 && avatar.y > target
    }

    pub fn run(seed: u64) -> Result<(), skyhop::ConfigError> {
        let config = GameConfig::default();
        let mut sim = Simulation::new(config.clone(), MemoryStore::new(), seed)?;
        let clock = ManualClock::new(0.0);

        for run in 1..=RUNS {
            let run_start = clock.now_ms();
            sim.flap();
            loop {
                // Slightly uneven pacing, as a real display loop would produce
                let jitter = if (clock.now_ms() as u64) % 7 == 0 { 4.0 } else { 0.0 };
                clock.advance(FRAME_MS + jitter);
                sim.tick_with(&clock);

                let snapshot = sim.snapshot();
                for event in snapshot.events {
                    if let GameEvent::Died { score, new_best, hit } = event {
                        log::info!(
                            "Run {}: score {} ({:?}){}",
                            run,
                            score,
                            hit,
                            if *new_best { ", new best!" } else { "" }
                        );
                    }
                }
                if snapshot.phase == GamePhase::Dead {
                    break;
                }
                if clock.now_ms() - run_start > MAX_RUN_MS {
                    log::info!("Run {}: still alive after {} s, stopping", run, MAX_RUN_MS / 1000.0);
                    sim.reset();
                    break;
                }
                if wants_flap(&snapshot, &config) {
                    sim.flap();
                }
            }
            // Wait out the restart debounce
            clock.advance(config.restart_debounce_ms as f64);
            sim.tick_with(&clock);
        }

        println!("Best score: {}", sim.best_score());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Skyhop (native) starting...");
    log::info!("Native mode is headless - build for wasm32 and drive WebGame from JS to play");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    if let Err(e) = autopilot::run(seed) {
        log::error!("Cannot start simulation: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::WebGame, this is just to satisfy the compiler
}
