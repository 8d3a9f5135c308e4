//! Breakout entry point
//!
//! Without a renderer attached this binary runs the simulation headless: a
//! small demo AI tracks the ball with the paddle so the whole gameplay loop
//! can be exercised (and profiled) from the command line.

use breakout::audio::AudioQueue;
use breakout::sim::{self, GameEvent, GamePhase, GameState, keys};

/// Fixed demo timestep (60 Hz)
const DT: f32 = 1.0 / 60.0;
/// Give up after ten simulated minutes
const MAX_FRAMES: u64 = 60 * 600;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xB12EA40);
    log::info!("starting headless demo with seed {seed}");

    let mut state = match GameState::new(seed) {
        Ok(state) => state,
        Err(err) => {
            log::error!("failed to load built-in levels: {err}");
            std::process::exit(1);
        }
    };

    let mut audio = AudioQueue::new();
    audio.play_background();

    let mut frames = 0u64;
    let mut bricks_destroyed = 0u64;
    while state.phase == GamePhase::Active && frames < MAX_FRAMES {
        drive_paddle(&mut state);
        sim::process_input(&mut state, DT);
        sim::update(&mut state, DT);

        let events = state.drain_events();
        for event in &events {
            match event {
                GameEvent::BrickDestroyed => bricks_destroyed += 1,
                GameEvent::BallLost => log::info!("ball lost, level reset"),
                GameEvent::LevelComplete => {
                    log::info!("level complete, now on level {}", state.current_level + 1);
                }
                _ => {}
            }
        }
        audio.push_events(&events);
        // No playback backend attached; drop the requests on the floor
        audio.flush();

        frames += 1;
    }

    log::info!(
        "demo finished: {} frames, {bricks_destroyed} bricks, phase {:?}",
        frames,
        state.phase
    );
}

/// Demo AI: launch immediately, then keep the paddle under the ball
fn drive_paddle(state: &mut GameState) {
    state.set_key(keys::SPACE, state.ball.stuck);

    let paddle_center = state.player.position.x + state.player.size.x / 2.0;
    let target = state.ball.center().x;
    let dead_zone = 4.0;

    state.set_key(keys::LEFT, target < paddle_center - dead_zone);
    state.set_key(keys::RIGHT, target > paddle_center + dead_zone);
}
