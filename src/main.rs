//! Roaring Game entry point
//!
//! Headless native host: drives the simulation at a fixed timestep through a
//! scripted eight-stone end and logs the result. A rendering host calls
//! `sim::tick` the same way, once per frame with the elapsed time.

use glam::Vec3;

use roaring_game::consts::*;
use roaring_game::settings::{LaunchKind, LaunchSettings};
use roaring_game::sim::{GameState, TickInput, tick};

fn main() {
    env_logger::init();
    log::info!("Roaring Game (headless) starting...");

    let mut state = GameState::new();
    let mut settings = LaunchSettings::default();

    for throw in 0..8u32 {
        // One quiet tick lets the driver spawn the stone for the throwing team
        tick(&mut state, &TickInput::default(), SIM_DT);

        if throw % 2 == 0 {
            settings.kind = LaunchKind::Curved;
            settings.velocity = Vec3::new(30.0, 0.0, 3.0 * (throw as f32 / 2.0 - 1.5));
        } else {
            settings.kind = LaunchKind::Straight;
            settings.straight_speed = 55.0;
            settings.direction = 0.04 * (throw as f32 - 4.0);
        }
        settings.clamp();

        let command = settings.to_command(state.launch_origin, state.house_center);
        // Curved throws get swept for their first second to carry further
        let sweep = settings.kind == LaunchKind::Curved;
        tick(
            &mut state,
            &TickInput {
                launch: Some(command),
                toggle_broom: sweep,
            },
            SIM_DT,
        );

        let mut ticks = 0u32;
        while state.current_stone().is_some_and(|stone| stone.is_moving()) && ticks < 120 * 60 {
            let input = if sweep && ticks == 120 {
                TickInput {
                    toggle_broom: true,
                    ..Default::default()
                }
            } else {
                TickInput::default()
            };
            tick(&mut state, &input, SIM_DT);
            ticks += 1;
        }
        log::info!("Throw {} settled after {} ticks", throw + 1, ticks);
    }

    log::info!(
        "Final score - Blue {} : Red {}",
        state.scores[0],
        state.scores[1]
    );
    match state.leading_team() {
        Some(team) => log::info!("{} leads", team.as_str()),
        None => log::info!("All square"),
    }

    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string(&state) {
            Ok(snapshot) => log::debug!("Final state: {snapshot}"),
            Err(err) => log::warn!("Snapshot failed: {err}"),
        }
    }
}
