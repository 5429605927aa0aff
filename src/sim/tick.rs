//! Per-frame turn and physics driver
//!
//! One tick: rotate the turn if the current stone has settled, apply the
//! frame's commands, advance every stone and broom, resolve collisions, and
//! recompute the scores. The host calls this once per rendered frame with the
//! elapsed time; `dt` therefore varies with frame rate, an accepted tradeoff
//! (hosts wanting repeatable physics run a fixed-timestep accumulator).

use glam::Vec3;

use super::collision::check_collisions;
use super::curve::QuadraticBezier;
use super::state::GameState;
use crate::consts::HOUSE_RADIUS;

/// A launch to apply to the current stone
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchCommand {
    /// Follow a Bézier path with the given initial velocity
    Curved {
        velocity: Vec3,
        curve: QuadraticBezier,
    },
    /// Slide straight with the given velocity
    Straight { velocity: Vec3 },
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Launch the current stone (ignored while it is still moving)
    pub launch: Option<LaunchCommand>,
    /// Toggle sweeping on the current stone
    pub toggle_broom: bool,
}

/// Advance the game by one tick of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    advance_turn_if_settled(state);

    if input.toggle_broom {
        toggle_broom(state);
    }
    if let Some(command) = &input.launch {
        launch_current(state, command);
    }

    for stone in &mut state.stones {
        stone.update(dt);
    }
    for broom in &mut state.brooms {
        broom.update(&state.stones);
    }

    check_collisions(&mut state.stones);

    update_scores(state);
}

/// Spawn the next stone once the current one has finished its travel.
///
/// A turn ends only when its stone has been launched AND has come to rest; an
/// unlaunched stone sits at the origin forever without ending the turn.
fn advance_turn_if_settled(state: &mut GameState) {
    let settled = match state.current_stone() {
        None => true,
        Some(stone) => stone.launched && !stone.is_moving(),
    };
    if !settled {
        return;
    }

    if let Some(index) = state.current {
        // Finish the previous throw: free slide for any later impacts, broom
        // friction off, both brooms detached.
        let stone = &mut state.stones[index];
        stone.set_free_fall();
        stone.use_broom(false);
        for broom in &mut state.brooms {
            broom.detach();
        }

        state.current_team = state.current_team.other();
        log::info!(
            "Stone {} settled at ({:.1}, {:.1}); {} to throw",
            index,
            stone.position.x,
            stone.position.z,
            state.current_team.as_str()
        );
    }

    let team = state.current_team;
    let index = state.spawn_stone(team);
    log::debug!("Stone {} ready for {}", index, team.as_str());
}

fn toggle_broom(state: &mut GameState) {
    let Some(index) = state.current else {
        return;
    };

    let stone = &mut state.stones[index];
    let active = !stone.sweeping;
    stone.use_broom(active);
    let team = stone.team;

    state.broom_mut(team).set_sweeping(active);
    log::debug!(
        "{} broom {}",
        team.as_str(),
        if active { "on" } else { "off" }
    );
}

fn launch_current(state: &mut GameState, command: &LaunchCommand) {
    let Some(index) = state.current else {
        return;
    };
    let stone = &mut state.stones[index];
    if stone.is_moving() {
        return;
    }

    match command {
        LaunchCommand::Curved { velocity, curve } => {
            stone.launch_curved(*velocity, curve.clone());
        }
        LaunchCommand::Straight { velocity } => {
            stone.launch_straight(*velocity);
        }
    }

    let team = stone.team;
    let sweeping = stone.sweeping;
    log::info!(
        "{} threw stone {} at {:.1} u/s",
        team.as_str(),
        index,
        state.stones[index].velocity.length()
    );

    let broom = state.broom_mut(team);
    broom.attach(index);
    broom.set_sweeping(sweeping);
}

/// Recompute both scores from scratch: a stone counts for its team while it
/// sits within the house circle widened by its own radius.
fn update_scores(state: &mut GameState) {
    let mut scores = [0u32; 2];
    for stone in &state.stones {
        if stone.position.distance(state.house_center) < HOUSE_RADIUS + stone.radius {
            scores[stone.team.index()] += 1;
        }
    }

    if scores != state.scores {
        log::info!("Score now Blue {} : Red {}", scores[0], scores[1]);
    }
    state.scores = scores;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Team, TrajectoryMode};

    fn straight_launch(speed: f32) -> TickInput {
        TickInput {
            launch: Some(LaunchCommand::Straight {
                velocity: Vec3::new(speed, 0.0, 0.0),
            }),
            ..Default::default()
        }
    }

    /// Run ticks until the current stone stops moving
    fn settle(state: &mut GameState) {
        let mut guard = 0;
        while state.current_stone().is_some_and(|s| s.is_moving()) {
            tick(state, &TickInput::default(), SIM_DT);
            guard += 1;
            assert!(guard < 120 * 60, "stone never settled");
        }
    }

    #[test]
    fn test_first_tick_spawns_blue_stone() {
        let mut state = GameState::new();
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.stones.len(), 1);
        assert_eq!(state.current, Some(0));
        assert_eq!(state.stones[0].team, Team::Blue);
        assert_eq!(state.stones[0].position, state.launch_origin);
    }

    #[test]
    fn test_unlaunched_stone_never_ends_the_turn() {
        let mut state = GameState::new();
        for _ in 0..1000 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }

        assert_eq!(state.stones.len(), 1);
        assert_eq!(state.current_team, Team::Blue);
        assert!(!state.stones[0].launched);
    }

    #[test]
    fn test_settled_throw_rotates_teams() {
        let mut state = GameState::new();
        tick(&mut state, &TickInput::default(), SIM_DT);
        tick(&mut state, &straight_launch(10.0), SIM_DT);
        assert!(state.stones[0].launched);

        settle(&mut state);
        // The next tick notices the settled stone and spawns for Red
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.stones.len(), 2);
        assert_eq!(state.current, Some(1));
        assert_eq!(state.current_team, Team::Red);
        assert_eq!(state.stones[1].team, Team::Red);
    }

    #[test]
    fn test_turn_end_finalizes_previous_stone() {
        let mut state = GameState::new();
        tick(&mut state, &TickInput::default(), SIM_DT);
        tick(
            &mut state,
            &TickInput {
                launch: straight_launch(10.0).launch,
                toggle_broom: true,
            },
            SIM_DT,
        );
        assert!(state.stones[0].sweeping);
        assert_eq!(state.broom(Team::Blue).attached, Some(0));

        settle(&mut state);
        tick(&mut state, &TickInput::default(), SIM_DT);

        let previous = &state.stones[0];
        assert_eq!(previous.mode, TrajectoryMode::Linear);
        assert!(!previous.sweeping);
        assert_eq!(previous.friction, NORMAL_FRICTION);
        assert_eq!(state.broom(Team::Blue).attached, None);
        assert_eq!(state.broom(Team::Red).attached, None);
    }

    #[test]
    fn test_at_rest_epsilon_gates_turn_advance() {
        let mut state = GameState::new();
        tick(&mut state, &TickInput::default(), SIM_DT);

        // Launched and drifting below the at-rest epsilon: the turn ends
        let stone = state.current_stone_mut().unwrap();
        stone.launched = true;
        stone.velocity = Vec3::new(0.03, 0.0, 0.0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.stones.len(), 2);
        assert_eq!(state.current_team, Team::Red);
    }

    #[test]
    fn test_launch_ignored_while_moving() {
        let mut state = GameState::new();
        tick(&mut state, &TickInput::default(), SIM_DT);
        tick(&mut state, &straight_launch(10.0), SIM_DT);

        // A second command while the stone is still moving does nothing
        let curve = QuadraticBezier::new(
            Vec3::ZERO,
            Vec3::new(30.0, 0.0, 0.0),
            Vec3::new(60.0, 0.0, 0.0),
        );
        tick(
            &mut state,
            &TickInput {
                launch: Some(LaunchCommand::Curved {
                    velocity: Vec3::new(30.0, 0.0, 0.0),
                    curve,
                }),
                ..Default::default()
            },
            SIM_DT,
        );

        assert_eq!(state.stones[0].mode, TrajectoryMode::Linear);
        assert!(state.stones[0].velocity.length() < 10.0);
    }

    #[test]
    fn test_toggle_broom_switches_stone_and_broom() {
        let mut state = GameState::new();
        tick(&mut state, &TickInput::default(), SIM_DT);

        tick(
            &mut state,
            &TickInput {
                toggle_broom: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert!(state.stones[0].sweeping);
        assert_eq!(state.stones[0].friction, BROOM_FRICTION);
        assert!(state.broom(Team::Blue).sweeping);

        tick(
            &mut state,
            &TickInput {
                toggle_broom: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert!(!state.stones[0].sweeping);
        assert_eq!(state.stones[0].friction, NORMAL_FRICTION);
        assert!(!state.broom(Team::Blue).sweeping);
    }

    #[test]
    fn test_stones_in_house_score_for_their_team() {
        let mut state = GameState::new();
        tick(&mut state, &TickInput::default(), SIM_DT);

        // Park the current stone in the house, still unlaunched so the turn
        // does not rotate underneath the assertion
        state.stones[0].position = state.house_center + Vec3::new(3.0, 0.0, 0.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.scores, [1, 0]);

        // Exactly on the widened rim: out (strictly less than)
        state.stones[0].position =
            state.house_center + Vec3::new(HOUSE_RADIUS + STONE_RADIUS, 0.0, 0.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.scores, [0, 0]);
    }

    #[test]
    fn test_scores_recomputed_from_scratch() {
        let mut state = GameState::new();
        tick(&mut state, &TickInput::default(), SIM_DT);

        state.scores = [7, 9];
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.scores, [0, 0]);
    }

    #[test]
    fn test_straight_throw_stops_at_speed_mark() {
        // With friction 1.0, a straight throw travels v0/friction units
        let mut state = GameState::new();
        tick(&mut state, &TickInput::default(), SIM_DT);
        tick(&mut state, &straight_launch(55.0), SIM_DT);
        settle(&mut state);

        let stone = &state.stones[0];
        assert!(
            (stone.position.x - 55.0).abs() < 1.0,
            "stopped at {}",
            stone.position.x
        );
        // 55 from the origin is inside the house (center 60, rim 10.75 wide)
        assert_eq!(state.scores, [1, 0]);
    }

    #[test]
    fn test_collision_resolved_during_tick() {
        let mut state = GameState::new();
        tick(&mut state, &TickInput::default(), SIM_DT);

        // A second, resting stone directly in the thrown stone's path
        state.stones.push({
            let mut blocker =
                crate::sim::state::Stone::new(STONE_RADIUS, Vec3::new(8.0, 0.0, 0.0), Team::Red);
            blocker.launched = true;
            blocker
        });

        tick(&mut state, &straight_launch(30.0), SIM_DT);
        let mut guard = 0;
        while state.stones.iter().any(|s| s.is_moving()) {
            tick(&mut state, &TickInput::default(), SIM_DT);
            guard += 1;
            assert!(guard < 120 * 60, "stones never settled");
        }

        // The struck stone was knocked downfield, the striker trails it
        assert!(state.stones[1].position.x > 8.0);
        assert!(state.stones[0].position.x < state.stones[1].position.x);
    }
}
