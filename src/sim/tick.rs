//! Per-frame update sequencing
//!
//! Fixed order every frame: move ball, resolve collisions (bricks, then
//! powerups vs paddle, then ball vs paddle), update powerups, check the
//! ball-lost boundary, count the shake timer down. A frame is the unit of
//! atomicity; nothing here suspends or reenters.

use glam::Vec2;

use super::collision::{Collision, Direction, check_ball_collision, check_collision};
use super::entity::Ball;
use super::powerup::{Powerup, PowerupKind};
use super::state::{GameEvent, GamePhase, GameState, keys};
use crate::consts::*;

/// Advance the simulation by one frame
pub fn update(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Active {
        return;
    }

    state.ball.update_position(dt, state.width);
    do_collisions(state);
    update_powerups(state, dt);

    // Ball fell below the field: lose a life worth of progress
    if state.ball.entity.position.y >= state.height as f32 {
        state.events.push(GameEvent::BallLost);
        state.reset_level();
        state.reset_player();
    }

    if state.effects.shake_time > 0.0 {
        state.effects.shake_time -= dt;
        if state.effects.shake_time <= 0.0 {
            state.effects.shake = false;
        }
    }

    if state.level().is_completed() {
        state.events.push(GameEvent::LevelComplete);
        state.advance_level();
    }
}

/// Apply the pressed-key set to paddle (and stuck-ball) movement
pub fn process_input(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Active {
        return;
    }
    let velocity = PLAYER_VELOCITY * dt;

    if state.keys[keys::A] || state.keys[keys::LEFT] {
        if state.player.position.x >= 0.0 {
            state.player.position.x -= velocity;
            if state.ball.stuck {
                state.ball.entity.position.x -= velocity;
            }
        }
    }
    if state.keys[keys::D] || state.keys[keys::RIGHT] {
        if state.player.position.x <= state.width as f32 - state.player.size.x {
            state.player.position.x += velocity;
            if state.ball.stuck {
                state.ball.entity.position.x += velocity;
            }
        }
    }
    if state.keys[keys::SPACE] {
        state.ball.stuck = false;
    }
}

/// Run all collision detection and resolution for this frame
pub fn do_collisions(state: &mut GameState) {
    collide_bricks(state);
    collide_powerups(state);
    collide_paddle(state);
}

/// Ball against every live brick in the current level
fn collide_bricks(state: &mut GameState) {
    // Brick positions that spawn powerups, deferred past the brick borrow
    let mut destroyed_at: Vec<Vec2> = Vec::new();

    let level_index = state.current_level;
    for i in 0..state.levels[level_index].bricks.len() {
        let brick = &state.levels[level_index].bricks[i];
        if brick.destroyed {
            continue;
        }
        let collision = check_ball_collision(&state.ball, brick);
        if !collision.hit {
            continue;
        }

        let is_solid = brick.is_solid;
        if is_solid {
            // Solid bricks are permanent; they only rattle the screen
            state.effects.shake_time = SHAKE_TIME;
            state.effects.shake = true;
            state.events.push(GameEvent::SolidBrickHit);
        } else {
            let position = brick.position;
            state.levels[level_index].bricks[i].destroyed = true;
            destroyed_at.push(position);
            state.events.push(GameEvent::BrickDestroyed);
        }

        // Passthrough skips the deflection but not the destruction above
        if !(state.ball.passthrough && !is_solid) {
            resolve_ball_collision(&mut state.ball, &collision);
        }
    }

    for position in destroyed_at {
        spawn_powerups(state, position);
    }
}

/// Falling powerups: off-screen reaping mark and paddle pickup
fn collide_powerups(state: &mut GameState) {
    let mut collected: Vec<PowerupKind> = Vec::new();

    let height = state.height as f32;
    let player = state.player.clone();
    for powerup in &mut state.powerups {
        if powerup.entity.destroyed {
            continue;
        }
        if powerup.entity.position.y >= height {
            // Missed: icon gone, never activated
            powerup.entity.destroyed = true;
        }
        if check_collision(&player, &powerup.entity) {
            powerup.entity.destroyed = true;
            powerup.activated = true;
            collected.push(powerup.kind);
        }
    }

    for kind in collected {
        activate_powerup(state, kind);
        state.events.push(GameEvent::PowerupCollected(kind));
    }
}

/// Ball against the paddle: the distinct bounce algorithm, not the generic
/// AABB resolution. Only checked while the ball is in flight.
fn collide_paddle(state: &mut GameState) {
    let collision = check_ball_collision(&state.ball, &state.player);
    if state.ball.stuck || !collision.hit {
        return;
    }

    let ball = &mut state.ball;
    let center_board = state.player.position.x + state.player.size.x / 2.0;
    let distance = ball.center().x - center_board;
    let percentage = distance / (state.player.size.x / 2.0);

    let old_velocity = ball.entity.velocity;
    ball.entity.velocity.x = INITIAL_BALL_VELOCITY.x * percentage * BOUNCE_STRENGTH;
    // Always bounce upward, with a speed floor so shallow hits still climb
    ball.entity.velocity.y = -(1.5 * old_velocity.y.abs()).max(BOUNCE_MIN_UP_SPEED);
    // Preserve total speed through the bounce
    ball.entity.velocity = ball.entity.velocity.normalize() * old_velocity.length();

    // A sticky ball rides the paddle again instead of flying off
    ball.stuck = ball.sticky;

    state.events.push(GameEvent::PaddleBounce);
}

/// Reverse one velocity axis and push the ball out by the penetration depth
fn resolve_ball_collision(ball: &mut Ball, collision: &Collision) {
    match collision.dir {
        Direction::Left | Direction::Right => {
            ball.entity.velocity.x = -ball.entity.velocity.x;
            let penetration = ball.radius - collision.diff.x.abs();
            if collision.dir == Direction::Left {
                ball.entity.position.x += penetration;
            } else {
                ball.entity.position.x -= penetration;
            }
        }
        Direction::Up | Direction::Down => {
            ball.entity.velocity.y = -ball.entity.velocity.y;
            let penetration = ball.radius - collision.diff.y.abs();
            if collision.dir == Direction::Up {
                ball.entity.position.y -= penetration;
            } else {
                ball.entity.position.y += penetration;
            }
        }
    }
}

/// One independent Bernoulli trial per kind; a single brick may drop several
pub fn spawn_powerups(state: &mut GameState, position: Vec2) {
    for kind in PowerupKind::ALL {
        if state.roll_spawn(kind.spawn_one_in()) {
            state.powerups.push(Powerup::new(kind, position));
        }
    }
}

/// Apply a collected powerup's effect immediately
fn activate_powerup(state: &mut GameState, kind: PowerupKind) {
    match kind {
        PowerupKind::Speed => {
            state.ball.entity.velocity *= BALL_SPEED_BOOST;
        }
        PowerupKind::Sticky => {
            state.ball.sticky = true;
            state.player.color = PowerupKind::Sticky.color();
        }
        PowerupKind::PassThrough => {
            state.ball.passthrough = true;
            state.ball.entity.color = glam::Vec3::new(1.0, 0.5, 0.5);
        }
        PowerupKind::PadSizeIncrease => {
            state.player.size.x += PAD_SIZE_INCREASE;
        }
        PowerupKind::Confuse | PowerupKind::Chaos => {
            state.effects.screen.activate(kind);
        }
    }
}

/// Integrate falling icons, count down active effects, reap spent powerups
pub fn update_powerups(state: &mut GameState, dt: f32) {
    for i in 0..state.powerups.len() {
        let velocity = state.powerups[i].entity.velocity;
        state.powerups[i].entity.position += velocity * dt;

        if !state.powerups[i].activated {
            continue;
        }
        state.powerups[i].duration -= dt;
        if state.powerups[i].duration > 0.0 {
            continue;
        }
        state.powerups[i].activated = false;

        // The effect lapses only when no other powerup of the same kind is
        // still active; speed and pad-size-increase are permanent.
        let kind = state.powerups[i].kind;
        if is_other_active(&state.powerups, kind) {
            continue;
        }
        match kind {
            PowerupKind::Sticky => {
                state.ball.sticky = false;
                state.player.color = glam::Vec3::ONE;
            }
            PowerupKind::PassThrough => {
                state.ball.passthrough = false;
                state.ball.entity.color = glam::Vec3::ONE;
            }
            PowerupKind::Confuse | PowerupKind::Chaos => {
                state.effects.screen.deactivate(kind);
            }
            PowerupKind::Speed | PowerupKind::PadSizeIncrease => {}
        }
    }

    state.powerups.retain(|p| !p.reapable());
}

fn is_other_active(powerups: &[Powerup], kind: PowerupKind) -> bool {
    powerups.iter().any(|p| p.activated && p.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Entity, SpriteKey};
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    fn test_state() -> GameState {
        let mut state = GameState::new(12345).unwrap();
        // Empty out the built-in level so tests place their own bricks; one
        // destructible brick far off-field keeps completion from firing
        let sentinel = Entity::new(
            Vec2::new(0.0, -100.0),
            Vec2::new(10.0, 10.0),
            SpriteKey::Block,
        );
        state.level_mut().bricks = vec![sentinel];
        state
    }

    fn brick_at(x: f32, y: f32) -> Entity {
        Entity::new(Vec2::new(x, y), Vec2::new(60.0, 20.0), SpriteKey::Block)
    }

    #[test]
    fn test_brick_hit_from_above_reverses_y() {
        let mut state = test_state();
        state.ball.stuck = false;
        state.ball.entity.position = Vec2::new(100.0, 100.0);
        state.ball.entity.velocity = Vec2::new(100.0, -350.0);
        state.level_mut().bricks.push(brick_at(90.0, 95.0));

        do_collisions(&mut state);

        let brick = &state.level().bricks[1];
        assert!(brick.destroyed);
        assert_eq!(state.ball.entity.velocity.y, 350.0);
        assert!(state.events.contains(&GameEvent::BrickDestroyed));
    }

    #[test]
    fn test_solid_brick_shakes_and_survives() {
        let mut state = test_state();
        state.ball.stuck = false;
        state.ball.entity.position = Vec2::new(100.0, 100.0);
        state.ball.entity.velocity = Vec2::new(0.0, -350.0);
        let mut solid = brick_at(90.0, 95.0);
        solid.is_solid = true;
        state.level_mut().bricks.push(solid);

        do_collisions(&mut state);

        assert!(!state.level().bricks[1].destroyed);
        assert!(state.effects.shake);
        assert_eq!(state.effects.shake_time, SHAKE_TIME);
        assert_eq!(state.ball.entity.velocity.y, 350.0);
        assert!(state.events.contains(&GameEvent::SolidBrickHit));
    }

    #[test]
    fn test_passthrough_destroys_without_deflecting() {
        let mut state = test_state();
        state.ball.stuck = false;
        state.ball.passthrough = true;
        state.ball.entity.position = Vec2::new(100.0, 100.0);
        state.ball.entity.velocity = Vec2::new(100.0, -350.0);
        state.level_mut().bricks.push(brick_at(90.0, 95.0));

        do_collisions(&mut state);

        assert!(state.level().bricks[1].destroyed);
        // Velocity untouched: the ball sails through
        assert_eq!(state.ball.entity.velocity, Vec2::new(100.0, -350.0));
    }

    #[test]
    fn test_passthrough_still_deflects_off_solid() {
        let mut state = test_state();
        state.ball.stuck = false;
        state.ball.passthrough = true;
        state.ball.entity.position = Vec2::new(100.0, 100.0);
        state.ball.entity.velocity = Vec2::new(0.0, -350.0);
        let mut solid = brick_at(90.0, 95.0);
        solid.is_solid = true;
        state.level_mut().bricks.push(solid);

        do_collisions(&mut state);
        assert_eq!(state.ball.entity.velocity.y, 350.0);
    }

    #[test]
    fn test_paddle_center_bounce_goes_straight_up() {
        let mut state = test_state();
        // Paddle spans x in [350, 450]; hit dead center at x = 400
        state.player.position = Vec2::new(350.0, 580.0);
        state.player.size = Vec2::new(100.0, 20.0);
        state.ball.stuck = false;
        state.ball.entity.position = Vec2::new(400.0 - state.ball.radius, 570.0);
        state.ball.entity.velocity = Vec2::new(100.0, 350.0);
        let old_speed = state.ball.entity.velocity.length();

        do_collisions(&mut state);

        let velocity = state.ball.entity.velocity;
        assert!(velocity.x.abs() < 1e-3);
        assert!(velocity.y < 0.0);
        assert!(velocity.y.abs() >= 250.0);
        // Speed preserved through the bounce
        assert!((velocity.length() - old_speed).abs() < 1e-3);
        assert!(state.events.contains(&GameEvent::PaddleBounce));
    }

    #[test]
    fn test_paddle_edge_bounce_deflects_sideways() {
        let mut state = test_state();
        state.player.position = Vec2::new(350.0, 580.0);
        state.player.size = Vec2::new(100.0, 20.0);
        state.ball.stuck = false;
        // Hit near the right edge
        state.ball.entity.position = Vec2::new(440.0 - state.ball.radius, 570.0);
        state.ball.entity.velocity = Vec2::new(0.0, 350.0);
        let old_speed = state.ball.entity.velocity.length();

        do_collisions(&mut state);

        assert!(state.ball.entity.velocity.x > 0.0);
        assert!(state.ball.entity.velocity.y < 0.0);
        assert!((state.ball.entity.velocity.length() - old_speed).abs() < 1e-3);
    }

    #[test]
    fn test_sticky_ball_resticks_on_paddle() {
        let mut state = test_state();
        state.player.position = Vec2::new(350.0, 580.0);
        state.ball.stuck = false;
        state.ball.sticky = true;
        state.ball.entity.position = Vec2::new(400.0, 570.0);
        state.ball.entity.velocity = Vec2::new(0.0, 350.0);

        do_collisions(&mut state);
        assert!(state.ball.stuck);
    }

    #[test]
    fn test_powerup_pickup_widens_paddle() {
        let mut state = test_state();
        let old_width = state.player.size.x;
        let mut powerup = Powerup::new(PowerupKind::PadSizeIncrease, state.player.position);
        powerup.entity.position = state.player.position;
        state.powerups.push(powerup);

        do_collisions(&mut state);

        assert_eq!(state.player.size.x, old_width + PAD_SIZE_INCREASE);
        let p = &state.powerups[0];
        assert!(p.activated);
        assert!(p.entity.destroyed);
        assert!(
            state
                .events
                .contains(&GameEvent::PowerupCollected(PowerupKind::PadSizeIncrease))
        );
    }

    #[test]
    fn test_missed_powerup_falls_off_and_reaps() {
        let mut state = test_state();
        let mut powerup = Powerup::new(PowerupKind::Speed, Vec2::new(100.0, 100.0));
        powerup.entity.position.y = state.height as f32 + 1.0;
        state.powerups.push(powerup);

        do_collisions(&mut state);
        assert!(state.powerups[0].entity.destroyed);
        assert!(!state.powerups[0].activated);

        update_powerups(&mut state, DT);
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_overlapping_sticky_powerups_expire_in_order() {
        let mut state = test_state();
        state.ball.sticky = true;
        state.player.color = PowerupKind::Sticky.color();

        let mut first = Powerup::new(PowerupKind::Sticky, Vec2::ZERO);
        first.activated = true;
        first.entity.destroyed = true;
        first.duration = 5.0;
        let mut second = first.clone();
        second.duration = 10.0;
        state.powerups.push(first);
        state.powerups.push(second);

        // First expires; the second is still active, so sticky holds
        update_powerups(&mut state, 6.0);
        assert!(state.ball.sticky);
        assert_eq!(state.powerups.len(), 1);

        // Last one expires; effect lapses and the list empties
        update_powerups(&mut state, 5.0);
        assert!(!state.ball.sticky);
        assert_eq!(state.player.color, Vec3::ONE);
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_chaos_expiry_frees_screen_slot() {
        let mut state = test_state();
        state.effects.screen.activate(PowerupKind::Chaos);

        let mut powerup = Powerup::new(PowerupKind::Chaos, Vec2::ZERO);
        powerup.activated = true;
        powerup.entity.destroyed = true;
        powerup.duration = 1.0;
        state.powerups.push(powerup);

        update_powerups(&mut state, 2.0);
        assert_eq!(
            state.effects.screen,
            crate::sim::powerup::ScreenEffect::None
        );
    }

    #[test]
    fn test_spawns_reproducible_for_fixed_seed() {
        let mut a = GameState::new(777).unwrap();
        let mut b = GameState::new(777).unwrap();
        for i in 0..200 {
            let pos = Vec2::new(i as f32, 0.0);
            spawn_powerups(&mut a, pos);
            spawn_powerups(&mut b, pos);
        }
        assert!(!a.powerups.is_empty(), "200 bricks should drop something");
        assert_eq!(a.powerups.len(), b.powerups.len());
        for (pa, pb) in a.powerups.iter().zip(&b.powerups) {
            assert_eq!(pa.kind, pb.kind);
            assert_eq!(pa.entity.position, pb.entity.position);
        }
    }

    #[test]
    fn test_ball_lost_resets_level_and_player() {
        let mut state = GameState::new(5).unwrap();
        state.level_mut().bricks[0].destroyed = true;
        state.ball.stuck = false;
        state.ball.entity.position = Vec2::new(400.0, 601.0);
        state.ball.entity.velocity = Vec2::new(0.0, 100.0);
        state.player.size.x += PAD_SIZE_INCREASE;

        update(&mut state, DT);

        assert!(state.events.contains(&GameEvent::BallLost));
        assert!(state.ball.stuck);
        assert_eq!(state.player.size, PLAYER_SIZE);
        assert!(!state.level().bricks[0].destroyed);
    }

    #[test]
    fn test_level_completion_advances() {
        let mut state = GameState::new(5).unwrap();
        for brick in state.level_mut().bricks.iter_mut() {
            if !brick.is_solid {
                brick.destroyed = true;
            }
        }
        update(&mut state, DT);
        assert!(state.events.contains(&GameEvent::LevelComplete));
        assert_eq!(state.current_level, 1);
        assert_eq!(state.phase, GamePhase::Active);
    }

    #[test]
    fn test_shake_timer_counts_down() {
        let mut state = test_state();
        state.effects.shake_time = 0.05;
        state.effects.shake = true;
        update(&mut state, 0.1);
        assert!(!state.effects.shake);
    }

    #[test]
    fn test_input_moves_paddle_and_stuck_ball() {
        let mut state = GameState::new(5).unwrap();
        let paddle_x = state.player.position.x;
        let ball_x = state.ball.entity.position.x;

        state.set_key(keys::LEFT, true);
        process_input(&mut state, 0.1);
        assert!((state.player.position.x - (paddle_x - 50.0)).abs() < 1e-3);
        assert!((state.ball.entity.position.x - (ball_x - 50.0)).abs() < 1e-3);

        state.set_key(keys::LEFT, false);
        state.set_key(keys::SPACE, true);
        process_input(&mut state, 0.1);
        assert!(!state.ball.stuck);

        // A launched ball no longer follows the paddle
        state.set_key(keys::SPACE, false);
        state.set_key(keys::RIGHT, true);
        let ball_x = state.ball.entity.position.x;
        process_input(&mut state, 0.1);
        assert_eq!(state.ball.entity.position.x, ball_x);
    }
}
