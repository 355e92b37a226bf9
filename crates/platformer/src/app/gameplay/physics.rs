use engine::{InputAction, InputSnapshot, Vec2};

use super::collision;
use super::player::{
    Player, SPIRIT_FREE_FRACTION, SPIRIT_GROWN_THRESHOLD_FRACTION, SPIRIT_RESTING_FRACTION,
    SPIRIT_SHRUNK_THRESHOLD_FRACTION,
};
use super::world::Room;

/// All per-tick constants below are tuned for this step length.
pub(crate) const REFERENCE_TICK_SECONDS: f32 = 1.0 / 60.0;

const HORIZONTAL_ACCELERATION: f32 = 1.5;
const HORIZONTAL_DAMPING: f32 = 1.2;
const HORIZONTAL_REST_SPEED: f32 = 0.5;
const NORMAL_GRAVITY: f32 = 1.0;
const FAST_FALL_GRAVITY: f32 = 2.0;
const GRAVITY_DIVISOR: f32 = 750.0;

pub(crate) const MAX_HORIZONTAL_SPEED: f32 = 10.0;
pub(crate) const MAX_RISE_SPEED: f32 = 10.0;
pub(crate) const MAX_FALL_SPEED: f32 = 50.0;

const SPIRIT_SHRINK_DIVISOR: f32 = 1.2;
const SPIRIT_GROWTH_TARGET: f32 = 10.0;
const SPIRIT_GROWTH_RETENTION: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpiritPhase {
    Resting,
    Shrinking,
    /// Fully shrunk while free spirit is held.
    Settled,
    Growing,
}

/// Ratio of the elapsed step to the reference tick. Bad input falls back to
/// exactly one reference tick.
pub(crate) fn tick_scale(dt_seconds: f32) -> f32 {
    if dt_seconds.is_finite() && dt_seconds > 0.0 {
        dt_seconds / REFERENCE_TICK_SECONDS
    } else {
        1.0
    }
}

pub(crate) fn apply_intent(player: &mut Player, input: &InputSnapshot, scale: f32) {
    let left = input.is_down(InputAction::MoveLeft);
    let right = input.is_down(InputAction::MoveRight);

    if left && !right {
        player.velocity.x -= HORIZONTAL_ACCELERATION * scale;
    } else if right && !left {
        player.velocity.x += HORIZONTAL_ACCELERATION * scale;
    } else if player.velocity.x.abs() > HORIZONTAL_REST_SPEED {
        player.velocity.x /= HORIZONTAL_DAMPING.powf(scale);
    } else {
        player.velocity.x = 0.0;
    }

    if input.is_down(InputAction::Jump) && player.can_jump {
        player.velocity.y = -player.side_length;
        player.can_jump = false;
    }

    player.gravity_strength = if input.is_down(InputAction::FastFall) {
        FAST_FALL_GRAVITY
    } else {
        NORMAL_GRAVITY
    };
}

/// Applies gravity, clamps velocity, and predicts the next position.
pub(crate) fn integrate(player: &mut Player, scale: f32) {
    let gravity = player.gravity_strength * player.side_length * player.side_length / GRAVITY_DIVISOR;
    player.velocity.y += gravity * scale;

    player.velocity.x = player
        .velocity
        .x
        .clamp(-MAX_HORIZONTAL_SPEED, MAX_HORIZONTAL_SPEED);
    player.velocity.y = player.velocity.y.clamp(-MAX_RISE_SPEED, MAX_FALL_SPEED);

    player.predicted_next_position = player.position + player.velocity * scale;
}

/// One physics step: intent, integration, collision, commit.
pub(crate) fn step_player(player: &mut Player, room: &Room, input: &InputSnapshot, dt_seconds: f32) {
    let scale = tick_scale(dt_seconds);
    apply_intent(player, input, scale);
    integrate(player, scale);
    collision::resolve_world_bounds(player, room);
    collision::resolve_blocks(player, &room.objects);
    collision::contain_in_room(player, room);
    player.position = player.predicted_next_position;
}

/// Free-spirit step: the body stays frozen on its grid cell inside the room.
pub(crate) fn step_free_spirit(player: &mut Player, room: &Room) {
    snap_to_grid(player);
    collision::contain_in_room(player, room);
    player.position = player.predicted_next_position;
}

/// Freezes and centres the body on its grid cell.
pub(crate) fn snap_to_grid(player: &mut Player) {
    let side = player.side_length;
    let snap = |value: f32| ((value / side).floor() + 0.5) * side;

    player.velocity = Vec2::ZERO;
    player.position = Vec2::new(snap(player.position.x), snap(player.position.y));
    player.predicted_next_position = player.position;
}

pub(crate) fn animate_spirit(player: &mut Player, scale: f32) -> SpiritPhase {
    let side = player.side_length;
    let free_size = side * SPIRIT_FREE_FRACTION;
    let resting_size = side * SPIRIT_RESTING_FRACTION;

    if player.free_spirit {
        if player.spirit_size <= free_size {
            player.spirit_size = free_size;
            return SpiritPhase::Settled;
        }
        player.spirit_size /= SPIRIT_SHRINK_DIVISOR.powf(scale);
        if player.spirit_size <= side * SPIRIT_SHRUNK_THRESHOLD_FRACTION {
            player.spirit_size = free_size;
            return SpiritPhase::Settled;
        }
        SpiritPhase::Shrinking
    } else {
        if player.spirit_size >= resting_size {
            player.spirit_size = resting_size;
            return SpiritPhase::Resting;
        }
        player.spirit_size = SPIRIT_GROWTH_TARGET
            - (SPIRIT_GROWTH_TARGET - player.spirit_size) * SPIRIT_GROWTH_RETENTION.powf(scale);
        if player.spirit_size >= side * SPIRIT_GROWN_THRESHOLD_FRACTION {
            player.spirit_size = resting_size;
            return SpiritPhase::Resting;
        }
        SpiritPhase::Growing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn held(actions: &[InputAction]) -> InputSnapshot {
        actions
            .iter()
            .fold(InputSnapshot::empty(), |input, action| {
                input.with_action_down(*action, true)
            })
    }

    #[test]
    fn tick_scale_is_relative_to_reference_tick() {
        assert_eq!(tick_scale(REFERENCE_TICK_SECONDS), 1.0);
        assert!((tick_scale(REFERENCE_TICK_SECONDS * 2.0) - 2.0).abs() < EPSILON);
        assert_eq!(tick_scale(0.0), 1.0);
        assert_eq!(tick_scale(-0.5), 1.0);
        assert_eq!(tick_scale(f32::NAN), 1.0);
        assert_eq!(tick_scale(f32::INFINITY), 1.0);
    }

    #[test]
    fn horizontal_intent_accelerates_and_cancels() {
        let mut player = Player::new(Vec2::new(50.0, 50.0), 10.0);
        apply_intent(&mut player, &held(&[InputAction::MoveRight]), 1.0);
        assert_eq!(player.velocity.x, 1.5);
        apply_intent(&mut player, &held(&[InputAction::MoveLeft]), 2.0);
        assert_eq!(player.velocity.x, -1.5);

        // Both held counts as no intent.
        player.velocity.x = 1.2;
        apply_intent(
            &mut player,
            &held(&[InputAction::MoveLeft, InputAction::MoveRight]),
            1.0,
        );
        assert!((player.velocity.x - 1.0).abs() < EPSILON);
    }

    #[test]
    fn damping_snaps_slow_drift_to_rest() {
        let mut player = Player::new(Vec2::new(50.0, 50.0), 10.0);
        player.velocity.x = 0.5;
        apply_intent(&mut player, &InputSnapshot::empty(), 1.0);
        assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn jump_requires_can_jump() {
        let mut player = Player::new(Vec2::new(50.0, 50.0), 10.0);
        apply_intent(&mut player, &held(&[InputAction::Jump]), 1.0);
        assert_eq!(player.velocity.y, 0.0);

        player.can_jump = true;
        apply_intent(&mut player, &held(&[InputAction::Jump]), 1.0);
        assert_eq!(player.velocity.y, -10.0);
        assert!(!player.can_jump);
    }

    #[test]
    fn fast_fall_doubles_gravity() {
        let mut normal = Player::new(Vec2::new(50.0, 50.0), 10.0);
        apply_intent(&mut normal, &InputSnapshot::empty(), 1.0);
        integrate(&mut normal, 1.0);

        let mut fast = Player::new(Vec2::new(50.0, 50.0), 10.0);
        apply_intent(&mut fast, &held(&[InputAction::FastFall]), 1.0);
        integrate(&mut fast, 1.0);

        assert!((normal.velocity.y - 100.0 / 750.0).abs() < EPSILON);
        assert!((fast.velocity.y - 2.0 * normal.velocity.y).abs() < EPSILON);
    }

    #[test]
    fn integrate_clamps_velocity_and_predicts() {
        let mut player = Player::new(Vec2::new(50.0, 50.0), 10.0);
        player.velocity = Vec2::new(-25.0, 80.0);
        integrate(&mut player, 1.0);
        assert_eq!(player.velocity, Vec2::new(-10.0, 50.0));
        assert_eq!(player.predicted_next_position, Vec2::new(40.0, 100.0));
        // Integration never commits the position.
        assert_eq!(player.position, Vec2::new(50.0, 50.0));

        player.velocity = Vec2::new(12.0, -30.0);
        integrate(&mut player, 1.0);
        assert_eq!(player.velocity.x, 10.0);
        assert_eq!(player.velocity.y, -10.0);
    }

    #[test]
    fn snap_to_grid_centres_on_cell() {
        let mut player = Player::new(Vec2::new(153.0, 78.0), 10.0);
        player.velocity = Vec2::new(3.0, -2.0);
        snap_to_grid(&mut player);
        assert_eq!(player.position, Vec2::new(155.0, 75.0));
        assert_eq!(player.velocity, Vec2::ZERO);
        assert_eq!(player.predicted_next_position, player.position);

        // Already centred stays put.
        snap_to_grid(&mut player);
        assert_eq!(player.position, Vec2::new(155.0, 75.0));
    }

    #[test]
    fn free_spirit_cell_stays_inside_room() {
        let room = Room::new(0, 155.0, 100.0, Vec::new());
        let mut player = Player::new(Vec2::new(150.0, 50.0), 10.0);
        step_free_spirit(&mut player, &room);
        assert_eq!(player.position, Vec2::new(150.0, 55.0));
        assert_eq!(player.predicted_next_position, player.position);
    }

    #[test]
    fn spirit_shrinks_then_settles_and_regrows() {
        let mut player = Player::new(Vec2::new(50.0, 50.0), 10.0);
        player.free_spirit = true;

        let mut phases = Vec::new();
        for _ in 0..20 {
            phases.push(animate_spirit(&mut player, 1.0));
        }
        assert_eq!(phases[0], SpiritPhase::Shrinking);
        assert_eq!(phases.last(), Some(&SpiritPhase::Settled));
        assert!((player.spirit_size - 3.0).abs() < EPSILON);

        player.free_spirit = false;
        assert_eq!(animate_spirit(&mut player, 1.0), SpiritPhase::Growing);
        for _ in 0..40 {
            animate_spirit(&mut player, 1.0);
        }
        assert_eq!(animate_spirit(&mut player, 1.0), SpiritPhase::Resting);
        assert!((player.spirit_size - 7.0).abs() < EPSILON);
    }
}
