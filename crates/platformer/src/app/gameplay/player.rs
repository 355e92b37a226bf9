use engine::{Rgba, Vec2};

use super::world::Room;

pub(crate) const DEFAULT_SIDE_LENGTH: f32 = 10.0;
pub(crate) const BODY_COLOUR: Rgba = Rgba::BLACK;
pub(crate) const SPIRIT_COLOUR: Rgba = Rgba::WHITE;

/// Spirit size as a fraction of the body side, at rest and once fully freed.
pub(crate) const SPIRIT_RESTING_FRACTION: f32 = 0.7;
pub(crate) const SPIRIT_FREE_FRACTION: f32 = 0.3;
/// Animation stops and snaps to the resting/free size past these fractions.
pub(crate) const SPIRIT_GROWN_THRESHOLD_FRACTION: f32 = 0.675;
pub(crate) const SPIRIT_SHRUNK_THRESHOLD_FRACTION: f32 = 0.35;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Player {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) side_length: f32,
    pub(crate) predicted_next_position: Vec2,
    pub(crate) can_jump: bool,
    pub(crate) gravity_strength: f32,
    pub(crate) free_spirit: bool,
    pub(crate) spirit_size: f32,
    /// Set once a spirit block has been dropped for the current free-spirit hold.
    pub(crate) spirit_block_placed: bool,
    /// Room block the body is sitting inside. Collision skips it until the
    /// body no longer overlaps it.
    pub(crate) inhabited_block: Option<usize>,
}

impl Player {
    pub(crate) fn new(position: Vec2, side_length: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            side_length,
            predicted_next_position: position,
            can_jump: false,
            gravity_strength: 1.0,
            free_spirit: false,
            spirit_size: side_length * SPIRIT_RESTING_FRACTION,
            spirit_block_placed: false,
            inhabited_block: None,
        }
    }

    pub(crate) fn spawn_in(room: &Room) -> Self {
        Self::new(room.center(), DEFAULT_SIDE_LENGTH)
    }

    pub(crate) fn half_side(&self) -> f32 {
        self.side_length / 2.0
    }
}
