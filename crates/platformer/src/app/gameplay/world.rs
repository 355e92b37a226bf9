use engine::{Rgba, Vec2};
use thiserror::Error;

/// Static square obstacle. `position` is the centre, in room units.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Block {
    pub(crate) position: Vec2,
    pub(crate) side_length: f32,
    pub(crate) colour: Rgba,
}

impl Block {
    pub(crate) fn new(position: Vec2, side_length: f32, colour: Rgba) -> Self {
        Self {
            position,
            side_length,
            colour,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Room {
    pub(crate) id: usize,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) objects: Vec<Block>,
}

impl Room {
    pub(crate) fn new(id: usize, width: f32, height: f32, objects: Vec<Block>) -> Self {
        Self {
            id,
            width,
            height,
            objects,
        }
    }

    pub(crate) fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Index of the block centred exactly on `position`.
    pub(crate) fn block_index_at(&self, position: Vec2) -> Option<usize> {
        self.objects
            .iter()
            .position(|block| block.position == position)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Level {
    pub(crate) id: usize,
    pub(crate) rooms: Vec<Room>,
}

impl Level {
    pub(crate) fn new(id: usize, rooms: Vec<Room>) -> Self {
        Self { id, rooms }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum RegistryError {
    #[error("no levels registered")]
    NoLevels,
    #[error("level {level_id} has no rooms")]
    EmptyLevel { level_id: usize },
    #[error("room id {room_id} out of range for level {level_id} ({room_count} rooms)")]
    RoomOutOfRange {
        level_id: usize,
        room_id: usize,
        room_count: usize,
    },
    #[error("level id {level_id} out of range ({level_count} levels)")]
    LevelOutOfRange {
        level_id: usize,
        level_count: usize,
    },
}

/// Checks the shape invariants every registry relies on: at least one level,
/// and at least one room per level.
pub(crate) fn check_registry(levels: &[Level]) -> Result<(), RegistryError> {
    if levels.is_empty() {
        return Err(RegistryError::NoLevels);
    }
    for level in levels {
        if level.rooms.is_empty() {
            return Err(RegistryError::EmptyLevel { level_id: level.id });
        }
    }
    Ok(())
}
