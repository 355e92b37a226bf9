use engine::{DisplayTransform, InputAction, InputSnapshot, Vec2, Viewport};
use tracing::{debug, info, warn};

use super::physics::{self, SpiritPhase};
use super::player::{Player, BODY_COLOUR};
use super::world::{check_registry, Block, Level, RegistryError, Room};

/// Opt-in behaviours that are off for normal play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SessionOptions {
    /// Pause key freezes the simulation and holding the pointer teleports the body.
    pub(crate) dev_hacks: bool,
    /// A settled free spirit leaves a block behind in its cell.
    pub(crate) spawn_spirit_blocks: bool,
}

/// Owns the level registry, the current room selection, the player, and the
/// display transform for the current room.
#[derive(Debug)]
pub(crate) struct GameSession {
    levels: Vec<Level>,
    current_level_id: usize,
    current_room_id: usize,
    player: Player,
    viewport: Option<Viewport>,
    transform: Option<DisplayTransform>,
    options: SessionOptions,
}

impl GameSession {
    pub(crate) fn new(levels: Vec<Level>, options: SessionOptions) -> Result<Self, RegistryError> {
        check_registry(&levels)?;
        let player = Player::spawn_in(&levels[0].rooms[0]);
        Ok(Self {
            levels,
            current_level_id: 0,
            current_room_id: 0,
            player,
            viewport: None,
            transform: None,
            options,
        })
    }

    pub(crate) fn current_level_id(&self) -> usize {
        self.current_level_id
    }

    pub(crate) fn current_room_id(&self) -> usize {
        self.current_room_id
    }

    pub(crate) fn current_level(&self) -> &Level {
        &self.levels[self.current_level_id]
    }

    pub(crate) fn current_room(&self) -> &Room {
        &self.current_level().rooms[self.current_room_id]
    }

    pub(crate) fn player(&self) -> &Player {
        &self.player
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub(crate) fn transform(&self) -> Option<&DisplayTransform> {
        self.transform.as_ref()
    }

    pub(crate) fn options(&self) -> SessionOptions {
        self.options
    }

    pub(crate) fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        self.recompute_transform();
        debug!(
            width = viewport.width,
            height = viewport.height,
            "viewport_changed"
        );
    }

    /// Switches rooms within the current level. The player keeps its
    /// position; the next bounds pass pulls it inside the new room.
    pub(crate) fn load_room(&mut self, room_id: usize) -> Result<&Room, RegistryError> {
        let room_count = self.current_level().rooms.len();
        if room_id >= room_count {
            let error = RegistryError::RoomOutOfRange {
                level_id: self.current_level_id,
                room_id,
                room_count,
            };
            warn!(error = %error, "room_load_rejected");
            return Err(error);
        }

        self.current_room_id = room_id;
        self.player.inhabited_block = None;
        self.recompute_transform();
        let room = self.current_room();
        info!(
            level_id = self.current_level_id,
            room_id = room.id,
            width = room.width,
            height = room.height,
            blocks = room.objects.len(),
            "room_loaded"
        );
        Ok(room)
    }

    /// Switches levels and enters the level's first room.
    pub(crate) fn load_level(&mut self, level_id: usize) -> Result<&Level, RegistryError> {
        let level_count = self.levels.len();
        if level_id >= level_count {
            let error = RegistryError::LevelOutOfRange {
                level_id,
                level_count,
            };
            warn!(error = %error, "level_load_rejected");
            return Err(error);
        }

        self.current_level_id = level_id;
        self.current_room_id = 0;
        self.player.inhabited_block = None;
        self.recompute_transform();
        info!(
            level_id,
            rooms = self.current_level().rooms.len(),
            "level_loaded"
        );
        Ok(self.current_level())
    }

    /// Next room, else the next level's first room, else back to level 0.
    pub(crate) fn cycle_room(&mut self) -> Result<(), RegistryError> {
        let next_room = self.current_room_id + 1;
        let next_level = self.current_level_id + 1;
        if next_room < self.current_level().rooms.len() {
            self.load_room(next_room).map(|_| ())
        } else if next_level < self.levels.len() {
            self.load_level(next_level).map(|_| ())
        } else {
            self.load_level(0).map(|_| ())
        }
    }

    /// Runs one fixed step of the game against the current room.
    pub(crate) fn advance_frame(&mut self, input: &InputSnapshot, dt_seconds: f32) {
        if let Some(viewport) = input.viewport() {
            if self.viewport != Some(viewport) {
                self.set_viewport(viewport);
            }
        }

        if input.next_room_pressed() {
            if let Err(error) = self.cycle_room() {
                debug!(error = %error, "room_cycle_skipped");
            }
        }

        if self.options.dev_hacks {
            if input.is_down(InputAction::Pause) {
                return;
            }
            if input.pointer_down() {
                self.teleport_to_pointer(input);
            }
        }

        let scale = physics::tick_scale(dt_seconds);
        self.player.free_spirit = input.is_down(InputAction::FreeSpirit);
        if !self.player.free_spirit {
            self.player.spirit_block_placed = false;
        }

        let room = &self.levels[self.current_level_id].rooms[self.current_room_id];
        if self.player.free_spirit {
            physics::step_free_spirit(&mut self.player, room);
        } else {
            physics::step_player(&mut self.player, room, input, dt_seconds);
        }

        let phase = physics::animate_spirit(&mut self.player, scale);
        if phase == SpiritPhase::Settled && self.options.spawn_spirit_blocks {
            self.place_spirit_block();
        }
    }

    fn teleport_to_pointer(&mut self, input: &InputSnapshot) {
        let (Some(transform), Some(cursor)) = (self.transform.as_ref(), input.cursor_position_px())
        else {
            return;
        };
        let target = transform.inverse(cursor);
        if !target.is_finite() {
            return;
        }
        self.player.position = target;
        self.player.predicted_next_position = target;
        self.player.velocity = Vec2::ZERO;
    }

    /// Drops one block per free-spirit hold, never onto an occupied cell.
    /// The body starts out inside whichever block holds its cell.
    fn place_spirit_block(&mut self) {
        if self.player.spirit_block_placed {
            return;
        }
        self.player.spirit_block_placed = true;

        let position = self.player.position;
        let side_length = self.player.side_length;
        let level_id = self.current_level_id;
        let room_id = self.current_room_id;
        let room = &mut self.levels[level_id].rooms[room_id];
        if let Some(index) = room.block_index_at(position) {
            self.player.inhabited_block = Some(index);
            return;
        }
        room.objects.push(Block::new(position, side_length, BODY_COLOUR));
        self.player.inhabited_block = Some(room.objects.len() - 1);
        info!(
            level_id,
            room_id,
            x = position.x,
            y = position.y,
            "spirit_block_placed"
        );
    }

    /// Keeps the last valid transform when the new one is rejected.
    fn recompute_transform(&mut self) {
        let Some(viewport) = self.viewport else {
            return;
        };
        let room = self.current_room();
        match DisplayTransform::for_viewport(viewport, room.width, room.height) {
            Ok(transform) => self.transform = Some(transform),
            Err(error) => warn!(error = %error, "transform_recompute_rejected"),
        }
    }
}
