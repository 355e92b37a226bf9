use engine::Vec2;

use super::player::Player;
use super::world::{Block, Room};

/// Which face of a block the body ended up against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Face {
    Top,
    Left,
    Right,
    Bottom,
}

/// Centre distance at which two axis-aligned squares touch.
pub(crate) fn contact_distance(body_side: f32, block_side: f32) -> f32 {
    (body_side + block_side) / 2.0
}

/// Touching counts as overlapping.
pub(crate) fn overlaps(center: Vec2, body_side: f32, block: &Block) -> bool {
    let reach = contact_distance(body_side, block.side_length);
    (center.x - block.position.x).abs() <= reach && (center.y - block.position.y).abs() <= reach
}

/// Classifies by centre offset (body minus block). Ties on a diagonal go to
/// the top face first and the bottom face last.
pub(crate) fn classify_face(offset: Vec2) -> Face {
    if -offset.y >= offset.x.abs() {
        Face::Top
    } else if -offset.x > offset.y.abs() {
        Face::Left
    } else if offset.x > offset.y.abs() {
        Face::Right
    } else {
        Face::Bottom
    }
}

/// Clamps the predicted position inside the room. Landing on the floor is
/// the only bound contact that re-arms the jump.
pub(crate) fn resolve_world_bounds(player: &mut Player, room: &Room) {
    player.can_jump = false;
    let half = player.half_side();

    if player.predicted_next_position.y < half {
        if player.velocity.y < 0.0 {
            player.velocity.y = 0.0;
        }
        player.predicted_next_position.y = half;
    } else if player.predicted_next_position.y > room.height - half {
        if player.velocity.y > 0.0 {
            player.velocity.y = 0.0;
        }
        player.predicted_next_position.y = room.height - half;
        player.can_jump = true;
    }

    if player.predicted_next_position.x < half {
        if player.velocity.x < 0.0 {
            player.velocity.x = 0.0;
        }
        player.predicted_next_position.x = half;
    } else if player.predicted_next_position.x > room.width - half {
        if player.velocity.x > 0.0 {
            player.velocity.x = 0.0;
        }
        player.predicted_next_position.x = room.width - half;
    }
}

/// Resolves blocks in room order; each snap feeds the next block's test.
/// The inhabited block is skipped until the body clears it.
/// Returns how many blocks were touched.
pub(crate) fn resolve_blocks(player: &mut Player, blocks: &[Block]) -> usize {
    let mut contacts = 0;
    for (index, block) in blocks.iter().enumerate() {
        if player.inhabited_block == Some(index) {
            continue;
        }
        if !overlaps(player.predicted_next_position, player.side_length, block) {
            continue;
        }
        contacts += 1;

        let reach = contact_distance(player.side_length, block.side_length);
        let offset = player.predicted_next_position - block.position;
        match classify_face(offset) {
            Face::Top => {
                if player.velocity.y > 0.0 {
                    player.velocity.y = 0.0;
                }
                player.predicted_next_position.y = block.position.y - reach;
                player.can_jump = true;
            }
            Face::Left => {
                if player.velocity.x > 0.0 {
                    player.velocity.x = 0.0;
                }
                player.predicted_next_position.x = block.position.x - reach;
            }
            Face::Right => {
                if player.velocity.x < 0.0 {
                    player.velocity.x = 0.0;
                }
                player.predicted_next_position.x = block.position.x + reach;
            }
            Face::Bottom => {
                if player.velocity.y < 0.0 {
                    player.velocity.y = 0.0;
                }
                player.predicted_next_position.y = block.position.y + reach;
            }
        }
    }

    if let Some(index) = player.inhabited_block {
        let center = player.predicted_next_position;
        let still_inside = blocks
            .get(index)
            .is_some_and(|block| overlaps(center, player.side_length, block));
        if !still_inside {
            player.inhabited_block = None;
        }
    }
    contacts
}

/// Final containment after block snaps. Only moves the prediction.
pub(crate) fn contain_in_room(player: &mut Player, room: &Room) {
    let half = player.half_side();
    let predicted = &mut player.predicted_next_position;
    predicted.x = predicted.x.min(room.width - half).max(half);
    predicted.y = predicted.y.min(room.height - half).max(half);
}
