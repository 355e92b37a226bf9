use engine::{DisplayTransform, DrawList, Rgba, Vec2};

use super::player::{Player, BODY_COLOUR, SPIRIT_COLOUR};
use super::session::GameSession;
use super::world::Block;

pub(crate) const BORDER_COLOUR: Rgba = Rgba::BLACK;
pub(crate) const ROOM_COLOUR: Rgba = Rgba::WHITE;

/// Borders, then blocks in room order, then the player on top.
pub(crate) fn draw_session(session: &GameSession, draw_list: &mut DrawList) {
    let Some(transform) = session.transform() else {
        return;
    };

    draw_room_background(transform, draw_list);
    for block in &session.current_room().objects {
        draw_block(transform, block, draw_list);
    }
    draw_player(transform, session.player(), draw_list);
}

fn draw_room_background(transform: &DisplayTransform, draw_list: &mut DrawList) {
    let borders = transform.borders();
    draw_list.clear_to(BORDER_COLOUR);
    draw_list.fill_rect(
        borders.left,
        borders.top,
        borders.width(),
        borders.height(),
        ROOM_COLOUR,
    );
}

fn draw_block(transform: &DisplayTransform, block: &Block, draw_list: &mut DrawList) {
    let side = transform.convert_length(block.side_length);
    let center = transform.convert(block.position);
    draw_list.fill_rect(
        center.x - side / 2.0,
        center.y - side / 2.0,
        side,
        side,
        block.colour,
    );
}

fn draw_player(transform: &DisplayTransform, player: &Player, draw_list: &mut DrawList) {
    draw_list.fill_quad(body_corners(transform, player), BODY_COLOUR);
    draw_list.fill_quad(spirit_corners(transform, player), SPIRIT_COLOUR);
}

/// The body leans with horizontal velocity: the bottom edge stays put and
/// the top edge shifts by `velocity.x` scaled to screen units.
pub(crate) fn body_corners(transform: &DisplayTransform, player: &Player) -> [Vec2; 4] {
    let center = transform.convert(player.position);
    let half = transform.convert_length(player.side_length) / 2.0;
    let lean = transform.convert_length(player.velocity.x);
    [
        Vec2::new(center.x - half, center.y + half),
        Vec2::new(center.x + half, center.y + half),
        Vec2::new(center.x + half + lean, center.y - half),
        Vec2::new(center.x - half + lean, center.y - half),
    ]
}

/// The spirit follows the body's lean at its own height inside the body.
pub(crate) fn spirit_corners(transform: &DisplayTransform, player: &Player) -> [Vec2; 4] {
    let center = transform.convert(player.position);
    let half = transform.convert_length(player.spirit_size) / 2.0;
    let lean = transform.convert_length(player.velocity.x);
    let bottom_shift = lean * (player.side_length - player.spirit_size) / (2.0 * player.side_length);
    let top_shift = bottom_shift + lean * player.spirit_size / player.side_length;
    [
        Vec2::new(center.x - half + bottom_shift, center.y + half),
        Vec2::new(center.x + half + bottom_shift, center.y + half),
        Vec2::new(center.x + half + top_shift, center.y - half),
        Vec2::new(center.x - half + top_shift, center.y - half),
    ]
}
