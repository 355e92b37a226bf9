use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine::{Rgba, Vec2};
use serde::Deserialize;
use thiserror::Error;

use super::player::DEFAULT_SIDE_LENGTH;
use super::world::{Block, Level, Room};

const DEFAULT_BLOCK_COLOUR: Rgba = Rgba::BLACK;

#[derive(Debug, Error)]
pub(crate) enum LevelFileError {
    #[error("failed to read level file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse level file {path} at `{location}`: {source}")]
    Parse {
        path: PathBuf,
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid level file {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelFileDef {
    levels: Vec<LevelDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelDef {
    rooms: Vec<RoomDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoomDef {
    width: f32,
    height: f32,
    #[serde(default)]
    blocks: Vec<BlockDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BlockDef {
    x: f32,
    y: f32,
    side_length: f32,
    #[serde(default = "default_block_colour")]
    colour: Rgba,
}

fn default_block_colour() -> Rgba {
    DEFAULT_BLOCK_COLOUR
}

/// The levels shipped with the game.
pub(crate) fn builtin_levels() -> Vec<Level> {
    let block = |x: f32, y: f32, side_length: f32| {
        Block::new(Vec2::new(x, y), side_length, DEFAULT_BLOCK_COLOUR)
    };
    vec![
        Level::new(
            0,
            vec![
                Room::new(
                    0,
                    300.0,
                    150.0,
                    vec![
                        block(205.0, 115.0, 10.0),
                        block(155.0, 135.0, 10.0),
                        block(150.0, 100.0, 20.0),
                        block(155.0, 85.0, 10.0),
                    ],
                ),
                Room::new(1, 100.0, 100.0, vec![block(50.0, 75.0, 10.0)]),
            ],
        ),
        Level::new(1, vec![Room::new(0, 200.0, 100.0, Vec::new())]),
    ]
}

pub(crate) fn load_level_file(path: &Path) -> Result<Vec<Level>, LevelFileError> {
    let raw = fs::read_to_string(path).map_err(|source| LevelFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_level_document(path, &raw)
}

pub(crate) fn parse_level_document(path: &Path, raw: &str) -> Result<Vec<Level>, LevelFileError> {
    let deserializer = &mut serde_json::Deserializer::from_str(raw);
    let document: LevelFileDef =
        serde_path_to_error::deserialize(deserializer).map_err(|error| {
            LevelFileError::Parse {
                path: path.to_path_buf(),
                location: error.path().to_string(),
                source: error.into_inner(),
            }
        })?;

    let invalid = |message: String| LevelFileError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    if document.levels.is_empty() {
        return Err(invalid("at least one level is required".to_string()));
    }

    let mut levels = Vec::with_capacity(document.levels.len());
    for (level_id, level_def) in document.levels.into_iter().enumerate() {
        if level_def.rooms.is_empty() {
            return Err(invalid(format!("level {level_id} has no rooms")));
        }
        let mut rooms = Vec::with_capacity(level_def.rooms.len());
        for (room_id, room_def) in level_def.rooms.into_iter().enumerate() {
            if !is_positive_finite(room_def.width) || !is_positive_finite(room_def.height) {
                return Err(invalid(format!(
                    "level {level_id} room {room_id} has non-positive size {}x{}",
                    room_def.width, room_def.height
                )));
            }
            if room_def.width < DEFAULT_SIDE_LENGTH || room_def.height < DEFAULT_SIDE_LENGTH {
                return Err(invalid(format!(
                    "level {level_id} room {room_id} is smaller than the player ({}x{})",
                    room_def.width, room_def.height
                )));
            }
            let mut objects = Vec::with_capacity(room_def.blocks.len());
            for (block_index, block_def) in room_def.blocks.into_iter().enumerate() {
                if !is_positive_finite(block_def.side_length)
                    || !block_def.x.is_finite()
                    || !block_def.y.is_finite()
                {
                    return Err(invalid(format!(
                        "level {level_id} room {room_id} block {block_index} has invalid geometry"
                    )));
                }
                objects.push(Block::new(
                    Vec2::new(block_def.x, block_def.y),
                    block_def.side_length,
                    block_def.colour,
                ));
            }
            rooms.push(Room::new(room_id, room_def.width, room_def.height, objects));
        }
        levels.push(Level::new(level_id, rooms));
    }
    Ok(levels)
}

fn is_positive_finite(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::app::gameplay::world::check_registry;

    fn parse(value: serde_json::Value) -> Result<Vec<Level>, LevelFileError> {
        parse_level_document(Path::new("levels.json"), &value.to_string())
    }

    #[test]
    fn builtin_levels_form_a_valid_registry() {
        let levels = builtin_levels();
        assert_eq!(check_registry(&levels), Ok(()));
        assert_eq!(levels[0].rooms.len(), 2);
        for level in &levels {
            for room in &level.rooms {
                for block in &room.objects {
                    assert!(block.position.x > 0.0 && block.position.x < room.width);
                    assert!(block.position.y > 0.0 && block.position.y < room.height);
                }
            }
        }
    }

    #[test]
    fn parses_rooms_blocks_and_default_colour() {
        let levels = parse(json!({
            "levels": [
                { "rooms": [
                    { "width": 300.0, "height": 150.0, "blocks": [
                        { "x": 10.0, "y": 20.0, "side_length": 10.0 },
                        { "x": 30.0, "y": 40.0, "side_length": 5.0, "colour": [200, 10, 10, 255] }
                    ]},
                    { "width": 100.0, "height": 100.0 }
                ]}
            ]
        }))
        .expect("valid document");

        assert_eq!(levels.len(), 1);
        let rooms = &levels[0].rooms;
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[1].id, 1);
        assert!(rooms[1].objects.is_empty());
        assert_eq!(rooms[0].objects[0].colour, Rgba::BLACK);
        assert_eq!(rooms[0].objects[1].colour, Rgba([200, 10, 10, 255]));
        assert_eq!(rooms[0].objects[1].position, Vec2::new(30.0, 40.0));
    }

    #[test]
    fn parse_error_reports_json_path() {
        let error = parse(json!({
            "levels": [ { "rooms": [ { "width": "wide", "height": 10.0 } ] } ]
        }))
        .expect_err("width must be numeric");

        match error {
            LevelFileError::Parse { location, .. } => {
                assert_eq!(location, "levels[0].rooms[0].width");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let error = parse(json!({
            "levels": [ { "rooms": [ { "width": 10.0, "height": 10.0, "gravity": 3 } ] } ]
        }))
        .expect_err("unknown field");
        assert!(matches!(error, LevelFileError::Parse { .. }));
    }

    #[test]
    fn degenerate_geometry_is_invalid() {
        let empty = parse(json!({ "levels": [] })).expect_err("no levels");
        assert!(matches!(empty, LevelFileError::Invalid { .. }));

        let roomless = parse(json!({ "levels": [ { "rooms": [] } ] })).expect_err("no rooms");
        assert!(roomless.to_string().contains("level 0 has no rooms"));

        let flat = parse(json!({
            "levels": [ { "rooms": [ { "width": 10.0, "height": 0.0 } ] } ]
        }))
        .expect_err("zero height");
        assert!(matches!(flat, LevelFileError::Invalid { .. }));

        let dot = parse(json!({
            "levels": [ { "rooms": [ { "width": 10.0, "height": 10.0,
                "blocks": [ { "x": 1.0, "y": 1.0, "side_length": -2.0 } ] } ] } ]
        }))
        .expect_err("negative block");
        assert!(dot.to_string().contains("block 0"));
    }

    #[test]
    fn rooms_smaller_than_the_player_are_invalid() {
        let error = parse(json!({
            "levels": [ { "rooms": [ { "width": 6.0, "height": 6.0 } ] } ]
        }))
        .expect_err("room cannot hold the player");
        assert!(matches!(error, LevelFileError::Invalid { .. }));
        assert!(error.to_string().contains("smaller than the player"));

        let narrow = parse(json!({
            "levels": [ { "rooms": [ { "width": 200.0, "height": 9.5 } ] } ]
        }))
        .expect_err("too short");
        assert!(matches!(narrow, LevelFileError::Invalid { .. }));

        let snug = parse(json!({
            "levels": [ { "rooms": [ { "width": 10.0, "height": 10.0 } ] } ]
        }))
        .expect("exactly player-sized room fits");
        assert_eq!(snug[0].rooms[0].width, 10.0);
    }

    #[test]
    fn loads_level_file_from_disk() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(
            file,
            "{}",
            json!({ "levels": [ { "rooms": [ { "width": 64.0, "height": 32.0 } ] } ] })
        )
        .expect("write");

        let levels = load_level_file(file.path()).expect("load");
        assert_eq!(levels[0].rooms[0].width, 64.0);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = load_level_file(&dir.path().join("absent.json")).expect_err("missing");
        assert!(matches!(error, LevelFileError::Read { .. }));
    }
}
