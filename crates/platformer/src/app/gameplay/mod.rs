mod collision;
mod draw;
pub(crate) mod levels;
mod physics;
mod player;
mod session;
pub(crate) mod world;


use engine::{DrawList, InputSnapshot, Scene, Viewport};
use tracing::info;

pub(crate) use session::SessionOptions;

use session::GameSession;
use world::{Level, RegistryError};

pub(crate) fn build_scene(
    levels: Vec<Level>,
    options: SessionOptions,
) -> Result<Box<dyn Scene>, RegistryError> {
    Ok(Box::new(PlatformerScene::new(levels, options)?))
}

pub(crate) struct PlatformerScene {
    session: GameSession,
}

impl PlatformerScene {
    pub(crate) fn new(levels: Vec<Level>, options: SessionOptions) -> Result<Self, RegistryError> {
        Ok(Self {
            session: GameSession::new(levels, options)?,
        })
    }
}

impl Scene for PlatformerScene {
    fn load(&mut self, viewport: Viewport) {
        self.session.set_viewport(viewport);
        let options = self.session.options();
        info!(
            level_id = self.session.current_level_id(),
            room_id = self.session.current_room_id(),
            dev_hacks = options.dev_hacks,
            spawn_spirit_blocks = options.spawn_spirit_blocks,
            "session_started"
        );
    }

    fn resize(&mut self, viewport: Viewport) {
        self.session.set_viewport(viewport);
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) {
        self.session.advance_frame(input, fixed_dt_seconds);
    }

    fn render(&self, draw_list: &mut DrawList) {
        draw::draw_session(&self.session, draw_list);
    }

    fn unload(&mut self) {
        info!(
            level_id = self.session.current_level_id(),
            room_id = self.session.current_room_id(),
            "session_ended"
        );
    }

    fn debug_title(&self) -> Option<String> {
        Some(format!(
            "Spirit Platformer | level {} room {}",
            self.session.current_level_id(),
            self.session.current_room_id()
        ))
    }
}
