use engine::{LoopConfig, Scene};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::config::GameConfig;
use super::gameplay;
use super::gameplay::levels::{builtin_levels, load_level_file, LevelFileError};
use super::gameplay::world::RegistryError;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    LevelFile(#[from] LevelFileError),
    #[error("level registry rejected: {0}")]
    Registry(#[from] RegistryError),
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();
    info!("=== Spirit Platformer Startup ===");

    wire(GameConfig::from_env())
}

fn wire(game_config: GameConfig) -> Result<AppWiring, BootstrapError> {
    let levels = match &game_config.levels_path {
        Some(path) => {
            let levels = load_level_file(path)?;
            info!(
                path = %path.display(),
                levels = levels.len(),
                "levels_loaded_from_file"
            );
            levels
        }
        None => builtin_levels(),
    };

    let scene = gameplay::build_scene(levels, game_config.session)?;
    let mut config = LoopConfig::default();
    if let Some(target_tps) = game_config.target_tps {
        config.target_tps = target_tps;
    }

    Ok(AppWiring { config, scene })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
