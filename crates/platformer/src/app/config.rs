use std::path::PathBuf;

use tracing::warn;

use super::gameplay::SessionOptions;

pub(crate) const LEVELS_PATH_ENV_VAR: &str = "SPIRIT_LEVELS_PATH";
pub(crate) const TARGET_TPS_ENV_VAR: &str = "SPIRIT_TARGET_TPS";
pub(crate) const DEV_HACKS_ENV_VAR: &str = "SPIRIT_DEV_HACKS";
pub(crate) const SPAWN_BLOCKS_ENV_VAR: &str = "SPIRIT_SPAWN_BLOCKS";

/// Game-side settings read from the environment at startup. Malformed values
/// are logged and replaced by defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct GameConfig {
    pub(crate) levels_path: Option<PathBuf>,
    pub(crate) target_tps: Option<u32>,
    pub(crate) session: SessionOptions,
}

impl GameConfig {
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let levels_path = lookup(LEVELS_PATH_ENV_VAR)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Self {
            levels_path,
            target_tps: parse_tps(lookup(TARGET_TPS_ENV_VAR)),
            session: SessionOptions {
                dev_hacks: parse_flag(DEV_HACKS_ENV_VAR, lookup(DEV_HACKS_ENV_VAR)),
                spawn_spirit_blocks: parse_flag(
                    SPAWN_BLOCKS_ENV_VAR,
                    lookup(SPAWN_BLOCKS_ENV_VAR),
                ),
            },
        }
    }
}

fn parse_flag(var: &str, raw: Option<String>) -> bool {
    let Some(raw) = raw else {
        return false;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "" | "0" | "false" | "no" | "off" => false,
        other => {
            warn!(var, value = other, "invalid_flag_env_var");
            false
        }
    }
}

fn parse_tps(raw: Option<String>) -> Option<u32> {
    let raw = raw?;
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            warn!(
                var = TARGET_TPS_ENV_VAR,
                value = %raw,
                "invalid_target_tps_env_var"
            );
            None
        }
    }
}
