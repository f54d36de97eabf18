//! Runtime configuration.
//!
//! Native builds read environment variables at startup; wasm builds can only
//! see values baked in at compile time through `option_env!`.
//!
//! - `EMBRYOLENS_FL_ENDPOINT`: absolute URL of the FL node's execute route.
//! - `EMBRYOLENS_COHORT_SEED`: fixes the mock cohort generator seed.

use tracing::warn;

use crate::cohort::playback::DEFAULT_FPS;

const ENV_FL_ENDPOINT: &str = "EMBRYOLENS_FL_ENDPOINT";
const ENV_COHORT_SEED: &str = "EMBRYOLENS_COHORT_SEED";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub fl_endpoint: String,
    /// `None` draws a fresh seed per launch.
    pub cohort_seed: Option<u64>,
    pub default_playback_fps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fl_endpoint: api::DEFAULT_FL_ENDPOINT.to_string(),
            cohort_seed: None,
            default_playback_fps: DEFAULT_FPS,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        Self::from_lookup(lookup_env)
    }

    /// Build a config from an arbitrary key lookup (used by `load` and tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_FL_ENDPOINT) {
            let trimmed = endpoint.trim();
            if !trimmed.is_empty() {
                config.fl_endpoint = trimmed.to_string();
            }
        }

        if let Some(raw) = lookup(ENV_COHORT_SEED) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => config.cohort_seed = Some(seed),
                Err(err) => warn!("ignoring {ENV_COHORT_SEED}={raw:?}: {err}"),
            }
        }

        config
    }
}

#[cfg(target_arch = "wasm32")]
fn lookup_env(key: &str) -> Option<String> {
    let baked = match key {
        ENV_FL_ENDPOINT => option_env!("EMBRYOLENS_FL_ENDPOINT"),
        ENV_COHORT_SEED => option_env!("EMBRYOLENS_COHORT_SEED"),
        _ => None,
    };
    baked.map(str::to_string)
}

#[cfg(not(target_arch = "wasm32"))]
fn lookup_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.fl_endpoint, api::DEFAULT_FL_ENDPOINT);
    }

    #[test]
    fn reads_endpoint_and_seed() {
        let config = AppConfig::from_lookup(|key| match key {
            "EMBRYOLENS_FL_ENDPOINT" => Some(" http://node:9000/fl/execute ".into()),
            "EMBRYOLENS_COHORT_SEED" => Some("42".into()),
            _ => None,
        });
        assert_eq!(config.fl_endpoint, "http://node:9000/fl/execute");
        assert_eq!(config.cohort_seed, Some(42));
    }

    #[test]
    fn bad_seed_is_ignored() {
        let config = AppConfig::from_lookup(|key| {
            (key == "EMBRYOLENS_COHORT_SEED").then(|| "not-a-number".to_string())
        });
        assert_eq!(config.cohort_seed, None);
    }
}
