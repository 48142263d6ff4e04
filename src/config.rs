use serde::{Deserialize, Serialize};

use crate::error::CubeError;

/// Knobs for the search engine's fallback tiers and host yielding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOpts {
    /// Pattern applications tried once the exhaustive search runs out of depth
    pub macro_attempts: usize,
    /// Depth of the search re-run after every pattern or random step
    pub retry_depth: usize,
    /// Random steps tried before a stage gives up
    pub random_walk_attempts: usize,
    /// Root branches explored between calls to the search hook
    pub yield_interval: usize,
    /// Seed for the random walk, so failures are reproducible
    pub seed: u64,
}

impl Default for SolverOpts {
    fn default() -> Self {
        SolverOpts {
            macro_attempts: 24,
            retry_depth: 3,
            random_walk_attempts: 300,
            yield_interval: 4,
            seed: 0x5eed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrambleOpts {
    pub default_length: usize,
    /// Fixed seed for reproducible scrambles; entropy when absent
    pub seed: Option<u64>,
}

impl Default for ScrambleOpts {
    fn default() -> Self {
        ScrambleOpts {
            default_length: 25,
            seed: None,
        }
    }
}

/// Everything a session can be configured with, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub solver: SolverOpts,
    pub scramble: ScrambleOpts,
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self, CubeError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_debug_snapshot;

    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = Config::from_json(r#"{ "solver": { "seed": 9 } }"#).unwrap();
        assert_eq!(config.solver.seed, 9);
        assert_eq!(config.solver.macro_attempts, SolverOpts::default().macro_attempts);
        assert_eq!(config.scramble, ScrambleOpts::default());
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_default_config() {
        assert_debug_snapshot!(Config::default(), @r###"
        Config {
            solver: SolverOpts {
                macro_attempts: 24,
                retry_depth: 3,
                random_walk_attempts: 300,
                yield_interval: 4,
                seed: 24301,
            },
            scramble: ScrambleOpts {
                default_length: 25,
                seed: None,
            },
        }
        "###);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Config::from_json("{ \"solver\": 3 }"),
            Err(CubeError::Serialization(_))
        ));
    }
}
