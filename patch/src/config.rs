use serde::{Deserialize, Serialize};

// DEFAULT_TOLERANCE sits far below the shortest distance between two vertices of a tiling
// with unit long edges, a short edge of about 0.618
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

// Config controls how a Patch recognizes coincident points and how hard it tries to grow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tolerance: f64, // relative coordinate tolerance under which two points are the same vertex
    pub max_retries: Option<usize>, // rolled back placements allowed per growth step, unbounded if None
    pub max_steps: Option<usize>, // random placements committed per call to grow, unbounded if None
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tolerance: DEFAULT_TOLERANCE,
            max_retries: None,
            max_steps: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(DEFAULT_TOLERANCE, config.tolerance);
        assert_eq!(None, config.max_retries);
        assert_eq!(None, config.max_steps);
    }

    #[test]
    fn test_config_deserialize_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"max_retries":25}"#).unwrap();
        assert_eq!(Config { max_retries: Some(25), ..Config::default() }, config);

        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(Config::default(), config);
    }
}
