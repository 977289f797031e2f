use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tuning parameters for the creep decider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreepConfig {
    /// How far before the creep stop point the vehicle should stop, in m.
    pub stop_distance: f64,
    /// Clearance is only checked once the vehicle is closer than this
    /// to the creep stop point, in m.
    pub max_valid_stop_distance: f64,
    /// Obstacles predicted to reach the path this many seconds from now
    /// or later do not block creeping.
    pub min_boundary_t: f64,
    /// An obstacle already on the path and moving with the vehicle is ignored
    /// if it reaches the path sooner than this, in s...
    pub ignore_max_st_min_t: f64,
    /// ...and is further along the path than this, in m.
    pub ignore_min_st_min_s: f64,
    /// The number of consecutive clear cycles needed to finish creeping.
    pub clear_threshold: u32,
    /// Prefix of the stop wall's obstacle identifier.
    pub stop_wall_id_prefix: String,
    /// Suffix of the stop wall's obstacle identifier.
    pub stop_wall_id_suffix: String,
    /// The lateral extent of the stop wall, in m.
    pub stop_wall_width: f64,
}

impl Default for CreepConfig {
    fn default() -> Self {
        Self {
            stop_distance: 0.5,
            max_valid_stop_distance: 2.0,
            min_boundary_t: 6.0,
            ignore_max_st_min_t: 0.1,
            ignore_min_st_min_s: 15.0,
            clear_threshold: 5,
            stop_wall_id_prefix: "CREEP_".to_owned(),
            stop_wall_id_suffix: "SS".to_owned(),
            stop_wall_width: 4.0,
        }
    }
}

impl CreepConfig {
    /// Parses a configuration from JSON. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The identifier given to the stop wall.
    pub fn stop_wall_id(&self) -> String {
        format!("{}{}", self.stop_wall_id_prefix, self.stop_wall_id_suffix)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("stop_distance", self.stop_distance),
            ("max_valid_stop_distance", self.max_valid_stop_distance),
            ("ignore_min_st_min_s", self.ignore_min_st_min_s),
            ("stop_wall_width", self.stop_wall_width),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidDistance { field, value });
            }
        }
        for (field, value) in [
            ("min_boundary_t", self.min_boundary_t),
            ("ignore_max_st_min_t", self.ignore_max_st_min_t),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidTime { field, value });
            }
        }
        if self.clear_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.stop_wall_id_prefix.is_empty() {
            return Err(ConfigError::EmptyIdentifier {
                field: "stop_wall_id_prefix",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CreepConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.stop_wall_id(), "CREEP_SS");
        assert_eq!(config.clear_threshold, 5);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config = CreepConfig::from_json_str(r#"{ "stop_distance": 1.0 }"#).unwrap();
        assert_eq!(config.stop_distance, 1.0);
        assert_eq!(config.min_boundary_t, CreepConfig::default().min_boundary_t);
    }

    #[test]
    fn rejects_bad_values() {
        let config = CreepConfig {
            stop_distance: -1.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDistance {
                field: "stop_distance",
                value: -1.0
            })
        );

        let config = CreepConfig {
            clear_threshold: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroThreshold));

        let config = CreepConfig {
            min_boundary_t: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTime { field: "min_boundary_t", .. })
        ));

        assert!(matches!(
            CreepConfig::from_json_str(r#"{ "stop_distance": "far" }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            CreepConfig::from_json_str(r#"{ "stop_wall_id_prefix": "" }"#),
            Err(ConfigError::EmptyIdentifier { .. })
        ));
    }
}
