//! Engine options and configuration
//!
//! Parsed from an rc-style file: `OPTIONS=` lines holding comma-separated
//! `name:value`, `flag` or `!flag` entries, `#` comments.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combat::HitLocation;
use crate::consts::MAX_FOV_RADIUS;

/// Options error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),
    #[error("Missing value for option '{0}'")]
    MissingValue(String),
}

/// Tunable engine options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreOptions {
    /// Fixed seed; None derives one from the clock
    pub seed: Option<u32>,

    // Generated area sizes
    pub world_width: usize,
    pub world_height: usize,
    pub settlement_width: usize,
    pub settlement_height: usize,
    pub dungeon_width: usize,
    pub dungeon_height: usize,

    // Sight radius per mode (the overworld is always fully visible)
    pub dungeon_fov: i32,
    pub settlement_fov: i32,

    /// Oldest corpses are evicted past this many
    pub corpse_cap: usize,
    /// Decal alpha multiplier per dungeon turn
    pub decal_fade: f32,
    /// Decals fainter than this are removed
    pub decal_min_alpha: f32,
    /// Settlement occupancy index is rebuilt every this many ticks
    pub settlement_stride: u64,
    /// Hour of day at turn 0
    pub start_hour: u32,

    // Debug overrides
    /// Every attack lands on this body part
    pub force_hit: Option<HitLocation>,
    /// Every player hit that is not blocked is a critical
    pub always_crit: bool,
}

impl Default for CoreOptions {
    fn default() -> Self {
        Self {
            seed: None,
            world_width: 48,
            world_height: 24,
            settlement_width: 40,
            settlement_height: 24,
            dungeon_width: 48,
            dungeon_height: 24,
            dungeon_fov: 7,
            settlement_fov: 10,
            corpse_cap: 40,
            decal_fade: 0.9,
            decal_min_alpha: 0.05,
            settlement_stride: 4,
            start_hour: 8,
            force_hit: None,
            always_crit: false,
        }
    }
}

fn parse_value<T: core::str::FromStr>(name: &str, value: &str) -> Result<T, OptionsError> {
    value
        .parse()
        .map_err(|_| OptionsError::InvalidValue(name.to_string(), value.to_string()))
}

fn parse_fov(name: &str, value: &str) -> Result<i32, OptionsError> {
    let radius: i32 = parse_value(name, value)?;
    if !(0..=MAX_FOV_RADIUS).contains(&radius) {
        return Err(OptionsError::InvalidValue(name.to_string(), value.to_string()));
    }
    Ok(radius)
}

impl CoreOptions {
    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::IoError(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    let opt = opt.trim();
                    if !opt.is_empty() {
                        options.parse_option(opt)?;
                    }
                }
            }
        }

        Ok(options)
    }

    /// Parse a single option
    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if let Some((key, value)) = opt.split_once(':') {
            return self.set_option(key.trim(), Some(value.trim()));
        }

        let (negated, name) = match opt.strip_prefix('!') {
            Some(name) => (true, name),
            None => (false, opt),
        };
        self.set_bool_option(name, !negated)
    }

    /// Set a boolean option
    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "always_crit" => self.always_crit = value,
            "seed" | "force_hit" if !value => {
                self.set_option(name, Some("off"))?;
            }
            _ if self.is_value_option(name) => {
                return Err(OptionsError::MissingValue(name.to_string()));
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    fn is_value_option(&self, name: &str) -> bool {
        matches!(
            name,
            "seed"
                | "world_width"
                | "world_height"
                | "settlement_width"
                | "settlement_height"
                | "dungeon_width"
                | "dungeon_height"
                | "dungeon_fov"
                | "settlement_fov"
                | "corpse_cap"
                | "decal_fade"
                | "decal_min_alpha"
                | "settlement_stride"
                | "start_hour"
                | "force_hit"
        )
    }

    /// Set an option with a value
    fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), OptionsError> {
        let value = value.ok_or_else(|| OptionsError::MissingValue(name.to_string()))?;

        match name {
            "seed" => {
                self.seed = match value {
                    "off" | "random" => None,
                    v => Some(parse_value(name, v)?),
                }
            }
            "world_width" => self.world_width = parse_value(name, value)?,
            "world_height" => self.world_height = parse_value(name, value)?,
            "settlement_width" => self.settlement_width = parse_value(name, value)?,
            "settlement_height" => self.settlement_height = parse_value(name, value)?,
            "dungeon_width" => self.dungeon_width = parse_value(name, value)?,
            "dungeon_height" => self.dungeon_height = parse_value(name, value)?,
            "dungeon_fov" => self.dungeon_fov = parse_fov(name, value)?,
            "settlement_fov" => self.settlement_fov = parse_fov(name, value)?,
            "corpse_cap" => self.corpse_cap = parse_value(name, value)?,
            "decal_fade" => {
                let fade: f32 = parse_value(name, value)?;
                if !(0.0..=1.0).contains(&fade) {
                    return Err(OptionsError::InvalidValue(name.to_string(), value.to_string()));
                }
                self.decal_fade = fade;
            }
            "decal_min_alpha" => self.decal_min_alpha = parse_value(name, value)?,
            "settlement_stride" => {
                let stride: u64 = parse_value(name, value)?;
                self.settlement_stride = stride.max(1);
            }
            "start_hour" => {
                let hour: u32 = parse_value(name, value)?;
                if hour >= 24 {
                    return Err(OptionsError::InvalidValue(name.to_string(), value.to_string()));
                }
                self.start_hour = hour;
            }
            "force_hit" => {
                self.force_hit = match value.to_lowercase().as_str() {
                    "off" | "none" => None,
                    v => Some(parse_value(name, v)?),
                }
            }
            "always_crit" => {
                self.always_crit = match value {
                    "1" | "true" | "on" => true,
                    "0" | "false" | "off" => false,
                    _ => {
                        return Err(OptionsError::InvalidValue(
                            name.to_string(),
                            value.to_string(),
                        ));
                    }
                }
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Save options to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        std::fs::write(path, self.to_config_string())
            .map_err(|e| OptionsError::IoError(e.to_string()))
    }

    /// Convert options to config file format
    pub fn to_config_string(&self) -> String {
        let mut lines = vec!["# Wayfarer engine options".to_string(), String::new()];

        if let Some(seed) = self.seed {
            lines.push(format!("OPTIONS=seed:{}", seed));
        }

        lines.push("# Area sizes".to_string());
        lines.push(format!(
            "OPTIONS=world_width:{},world_height:{}",
            self.world_width, self.world_height
        ));
        lines.push(format!(
            "OPTIONS=settlement_width:{},settlement_height:{}",
            self.settlement_width, self.settlement_height
        ));
        lines.push(format!(
            "OPTIONS=dungeon_width:{},dungeon_height:{}",
            self.dungeon_width, self.dungeon_height
        ));

        lines.push("# Simulation".to_string());
        lines.push(format!(
            "OPTIONS=dungeon_fov:{},settlement_fov:{}",
            self.dungeon_fov, self.settlement_fov
        ));
        lines.push(format!(
            "OPTIONS=corpse_cap:{},decal_fade:{},decal_min_alpha:{}",
            self.corpse_cap, self.decal_fade, self.decal_min_alpha
        ));
        lines.push(format!(
            "OPTIONS=settlement_stride:{},start_hour:{}",
            self.settlement_stride, self.start_hour
        ));

        lines.push("# Debug".to_string());
        if let Some(part) = self.force_hit {
            lines.push(format!("OPTIONS=force_hit:{}", part));
        }
        lines.push(format!(
            "OPTIONS={}",
            if self.always_crit { "always_crit" } else { "!always_crit" }
        ));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = CoreOptions::default();
        assert_eq!(opts.seed, None);
        assert_eq!(opts.dungeon_fov, 7);
        assert_eq!(opts.corpse_cap, 40);
        assert!(!opts.always_crit);
    }

    #[test]
    fn test_parse_values_and_flags() {
        let config = "# comment\nOPTIONS=seed:42,dungeon_fov:9\nOPTIONS=always_crit,force_hit:head";
        let opts = CoreOptions::parse_config(config).unwrap();
        assert_eq!(opts.seed, Some(42));
        assert_eq!(opts.dungeon_fov, 9);
        assert!(opts.always_crit);
        assert_eq!(opts.force_hit, Some(HitLocation::Head));
    }

    #[test]
    fn test_negated_flag() {
        let opts = CoreOptions::parse_config("OPTIONS=always_crit,!always_crit").unwrap();
        assert!(!opts.always_crit);
    }

    #[test]
    fn test_unknown_option() {
        let err = CoreOptions::parse_config("OPTIONS=telepathy").unwrap_err();
        assert_eq!(err, OptionsError::UnknownOption("telepathy".to_string()));
    }

    #[test]
    fn test_invalid_value() {
        let err = CoreOptions::parse_config("OPTIONS=dungeon_fov:far").unwrap_err();
        assert_eq!(
            err,
            OptionsError::InvalidValue("dungeon_fov".to_string(), "far".to_string())
        );
        assert!(CoreOptions::parse_config("OPTIONS=start_hour:25").is_err());
        assert!(CoreOptions::parse_config("OPTIONS=force_hit:tail").is_err());
    }

    #[test]
    fn test_fov_out_of_range() {
        let err = CoreOptions::parse_config("OPTIONS=seed:1,dungeon_fov:50000").unwrap_err();
        assert_eq!(
            err,
            OptionsError::InvalidValue("dungeon_fov".to_string(), "50000".to_string())
        );
        assert!(CoreOptions::parse_config("OPTIONS=settlement_fov:-1").is_err());
        let opts = CoreOptions::parse_config("OPTIONS=settlement_fov:0,dungeon_fov:64").unwrap();
        assert_eq!(opts.settlement_fov, 0);
        assert_eq!(opts.dungeon_fov, MAX_FOV_RADIUS);
    }

    #[test]
    fn test_missing_value() {
        let err = CoreOptions::parse_config("OPTIONS=corpse_cap").unwrap_err();
        assert_eq!(err, OptionsError::MissingValue("corpse_cap".to_string()));
    }

    #[test]
    fn test_roundtrip() {
        let opts = CoreOptions {
            seed: Some(7),
            dungeon_fov: 5,
            force_hit: Some(HitLocation::Legs),
            always_crit: true,
            decal_fade: 0.75,
            ..CoreOptions::default()
        };

        let parsed = CoreOptions::parse_config(&opts.to_config_string()).unwrap();
        assert_eq!(parsed, opts);
    }
}
