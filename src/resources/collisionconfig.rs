//! Collision tuning resource.
//!
//! Holds the knobs of the narrow phase and the sweep solver. Provides safe
//! defaults and methods to load/save an INI file.
//!
//! # Configuration File Format
//!
//! ```ini
//! [collision]
//! mode = sat
//!
//! [sweep]
//! max_collisions = 4
//! time_decay = 0.2
//! contact_skin = 0.01
//!
//! [reflect]
//! boost = 1.05
//! max_speed = 2000
//! min_angle_degrees = 15
//!
//! [contacts]
//! ground_threshold = 0.7
//! ```

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;

use super::collisionmode::CollisionMode;
use crate::error::CollisionError;

const DEFAULT_MAX_SWEEP_COLLISIONS: u32 = 4;
const DEFAULT_SWEEP_TIME_DECAY: f32 = 0.2;
const DEFAULT_CONTACT_SKIN: f32 = 0.01;
const DEFAULT_REFLECT_BOOST: f32 = 1.05;
const DEFAULT_MAX_SPEED: f32 = 2000.0;
const DEFAULT_MIN_ANGLE_DEGREES: f32 = 15.0;
const DEFAULT_GROUND_THRESHOLD: f32 = 0.7;
const DEFAULT_CONFIG_PATH: &str = "./collision.ini";

/// Collision configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct CollisionConfig {
    /// Initial polygon–polygon mode.
    pub mode: CollisionMode,
    /// Sweep iterations allowed per mover per tick.
    pub max_sweep_collisions: u32,
    /// Fraction of the tick removed per sweep collision.
    pub sweep_time_decay: f32,
    /// Distance kept between a swept mover and the surface it hit.
    pub contact_skin: f32,
    /// Speed multiplier applied on every reflective bounce.
    pub reflect_boost: f32,
    /// Speed cap for reflective movers.
    pub max_speed: f32,
    /// Minimum angle kept between a reflective velocity and either axis.
    pub min_angle_degrees: f32,
    /// |normal.y| above which a contact counts as ground/ceiling.
    pub ground_threshold: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            mode: CollisionMode::Sat,
            max_sweep_collisions: DEFAULT_MAX_SWEEP_COLLISIONS,
            sweep_time_decay: DEFAULT_SWEEP_TIME_DECAY,
            contact_skin: DEFAULT_CONTACT_SKIN,
            reflect_boost: DEFAULT_REFLECT_BOOST,
            max_speed: DEFAULT_MAX_SPEED,
            min_angle_degrees: DEFAULT_MIN_ANGLE_DEGREES,
            ground_threshold: DEFAULT_GROUND_THRESHOLD,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing or malformed values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<(), CollisionError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| CollisionError::Config(format!("failed to load config file: {e}")))?;
        self.apply(&config)?;
        info!("Loaded collision config from {:?}: {:?}", self.config_path, self);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, contents: &str) -> Result<(), CollisionError> {
        let mut config = Ini::new();
        config
            .read(contents.to_string())
            .map_err(|e| CollisionError::Config(format!("failed to parse config: {e}")))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), CollisionError> {
        // [collision] section
        if let Some(mode) = config.get("collision", "mode") {
            self.mode = mode.parse().map_err(CollisionError::Config)?;
        }

        // [sweep] section
        if let Some(max) = config.getuint("sweep", "max_collisions").ok().flatten() {
            self.max_sweep_collisions = max as u32;
        }
        if let Some(decay) = config.getfloat("sweep", "time_decay").ok().flatten() {
            self.sweep_time_decay = decay as f32;
        }
        if let Some(skin) = config.getfloat("sweep", "contact_skin").ok().flatten() {
            self.contact_skin = skin as f32;
        }

        // [reflect] section
        if let Some(boost) = config.getfloat("reflect", "boost").ok().flatten() {
            self.reflect_boost = boost as f32;
        }
        if let Some(max_speed) = config.getfloat("reflect", "max_speed").ok().flatten() {
            self.max_speed = max_speed as f32;
        }
        if let Some(angle) = config.getfloat("reflect", "min_angle_degrees").ok().flatten() {
            self.min_angle_degrees = angle as f32;
        }

        // [contacts] section
        if let Some(threshold) = config.getfloat("contacts", "ground_threshold").ok().flatten() {
            self.ground_threshold = threshold as f32;
        }

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), CollisionError> {
        let mut config = Ini::new();

        config.set("collision", "mode", Some(self.mode.to_string()));

        config.set("sweep", "max_collisions", Some(self.max_sweep_collisions.to_string()));
        config.set("sweep", "time_decay", Some(self.sweep_time_decay.to_string()));
        config.set("sweep", "contact_skin", Some(self.contact_skin.to_string()));

        config.set("reflect", "boost", Some(self.reflect_boost.to_string()));
        config.set("reflect", "max_speed", Some(self.max_speed.to_string()));
        config.set(
            "reflect",
            "min_angle_degrees",
            Some(self.min_angle_degrees.to_string()),
        );

        config.set(
            "contacts",
            "ground_threshold",
            Some(self.ground_threshold.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| CollisionError::Config(format!("failed to save config file: {e}")))?;

        info!("Saved collision config to {:?}", self.config_path);

        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}
