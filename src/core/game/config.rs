//=========================================================================
// Game Configuration
//=========================================================================
//
// Screen geometry and update-rule constants for the catch game.
//
// All values are in logical pixels. Defaults match a portrait phone-sized
// screen with the object spawning near the top and falling 50 px per tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== SpawnBand ===========================================================

/// Inclusive horizontal range a freshly spawned object's x is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnBand {
    pub min: f32,
    pub max: f32,
}

impl SpawnBand {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns `true` if `x` lies within the band (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        x >= self.min && x <= self.max
    }

    /// Finite bounds with `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Pulls `x` into the band. Non-finite values land on `min`.
    ///
    /// Never panics; an inverted band pins everything to `max`.
    pub fn clamp(&self, x: f32) -> f32 {
        if !x.is_finite() {
            return self.min;
        }
        x.max(self.min).min(self.max)
    }
}

impl Default for SpawnBand {
    fn default() -> Self {
        Self::new(50.0, 350.0)
    }
}

//=== ConfigError =========================================================

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite positive number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("spawn band is inverted or not finite: {min}..={max}")]
    InvalidSpawnBand { min: f32, max: f32 },
}

//=== GameConfig ==========================================================

/// Geometry and rule constants used by [`GameState`](super::GameState).
///
/// | field                 | default        |
/// |-----------------------|----------------|
/// | `screen_width`        | 400.0          |
/// | `screen_height`       | 800.0          |
/// | `spawn_band`          | 50.0 ..= 350.0 |
/// | `spawn_y`             | 50.0           |
/// | `fall_step`           | 50.0           |
/// | `catch_radius`        | 50.0           |
/// | `catch_band`          | 150.0          |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Logical screen width. The basket starts at half of it.
    pub screen_width: f32,

    /// Logical screen height. An object whose y exceeds it is missed.
    pub screen_height: f32,

    /// Horizontal range for respawned objects.
    pub spawn_band: SpawnBand,

    /// Fixed y of a freshly spawned object.
    pub spawn_y: f32,

    /// Distance the object falls per tick.
    pub fall_step: f32,

    /// Horizontal distance to the basket below which the object is caught.
    pub catch_radius: f32,

    /// Height of the catch band measured up from the bottom of the screen.
    pub catch_band: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 400.0,
            screen_height: 800.0,
            spawn_band: SpawnBand::default(),
            spawn_y: 50.0,
            fall_step: 50.0,
            catch_radius: 50.0,
            catch_band: 150.0,
        }
    }
}

impl GameConfig {
    /// Checks that every value can drive the update rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for non-positive geometry, a non-finite
    /// spawn height, or an inverted spawn band.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        positive("fall_step", self.fall_step)?;
        positive("catch_radius", self.catch_radius)?;
        positive("catch_band", self.catch_band)?;

        if !self.spawn_y.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "spawn_y",
                value: self.spawn_y,
            });
        }

        let band = self.spawn_band;
        if !band.is_valid() {
            return Err(ConfigError::InvalidSpawnBand {
                min: band.min,
                max: band.max,
            });
        }

        Ok(())
    }

    /// The y above which an aligned object counts as caught.
    pub fn catch_threshold(&self) -> f32 {
        self.screen_height - self.catch_band
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn catch_threshold_is_measured_from_bottom() {
        let config = GameConfig::default();
        assert_eq!(config.catch_threshold(), 650.0);
    }

    #[test]
    fn zero_height_is_rejected() {
        let config = GameConfig {
            screen_height: 0.0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "screen_height", value: 0.0 })
        );
    }

    #[test]
    fn inverted_spawn_band_is_rejected() {
        let config = GameConfig {
            spawn_band: SpawnBand::new(300.0, 100.0),
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpawnBand { .. })
        ));
    }

    #[test]
    fn single_point_spawn_band_is_allowed() {
        let config = GameConfig {
            spawn_band: SpawnBand::new(200.0, 200.0),
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn nan_spawn_y_is_rejected() {
        let config = GameConfig {
            spawn_y: f32::NAN,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NotFinite { field: "spawn_y", .. })));
    }

    #[test]
    fn band_clamp_handles_out_of_range_and_nan() {
        let band = SpawnBand::default();
        assert_eq!(band.clamp(10.0), 50.0);
        assert_eq!(band.clamp(1000.0), 350.0);
        assert_eq!(band.clamp(123.0), 123.0);
        assert_eq!(band.clamp(f32::NAN), 50.0);
        assert!(band.contains(50.0));
        assert!(band.contains(350.0));
        assert!(!band.contains(350.5));
    }

    #[test]
    fn inverted_band_clamp_does_not_panic() {
        let band = SpawnBand::new(300.0, 100.0);
        assert!(!band.is_valid());
        assert_eq!(band.clamp(200.0), 100.0);
        assert_eq!(band.clamp(50.0), 100.0);
    }

    #[test]
    fn config_error_display_names_field() {
        let err = ConfigError::NotPositive { field: "fall_step", value: -1.0 };
        assert!(err.to_string().contains("fall_step"));
    }
}
