//=========================================================================
// Engine
//
// Main entry point and coordinator for the game.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_config()           ├─ creates event loop + channel
//         ├─ with_tick_interval()    ├─ spawns logic thread
//         ├─ with_channel_capacity() ├─ runs platform (blocks)
//         ├─ with_seed()             └─ joins logic thread
//         └─ with_audio()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::audio::{AssetAudio, AudioSink};
use crate::core::game::{ConfigError, GameConfig, GameState};
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use crate::core::CoreSystemsOrchestrator;
use crate::platform::{Platform, ProxyPresenter};

//=== EngineError =========================================================

/// Everything that can stop the game from starting or shutting down cleanly.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid game configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("failed to spawn core thread: {0}")]
    CoreThreadSpawn(#[source] io::Error),

    #[error("core thread panicked")]
    CoreThreadPanicked,
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Config**: [`GameConfig::default()`]
/// - **Tick interval**: 1 second
/// - **Channel capacity**: 128 events
/// - **Audio**: [`AssetAudio`] over `./assets`
/// - **Seed**: none (spawn positions drawn from OS entropy)
///
/// # Examples
///
/// ```no_run
/// use catch_the_objects::EngineBuilder;
///
/// EngineBuilder::new().build()?.run()?;
/// # Ok::<(), catch_the_objects::EngineError>(())
/// ```
///
/// Faster, reproducible game:
/// ```no_run
/// use std::time::Duration;
/// use catch_the_objects::EngineBuilder;
///
/// EngineBuilder::new()
///     .with_tick_interval(Duration::from_millis(250))
///     .with_seed(42)
///     .build()?
///     .run()?;
/// # Ok::<(), catch_the_objects::EngineError>(())
/// ```
pub struct EngineBuilder {
    config: GameConfig,
    tick_interval: Duration,
    channel_capacity: usize,
    seed: Option<u64>,
    audio: Option<Box<dyn AudioSink>>,
    assets_dir: PathBuf,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            tick_interval: Duration::from_secs(1),
            channel_capacity: 128,
            seed: None,
            audio: None,
            assets_dir: PathBuf::from("assets"),
        }
    }

    /// Replaces the game geometry and rule constants.
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the period between ticks.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "Tick interval must be positive");
        self.tick_interval = interval;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Makes spawn positions reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the audio sink. Overrides [`with_assets_dir`](Self::with_assets_dir).
    pub fn with_audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    /// Directory the default [`AssetAudio`] sink looks in.
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Validates the configuration and builds the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the game configuration is unusable.
    pub fn build(self) -> Result<Engine, ConfigError> {
        self.config.validate()?;

        info!(
            "Building engine (tick: {:?}, channel: {}, seed: {:?})",
            self.tick_interval, self.channel_capacity, self.seed
        );

        let state = match self.seed {
            Some(seed) => GameState::with_seed(self.config, seed),
            None => GameState::new(self.config),
        };
        let audio = self
            .audio
            .unwrap_or_else(|| Box::new(AssetAudio::new(self.assets_dir)));

        Ok(Engine {
            state,
            audio,
            tick_interval: self.tick_interval,
            channel_capacity: self.channel_capacity,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Game runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread)
///   │     └─► GameState, InputSystem, AudioSink
///   │
///   └─► Platform (Winit Event Loop)
///         └─► Window, Input Capture, Presentation
///
/// Platform → Core: crossbeam channel (PlatformEvent)
/// Core → Platform: EventLoopProxy (Snapshot)
/// ```
pub struct Engine {
    state: GameState,
    audio: Box<dyn AudioSink>,
    tick_interval: Duration,
    channel_capacity: usize,
}

impl Engine {
    /// Starts the game and blocks until the window is closed.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the event loop (needed for the snapshot proxy)
    /// 2. Creates the platform → core channel
    /// 3. Spawns the logic thread
    /// 4. Runs the platform event loop (blocks here)
    /// 5. On close: `WindowClosed` → logic thread exits → joined
    ///
    /// # Errors
    ///
    /// [`EngineError::Platform`] if the event loop cannot be created or
    /// fails, [`EngineError::CoreThreadSpawn`] if the OS refuses a thread,
    /// [`EngineError::CoreThreadPanicked`] if the logic thread panicked.
    pub fn run(self) -> Result<(), EngineError> {
        info!("Starting engine runtime (tick: {:?})", self.tick_interval);

        //--- 1. Event loop and presenter ---------------------------------
        let event_loop = Platform::create_event_loop()?;
        let presenter = ProxyPresenter::new(event_loop.create_proxy());

        //--- 2. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);
        info!("Channel created (capacity: {})", self.channel_capacity);

        //--- 3. Spawn the core logic thread -------------------------------
        let config = *self.state.config();
        let orchestrator = CoreSystemsOrchestrator::new(self.state, self.audio, Box::new(presenter));
        let core_handle = orchestrator
            .spawn_core_thread(rx, self.tick_interval)
            .map_err(EngineError::CoreThreadSpawn)?;
        info!("Core logic thread spawned");

        //--- 4. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, config.screen_width, config.screen_height);
        let platform_result = platform.run(event_loop);
        if let Err(e) = &platform_result {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 5. Cleanup: wait for logic thread to terminate --------------
        // The platform (and its sender) is gone by now, so the core thread
        // sees a disconnect even if WindowClosed was never sent.
        let joined = core_handle.join();
        match &joined {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(_) => error!("Core thread panicked"),
        }

        platform_result?;
        joined.map_err(|_| EngineError::CoreThreadPanicked)?;

        info!("Engine shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::SilentAudio;
    use crate::core::game::SpawnBand;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.tick_interval, Duration::from_secs(1));
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.seed, None);
        assert_eq!(builder.config, GameConfig::default());
        assert_eq!(builder.assets_dir, PathBuf::from("assets"));
    }

    #[test]
    fn builder_with_tick_interval() {
        let builder = EngineBuilder::new().with_tick_interval(Duration::from_millis(250));
        assert_eq!(builder.tick_interval, Duration::from_millis(250));
    }

    #[test]
    #[should_panic(expected = "Tick interval must be positive")]
    fn builder_with_tick_interval_panics_on_zero() {
        EngineBuilder::new().with_tick_interval(Duration::ZERO);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let config = GameConfig {
            spawn_band: SpawnBand::new(10.0, 5.0),
            ..GameConfig::default()
        };
        let result = EngineBuilder::new().with_config(config).build();
        assert!(matches!(result, Err(ConfigError::InvalidSpawnBand { .. })));
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_tick_interval(Duration::from_millis(500))
            .with_channel_capacity(32)
            .with_seed(9)
            .with_audio(SilentAudio)
            .build()
            .unwrap();

        assert_eq!(engine.tick_interval, Duration::from_millis(500));
        assert_eq!(engine.channel_capacity, 32);
        assert_eq!(engine.state.snapshot().basket_x, 200.0);
    }

    #[test]
    fn same_seed_same_first_object() {
        let a = EngineBuilder::new().with_seed(3).build().unwrap();
        let b = EngineBuilder::new().with_seed(3).build().unwrap();
        assert_eq!(a.state.snapshot().object, b.state.snapshot().object);
    }

    #[test]
    fn engine_error_wraps_config_error() {
        let err = EngineError::from(ConfigError::NotPositive { field: "fall_step", value: 0.0 });
        assert!(err.to_string().contains("fall_step"));
    }
}
