//=========================================================================
// Catch The Objects: Binary Entry Point
//
// Environment:
//   RUST_LOG          log filter (default: info)
//   CATCH_ASSETS_DIR  directory holding backgroundMusic.mp3 and
//                     catchSound.wav (default: ./assets)
//
// Sound is only played when built with `--features playback`.
//
//=========================================================================

use catch_the_objects::{EngineBuilder, EngineError};

fn main() -> Result<(), EngineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut builder = EngineBuilder::new();
    if let Some(dir) = std::env::var_os("CATCH_ASSETS_DIR") {
        builder = builder.with_assets_dir(dir);
    }

    builder.build()?.run()
}
