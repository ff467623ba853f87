mod animation;
mod browser;
mod color;
mod config;
mod error;
mod field;
mod particle;
mod surface;
mod utils;

use std::str::FromStr;
use wasm_bindgen::prelude::*;

pub use animation::{Animation, FrameStats, LoopState};
pub use browser::BrowserLoop;
pub use color::Color;
pub use config::FieldConfig;
pub use error::{ConfigError, MountError};
pub use field::{connection_opacity, Connection, ParticleField};
pub use particle::Particle;
pub use surface::{CanvasSurface, Surface};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging(log::Level::Info);
}

/// Like `initialize`, with a log level name such as "debug" or "warn".
#[wasm_bindgen]
pub fn initialize_with_log_level(level: &str) -> Result<(), JsValue> {
    let level = log::Level::from_str(level)
        .map_err(|_| JsValue::from_str(&format!("unknown log level `{}`", level)))?;
    utils::set_panic_hook();
    utils::init_logging(level);
    Ok(())
}

/// Handle returned to JS for the animated background. Mounting never throws
/// over a missing canvas or context: the handle is simply inert.
#[wasm_bindgen]
pub struct ParticleBackground {
    driver: Option<BrowserLoop>,
}

#[wasm_bindgen]
impl ParticleBackground {
    pub fn mount(canvas_id: &str) -> ParticleBackground {
        ParticleBackground::attach(canvas_id, FieldConfig::default())
    }

    /// Accepts a JSON object of `FieldConfig` fields; omitted keys keep their defaults.
    pub fn mount_with_config(
        canvas_id: &str,
        config_json: &str,
    ) -> Result<ParticleBackground, JsValue> {
        let config =
            FieldConfig::from_json(config_json).map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(ParticleBackground::attach(canvas_id, config))
    }

    /// Stops the loop for good. Counters keep their final values.
    pub fn unmount(&mut self) {
        if let Some(driver) = self.driver.as_mut() {
            driver.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.driver
            .as_ref()
            .map_or(false, BrowserLoop::is_running)
    }

    pub fn frame_count(&self) -> f64 {
        self.driver
            .as_ref()
            .map_or(0, BrowserLoop::frame_count) as f64
    }

    pub fn frame_rate(&self) -> f64 {
        self.driver.as_ref().map_or(0.0, BrowserLoop::frame_rate)
    }
}

impl ParticleBackground {
    fn attach(canvas_id: &str, config: FieldConfig) -> ParticleBackground {
        let driver = match BrowserLoop::mount(canvas_id, config) {
            Ok(driver) => Some(driver),
            Err(err) => {
                log::debug!("particle background disabled: {}", err);
                None
            }
        };
        ParticleBackground { driver }
    }
}
