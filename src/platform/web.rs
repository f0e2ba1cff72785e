//! Browser entry point
//!
//! JS owns the canvas, audio and `requestAnimationFrame`; it forwards key
//! events and frame times here and draws whatever `snapshot()` returns.

use wasm_bindgen::prelude::*;

use crate::highscores::LocalStorageStore;
use crate::platform::input::Controls;
use crate::session::Session;
use crate::settings::Settings;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Rock Belt starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStorageStore>,
    controls: Controls,
    settings: Settings,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            session: Session::new(seed, Tuning::default(), LocalStorageStore::new()),
            controls: Controls::default(),
            settings: Settings::load(),
        }
    }

    /// Returns true if the key is bound, so JS can `preventDefault`
    pub fn key_down(&mut self, code: u32) -> bool {
        self.controls.key_down(code)
    }

    pub fn key_up(&mut self, code: u32) -> bool {
        self.controls.key_up(code)
    }

    /// `KeyboardEvent.key` variants of `key_down`/`key_up`
    pub fn key_down_named(&mut self, key: &str) -> bool {
        self.controls.key_event(key, true)
    }

    pub fn key_up_named(&mut self, key: &str) -> bool {
        self.controls.key_event(key, false)
    }

    /// Drop all held keys (window blur)
    pub fn release_keys(&mut self) {
        self.controls.clear();
    }

    /// Advance by `dt` seconds of wall time. Returns the audible events of
    /// the frame as a JSON array.
    pub fn frame(&mut self, dt: f32) -> Result<String, JsValue> {
        let events = self.session.advance(dt, &self.controls.input());
        let audible = self.settings.audible(&events);
        serde_json::to_string(&audible).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current frame as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        let snapshot = self.session.snapshot().with_overlay(self.settings.overlay());
        serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn high_score(&self) -> u64 {
        self.session.high_score()
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.settings.sound_on = !self.settings.sound_on;
        self.save_settings();
        self.settings.sound_on
    }

    pub fn toggle_music(&mut self) -> bool {
        self.settings.music_on = !self.settings.music_on;
        self.save_settings();
        self.settings.music_on
    }

    pub fn toggle_bounding(&mut self) -> bool {
        self.settings.show_bounding = !self.settings.show_bounding;
        self.save_settings();
        self.settings.show_bounding
    }

    pub fn toggle_center_dot(&mut self) -> bool {
        self.settings.show_center_dot = !self.settings.show_center_dot;
        self.save_settings();
        self.settings.show_center_dot
    }
}

impl WebGame {
    fn save_settings(&self) {
        if let Err(e) = self.settings.save() {
            log::warn!("Could not save settings: {e}");
        }
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
