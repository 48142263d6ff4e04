//! Browser bindings: a cube session whose results cross into JavaScript as
//! JSON strings, and a `log` backend writing to the developer console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::error::CubeError;
use crate::session::CubeSession;

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from(format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&message),
            Level::Warn => console::warn_1(&message),
            Level::Info => console::info_1(&message),
            Level::Debug | Level::Trace => console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

#[wasm_bindgen(start)]
pub fn start() {
    // a second instance of the module finds the logger already set
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    let filter = level.parse().unwrap_or(LevelFilter::Info);
    log::set_max_level(filter);
}

fn to_js(err: CubeError) -> JsValue {
    JsValue::from(err.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|err| to_js(err.into()))
}

#[wasm_bindgen]
pub struct WasmCube {
    session: CubeSession,
}

#[wasm_bindgen]
impl WasmCube {
    #[wasm_bindgen(constructor)]
    pub fn new(size: usize) -> Result<WasmCube, JsValue> {
        let session = CubeSession::new(size).map_err(to_js)?;
        Ok(WasmCube { session })
    }

    /// Replaces the cube with a solved one of `size`; returns its snapshot.
    pub fn new_cube(&mut self, size: usize) -> Result<String, JsValue> {
        self.session.new_cube(size).map_err(to_js)?;
        self.state()
    }

    pub fn reset(&mut self) -> Result<String, JsValue> {
        self.session.reset();
        self.state()
    }

    /// Returns the scramble's moves.
    pub fn scramble(&mut self, length: Option<usize>) -> Result<String, JsValue> {
        let moves = self.session.scramble(length).map_err(to_js)?;
        Ok(moves.to_string())
    }

    pub fn apply_move(&mut self, token: &str) -> Result<String, JsValue> {
        self.session.apply_move(token).map_err(to_js)?;
        self.state()
    }

    pub fn apply_moves(&mut self, tokens: &str) -> Result<String, JsValue> {
        self.session.apply_moves(tokens).map_err(to_js)?;
        self.state()
    }

    /// Solves the cube and returns the solution as JSON.
    pub fn solve(&mut self, algorithm: &str) -> Result<String, JsValue> {
        let solution = self.session.solve(algorithm).map_err(to_js)?;
        to_json(&solution)
    }

    /// The cube's snapshot as JSON.
    pub fn state(&self) -> Result<String, JsValue> {
        to_json(&self.session.snapshot())
    }

    pub fn is_solved(&self) -> bool {
        self.session.is_solved()
    }

    pub fn history(&self) -> String {
        self.session.history().to_string()
    }

    pub fn validate(&mut self) -> Result<(), JsValue> {
        self.session.validate().map_err(to_js)
    }

    pub fn save(&self) -> Result<String, JsValue> {
        self.session.save().map_err(to_js)
    }

    pub fn load(&mut self, json: &str) -> Result<String, JsValue> {
        self.session.load(json).map_err(to_js)?;
        self.state()
    }
}
