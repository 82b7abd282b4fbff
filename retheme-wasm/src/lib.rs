use wasm_bindgen::prelude::*;

mod palette;
mod processor;
mod utils;

pub use palette::Palette;
pub use processor::RethemeProcessor;

/// Initialize the WASM module (sets up panic hook).
#[wasm_bindgen(start)]
pub fn init() {
    utils::set_panic_hook();
}
