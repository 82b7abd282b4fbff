use retheme_core::pipeline::retheme_bytes;
use wasm_bindgen::prelude::*;

use crate::palette::Palette;
use crate::utils::console_log;

/// Main image processor for retheme.
#[wasm_bindgen]
pub struct RethemeProcessor;

#[wasm_bindgen]
impl RethemeProcessor {
    /// Recolor an image to the nearest colors of `palette`.
    ///
    /// # Arguments
    /// * `image_bytes` - Input image as byte array (PNG, JPEG, WebP, etc.)
    /// * `palette` - Palette to map onto
    ///
    /// # Returns
    /// PNG-encoded image bytes
    #[wasm_bindgen(js_name = processImage)]
    pub fn process_image(image_bytes: &[u8], palette: &Palette) -> Result<Vec<u8>, JsValue> {
        console_log!(
            "retheme: {} input bytes, {} palette colors",
            image_bytes.len(),
            palette.inner.len()
        );

        retheme_bytes(image_bytes, &palette.inner)
            .map_err(|e| JsValue::from_str(&format!("Failed to process image: {}", e)))
    }
}
