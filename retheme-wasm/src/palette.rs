use retheme_core::palette::{all_palette_names, default_palette, named_palette};
use retheme_core::Palette as CorePalette;
use wasm_bindgen::prelude::*;

/// Theme palette used as the only allowed output colors.
#[wasm_bindgen]
pub struct Palette {
    pub(crate) inner: CorePalette,
}

#[wasm_bindgen]
impl Palette {
    /// Create a custom palette from comma separated hex colors ("#RRGGBB" or "#RRGGBBAA").
    #[wasm_bindgen(constructor)]
    pub fn new(hex_list: &str) -> Result<Palette, JsValue> {
        let parts: Vec<&str> = hex_list.split(',').map(str::trim).collect();
        let inner = CorePalette::from_hex_list(parts.as_slice())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            inner: inner.opaque(),
        })
    }

    /// Look up a built-in palette by name.
    #[wasm_bindgen(js_name = named)]
    pub fn named(name: &str) -> Result<Palette, JsValue> {
        named_palette(name)
            .map(|inner| Self { inner })
            .ok_or_else(|| {
                JsValue::from_str(&format!(
                    "Unknown palette '{}'. Available: {}",
                    name,
                    all_palette_names().join(", ")
                ))
            })
    }

    /// Kanagawa: the default 24-color theme.
    #[wasm_bindgen(js_name = kanagawa)]
    pub fn kanagawa() -> Self {
        Self {
            inner: default_palette(),
        }
    }

    #[wasm_bindgen(js_name = nord)]
    pub fn nord() -> Result<Palette, JsValue> {
        Self::named("nord")
    }

    #[wasm_bindgen(js_name = gruvbox)]
    pub fn gruvbox() -> Result<Palette, JsValue> {
        Self::named("gruvbox")
    }

    /// Names of all built-in palettes.
    #[wasm_bindgen(js_name = names)]
    pub fn names() -> js_sys::Array {
        all_palette_names()
            .iter()
            .map(|&name| JsValue::from_str(name))
            .collect()
    }

    /// Colors of this palette as hex strings.
    #[wasm_bindgen(js_name = colors)]
    pub fn colors(&self) -> js_sys::Array {
        self.inner
            .to_hex()
            .iter()
            .map(|hex| JsValue::from_str(hex))
            .collect()
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }
}
