use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tra_core::{Catalog, CoreError, SelectionState, decode_config_text, encode};
use tra_render::{
    JsonStyle, TextRenderOptions, render_decoded_json, render_decoded_text,
    render_full_catalog_json,
};
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WebDecodeOptions {
    pub json_output: bool,
    pub verbose: bool,
}

/// A selection as submitted by the page. Parameters imply enabling.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WebSelection {
    pub checkpoint: Option<String>,
    pub outfit: Option<String>,
    pub enabled: Vec<String>,
    pub parameters: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
struct WebError {
    code: &'static str,
    message: String,
}

#[derive(Debug, Clone, Serialize)]
struct WebErrorPayload {
    code: String,
    message: String,
}

impl WebError {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn invalid_selection(err: CoreError) -> Self {
        Self::new("invalid_selection", err.message)
    }

    fn to_js_value(&self) -> JsValue {
        let payload = WebErrorPayload {
            code: self.code.to_string(),
            message: self.message.clone(),
        };
        serde_wasm_bindgen::to_value(&payload).unwrap_or_else(|_| {
            JsValue::from_str(&format!("{}: {}", payload.code, payload.message))
        })
    }
}

#[wasm_bindgen]
pub fn decode_config(text: &str, options: JsValue) -> Result<String, JsValue> {
    let parsed_options = parse_options(options).map_err(|err| err.to_js_value())?;
    decode_config_impl(text, &parsed_options).map_err(|err| err.to_js_value())
}

#[wasm_bindgen]
pub fn encode_config(selection: JsValue) -> Result<String, JsValue> {
    let selection: WebSelection = serde_wasm_bindgen::from_value(selection).map_err(|err| {
        WebError::new(
            "invalid_selection",
            format!("Failed to parse selection: {err}"),
        )
        .to_js_value()
    })?;
    encode_config_impl(&selection).map_err(|err| err.to_js_value())
}

#[wasm_bindgen]
pub fn catalog_json() -> Result<String, JsValue> {
    to_pretty_json(&render_full_catalog_json(Catalog::builtin())).map_err(|err| err.to_js_value())
}

fn decode_config_impl(text: &str, options: &WebDecodeOptions) -> Result<String, WebError> {
    let decoded = decode_config_text(Some(text), Catalog::builtin());

    if options.json_output {
        return to_pretty_json(&render_decoded_json(&decoded, JsonStyle::CanonicalV1));
    }

    Ok(render_decoded_text(
        &decoded,
        TextRenderOptions {
            verbose: options.verbose,
        },
    ))
}

fn encode_config_impl(selection: &WebSelection) -> Result<String, WebError> {
    let catalog = Catalog::builtin();
    let mut state = SelectionState::new(catalog);

    state
        .set_checkpoint(catalog, selection.checkpoint.as_deref())
        .map_err(WebError::invalid_selection)?;
    state
        .set_outfit(catalog, selection.outfit.as_deref())
        .map_err(WebError::invalid_selection)?;
    for flag in &selection.enabled {
        state
            .set_enabled(catalog, flag, true)
            .map_err(WebError::invalid_selection)?;
    }
    for (flag, value) in &selection.parameters {
        state
            .set_parameter(catalog, flag, value)
            .map_err(WebError::invalid_selection)?;
    }

    Ok(encode(&state, catalog))
}

fn parse_options(options: JsValue) -> Result<WebDecodeOptions, WebError> {
    if options.is_null() || options.is_undefined() {
        return Ok(WebDecodeOptions::default());
    }

    serde_wasm_bindgen::from_value(options).map_err(|err| {
        WebError::new(
            "invalid_options",
            format!("Failed to parse decode options: {err}"),
        )
    })
}

fn to_pretty_json(value: &serde_json::Value) -> Result<String, WebError> {
    serde_json::to_string_pretty(value).map_err(|err| {
        WebError::new(
            "render_failed",
            format!("failed to serialize rendered JSON output: {err}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{WebDecodeOptions, WebSelection, decode_config_impl, encode_config_impl};

    #[test]
    fn decode_config_impl_renders_sheet() {
        let rendered = decode_config_impl("ma3 -NOMAINMENU", &WebDecodeOptions::default())
            .expect("valid line should render");
        assert!(rendered.contains("TOMB RAIDER: ANNIVERSARY"));
        assert!(rendered.contains("Mansion"));
        assert!(!rendered.contains("Rejected Tokens"));
    }

    #[test]
    fn decode_config_impl_can_emit_json() {
        let options = WebDecodeOptions {
            json_output: true,
            ..WebDecodeOptions::default()
        };
        let rendered = decode_config_impl("pu90 -BOGUS\nignored", &options)
            .expect("json output should render");

        let parsed: serde_json::Value =
            serde_json::from_str(&rendered).expect("json output should parse");
        assert_eq!(parsed["ok"], false);
        assert_eq!(parsed["checkpoint"], "pu90");
        assert_eq!(parsed["level_group"], "Peru - City of Vilcabamba");
        assert_eq!(parsed["issues"][0]["token"], "-BOGUS");
    }

    #[test]
    fn encode_config_impl_builds_line() {
        let mut parameters = BTreeMap::new();
        parameters.insert("-FONTNAME".to_string(), "Arial".to_string());
        let selection = WebSelection {
            checkpoint: Some("ma3".to_string()),
            outfit: Some("lara_sport".to_string()),
            enabled: vec!["-NOHEALTH".to_string()],
            parameters,
        };
        assert_eq!(
            encode_config_impl(&selection).expect("selection should encode"),
            "ma3 -NOMAINMENU -PLAYER lara_sport -FONTNAME \"Arial\" -NOHEALTH"
        );
        assert_eq!(
            encode_config_impl(&WebSelection::default()).expect("empty selection"),
            ""
        );
    }

    #[test]
    fn encode_config_impl_rejects_unknown_tokens() {
        let selection = WebSelection {
            checkpoint: Some("ma99".to_string()),
            ..WebSelection::default()
        };
        let err = encode_config_impl(&selection).expect_err("unknown checkpoint should fail");
        assert_eq!(err.code, "invalid_selection");
        assert!(err.message.contains("ma99"));
    }
}
