use serde::{Deserialize, Serialize};
use siteflon_core::{CompileOptions, compile_with_diagnostics};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsCompileOptions {
    preserve_new_lines: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompileOutput {
    html: String,
    diagnostics: Vec<JsDiagnostic>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsDiagnostic {
    code: String,
    message: String,
    severity: String,
    range: JsRange,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsRange {
    start_line: usize,
    start_col: usize,
    end_line: usize,
    end_col: usize,
}

/// Full HTML document for `source`.
#[wasm_bindgen]
pub fn convert(source: &str) -> String {
    siteflon_renderer::convert(source, &CompileOptions::default())
}

#[wasm_bindgen]
pub fn compile(source: &str) -> Result<JsValue, JsValue> {
    compile_with_options(source, JsValue::UNDEFINED)
}

#[wasm_bindgen]
pub fn compile_with_options(source: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let options = options_from_js(options)?;
    serde_wasm_bindgen::to_value(&compile_output(source, &options))
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

fn compile_output(source: &str, options: &CompileOptions) -> CompileOutput {
    let result = compile_with_diagnostics(source, options);
    let diagnostics = result
        .diagnostics
        .into_iter()
        .map(|diag| JsDiagnostic {
            code: diag.code.to_string(),
            severity: diag.severity.label().to_string(),
            message: diag.message,
            range: JsRange {
                start_line: diag.range.start.line,
                start_col: diag.range.start.character,
                end_line: diag.range.end.line,
                end_col: diag.range.end.character,
            },
        })
        .collect();
    CompileOutput {
        html: result.html,
        diagnostics,
    }
}

fn options_from_js(value: JsValue) -> Result<CompileOptions, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(CompileOptions::default());
    }
    let parsed: JsCompileOptions =
        serde_wasm_bindgen::from_value(value).map_err(|err| JsValue::from_str(&err.to_string()))?;
    let mut out = CompileOptions::default();
    if let Some(preserve_new_lines) = parsed.preserve_new_lines {
        out.preserve_new_lines = preserve_new_lines;
    }
    Ok(out)
}
