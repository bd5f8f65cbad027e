//! Segmenter preview for the admin editor.

use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use parish_core::text;

use crate::error::AppResult;
use crate::response::DataResponse;

/// Request payload for POST /api/v1/render.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub text: Option<String>,
    #[serde(default)]
    pub wrap_as_blocks: bool,
}

/// POST /api/v1/render
///
/// Segment a piece of editor text into the same paragraph/line tree the
/// display surfaces use, so the editor can preview before saving.
/// Null or empty text answers with `null`.
pub async fn render_preview(
    Json(input): Json<RenderRequest>,
) -> AppResult<Json<DataResponse<Value>>> {
    let data = match input.text.as_deref() {
        None => Value::Null,
        Some(raw) => {
            let resolved = text::resolve_escaped_newlines(raw);
            match text::segment(&resolved, input.wrap_as_blocks) {
                Some(tree) => serde_json::to_value(tree).unwrap_or(Value::Null),
                None => Value::Null,
            }
        }
    };

    Ok(Json(DataResponse { data }))
}
