//! Handlers for page content.
//!
//! Each content-managed page stores its entire content as one row; these
//! endpoints expose every section of that row through its own read/update
//! pair, plus a whole-record escape hatch for bulk import/export.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use parish_core::pages::{FieldKind, PageId, SectionDef};
use parish_core::text;
use parish_core::types::{PageRecord, SectionView};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Resolve URL slugs to a registered page and section.
fn resolve(page: &str, section: &str) -> Result<(PageId, &'static SectionDef), AppError> {
    let page_id = resolve_page(page)?;
    let def = page_id
        .find_section(section)
        .ok_or_else(|| AppError::NotFound(format!("Page '{page}' has no section '{section}'")))?;
    Ok((page_id, def))
}

fn resolve_page(page: &str) -> Result<PageId, AppError> {
    PageId::from_slug(page).ok_or_else(|| AppError::NotFound(format!("Unknown page '{page}'")))
}

#[derive(Debug, Deserialize)]
pub struct GetSectionQuery {
    /// When true, rich-text fields are replaced by their segmented
    /// paragraph/line tree instead of the raw stored string.
    #[serde(default)]
    pub rendered: bool,
}

/// GET /api/v1/pages/{page}/sections/{section}
///
/// Retrieve one section's view. Pages configured to answer absence with
/// defaults return a fully defaulted view; the others return 404 until
/// their first write.
pub async fn get_section(
    State(state): State<AppState>,
    Path((page, section)): Path<(String, String)>,
    Query(query): Query<GetSectionQuery>,
) -> AppResult<Json<DataResponse<Value>>> {
    let (page_id, def) = resolve(&page, &section)?;
    let mut view = state.store.get_section(page_id, def).await?;

    if query.rendered {
        render_rich_text_fields(def, &mut view);
    }

    Ok(Json(DataResponse {
        data: Value::Object(view),
    }))
}

/// PUT /api/v1/pages/{page}/sections/{section}
///
/// Write one section's view and return the canonical post-write view.
/// The first write to any section of a page creates its row, seeding all
/// other sections with their defaults.
pub async fn put_section(
    State(state): State<AppState>,
    Path((page, section)): Path<(String, String)>,
    Json(input): Json<SectionView>,
) -> AppResult<Json<DataResponse<Value>>> {
    let (page_id, def) = resolve(&page, &section)?;
    let view = state.store.put_section(page_id, def, &input).await?;

    tracing::info!(page = %page_id, section = def.name, "Page section updated");

    Ok(Json(DataResponse {
        data: Value::Object(view),
    }))
}

/// GET /api/v1/pages/{page}
///
/// Full content row for bulk export, keyed by column name.
pub async fn get_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> AppResult<Json<DataResponse<PageRecord>>> {
    let page_id = resolve_page(&page)?;
    let record = state.store.get_record(page_id).await?;

    Ok(Json(DataResponse { data: record }))
}

/// PUT /api/v1/pages/{page}
///
/// Replace the full content row (bulk import). The caller must supply a
/// complete record; no default-filling happens here.
pub async fn put_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
    Json(input): Json<PageRecord>,
) -> AppResult<Json<DataResponse<PageRecord>>> {
    let page_id = resolve_page(&page)?;
    let record = state.store.put_record(page_id, &input).await?;

    tracing::info!(page = %page_id, "Page record replaced");

    Ok(Json(DataResponse { data: record }))
}

/// Replace rich-text string fields with their segmented render tree.
///
/// `null` stands in for empty text so the display surface can skip the
/// field without special-casing empty strings.
fn render_rich_text_fields(def: &SectionDef, view: &mut SectionView) {
    for field in def.fields {
        if field.kind != FieldKind::RichText {
            continue;
        }
        let Some(Value::String(raw)) = view.get(field.view_key) else {
            continue;
        };
        let resolved = text::resolve_escaped_newlines(raw);
        let rendered = match text::segment(&resolved, true) {
            Some(tree) => serde_json::to_value(tree).unwrap_or(Value::Null),
            None => Value::Null,
        };
        view.insert(field.view_key.to_string(), rendered);
    }
}
