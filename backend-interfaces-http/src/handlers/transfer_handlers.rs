use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use backend_application::commands::import_commands;
use backend_application::queries::export_queries;
use backend_application::AppState;
use backend_domain::{ImportSummary, SheetFormat};

use crate::error::HttpError;
use crate::middleware::{authorize, parse_rows};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

enum ImportBody {
    JsonRows,
    Sheet(SheetFormat),
}

fn classify_body(headers: &HeaderMap) -> Result<ImportBody, HttpError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/json");
    let mime = content_type.split(';').next().unwrap_or("").trim();
    if mime.eq_ignore_ascii_case("application/json") {
        return Ok(ImportBody::JsonRows);
    }
    if mime.eq_ignore_ascii_case("application/octet-stream") {
        return Ok(ImportBody::Sheet(SheetFormat::Xlsx));
    }
    SheetFormat::from_content_type(content_type)
        .map(ImportBody::Sheet)
        .ok_or_else(|| HttpError::BadRequest(format!("unsupported content type '{}'", mime)))
}

pub async fn import_records(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<Json<ImportSummary>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }

    let summary = match classify_body(&headers)? {
        ImportBody::JsonRows => {
            let rows = parse_rows(&headers, &body).map_err(|err| {
                error!("failed to parse import body: {}", err);
                HttpError::BadRequest(err.to_string())
            })?;
            import_commands::import_rows(&state, rows).await?
        }
        ImportBody::Sheet(format) => {
            import_commands::import_spreadsheet(&state, &body, format).await?
        }
    };
    Ok(Json(summary))
}

pub async fn export_records(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let file = export_queries::export_workbook(&state).await?;
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file.file_name))
        .map_err(|err| HttpError::Internal(format!("invalid export file name: {}", err)))?;

    let mut response_headers = HeaderMap::new();
    response_headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(XLSX_CONTENT_TYPE),
    );
    response_headers.insert(header::CONTENT_DISPOSITION, disposition);
    Ok((response_headers, file.bytes).into_response())
}
