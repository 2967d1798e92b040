use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use tokio_util::io::ReaderStream;
use tracing::info;

use crate::{
    error::{AppError, Result},
    files::{FileEntry, FileUpload, ValidationError},
    models::ApiResponse,
    AppState,
};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let entries = current_entries(&state).await?;
    let page = state.renderer.render_index(&state.app_name, &entries)?;
    Ok(Html(page))
}

pub async fn list_files(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<FileEntry>>>> {
    let entries = current_entries(&state).await?;
    Ok(Json(ApiResponse::success(entries)))
}

async fn current_entries(state: &AppState) -> Result<Vec<FileEntry>> {
    let files = state.file_manager.list_files().await?;
    Ok(files.iter().map(FileEntry::from).collect())
}

/// Accept the `file` field of a multipart form and store it.
///
/// A request that is not multipart at all, or has no `file` field carrying a
/// filename, has no file part. A `file` field whose filename is empty means
/// the form was submitted without choosing a file.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse> {
    let mut multipart = multipart.map_err(|_| ValidationError::NoFilePart)?;
    let mut file_upload: Option<FileUpload> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        if filename.is_empty() {
            return Err(ValidationError::NoFileSelected.into());
        }

        let data = field.bytes().await?;

        file_upload = Some(FileUpload {
            original_filename: filename,
            data: data.to_vec(),
        });
        break;
    }

    let upload = file_upload.ok_or(ValidationError::NoFilePart)?;
    let stored = state.file_manager.store_file(upload).await?;

    info!("POST /upload - stored {} as {}", stored.category, stored.filename);

    Ok((StatusCode::OK, "File uploaded successfully"))
}

pub async fn download_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let path = state
        .file_manager
        .locate_file(&filename)
        .await?
        .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

    let file = tokio::fs::File::open(&path).await?;
    let length = file.metadata().await?.len();
    let content_type = mime_guess::from_path(&path).first_or_octet_stream();

    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(content_type.as_ref())
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );

    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));

    let body = Body::from_stream(ReaderStream::new(file));

    Ok((StatusCode::OK, headers, body).into_response())
}
