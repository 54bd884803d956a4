use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use std::time::Duration;

use crate::errors::AppError;
use crate::models::file::{DownloadUrlResponse, FileEntry, FileKeyRequest, UploadResponse};
use crate::models::MessageResponse;
use crate::utils::multipart::{read_form, resolve_content_type};
use crate::utils::s3::{object_key, ObjectStore};
use crate::utils::validation::validate_payload;

const FILES_PREFIX: &str = "files/";
const DOWNLOAD_URL_TTL: Duration = Duration::from_secs(3600);

/// POST /api/files — multipart form with a single `file` attachment.
pub async fn upload_file(
    payload: Multipart,
    store: web::Data<dyn ObjectStore>,
) -> Result<HttpResponse, actix_web::Error> {
    let form = read_form(payload).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let key = object_key("files", &file.filename);
    let content_type = resolve_content_type(&file.content_type, &file.data);
    let size = file.data.len() as i64;
    store.put(&key, file.data, &content_type).await?;

    Ok(HttpResponse::Created().json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        key,
        name: file.filename,
        size,
        content_type,
    }))
}

/// GET /api/files — every object under `files/`, each with a presigned
/// download URL. One presign call per object, so this is O(n) round-trips
/// against the store.
pub async fn list_files(
    store: web::Data<dyn ObjectStore>,
) -> Result<HttpResponse, actix_web::Error> {
    let objects = store.list(FILES_PREFIX).await?;

    let mut files = Vec::with_capacity(objects.len());
    for object in objects {
        let url = store.presign(&object.key, DOWNLOAD_URL_TTL).await?;
        files.push(FileEntry {
            key: object.key,
            size: object.size,
            last_modified: object.last_modified,
            url,
        });
    }

    Ok(HttpResponse::Ok().json(files))
}

/// DELETE /api/files — body `{key}`. Unconditional delete, a missing key
/// still succeeds.
pub async fn delete_file(
    body: web::Json<FileKeyRequest>,
    store: web::Data<dyn ObjectStore>,
) -> Result<HttpResponse, actix_web::Error> {
    validate_payload(&*body)?;
    store.delete(&body.key).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "File deleted successfully".to_string(),
    }))
}

/// POST /api/files/download — body `{key}`. The key is not checked for
/// existence; a URL for a missing object fails when dereferenced.
pub async fn download_file(
    body: web::Json<FileKeyRequest>,
    store: web::Data<dyn ObjectStore>,
) -> Result<HttpResponse, actix_web::Error> {
    validate_payload(&*body)?;
    let url = store.presign(&body.key, DOWNLOAD_URL_TTL).await?;

    Ok(HttpResponse::Ok().json(DownloadUrlResponse { url }))
}
