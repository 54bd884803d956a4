use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use std::collections::HashMap;

use crate::errors::AppError;

/// A binary attachment pulled out of a multipart form.
pub struct FilePart {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Fully buffered multipart form: text fields by name, plus at most one file.
pub struct FormData {
    pub text: HashMap<String, String>,
    pub file: Option<FilePart>,
}

/// Reads the whole multipart payload into memory. Parts carrying a filename
/// are treated as the attachment; the first one wins, extras are drained and
/// ignored. Everything else is collected as a text field.
pub async fn read_form(mut payload: Multipart) -> Result<FormData, AppError> {
    let mut text = HashMap::new();
    let mut file: Option<FilePart> = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|err| AppError::Validation(format!("Invalid multipart payload: {}", err)))?
    {
        let disposition = field.content_disposition();
        let name = disposition.get_name().unwrap_or_default().to_string();
        let filename = disposition.get_filename().map(|f| f.to_string());
        let content_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_default();

        let mut data = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|err| AppError::Validation(format!("Invalid multipart payload: {}", err)))?
        {
            data.extend_from_slice(&chunk);
        }

        match filename {
            Some(filename) => {
                if file.is_none() {
                    file = Some(FilePart {
                        filename,
                        content_type,
                        data,
                    });
                }
            }
            None => {
                text.insert(name, String::from_utf8_lossy(&data).into_owned());
            }
        }
    }

    Ok(FormData { text, file })
}

/// Keeps the declared content type unless it is missing or the generic
/// octet-stream default, in which case the payload bytes are sniffed.
pub fn resolve_content_type(declared: &str, data: &[u8]) -> String {
    if declared.is_empty() || declared == "application/octet-stream" {
        if let Some(kind) = infer::get(data) {
            return kind.mime_type().to_string();
        }
        return "application/octet-stream".to_string();
    }
    declared.to_string()
}
