use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One object as reported by a prefix listing of the store.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Listing entry returned by GET /api/files, download URL included.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UploadResponse {
    pub message: String,
    pub key: String,
    pub name: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub content_type: String,
}

/// Body of DELETE /api/files and POST /api/files/download.
#[derive(Serialize, Deserialize, Validate, Debug)]
pub struct FileKeyRequest {
    #[validate(length(min = 1, message = "File key is required"))]
    pub key: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DownloadUrlResponse {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_entry_serializes_camel_case() {
        let entry = FileEntry {
            key: "files/1-a.txt".to_string(),
            size: 11,
            last_modified: None,
            url: "https://example.com/files/1-a.txt".to_string(),
        };
        let value = serde_json::to_value(entry).unwrap();
        assert!(value.get("lastModified").is_some());
        assert_eq!(value["key"], "files/1-a.txt");
    }

    #[test]
    fn upload_response_renames_type_field() {
        let resp = UploadResponse {
            message: "File uploaded successfully".to_string(),
            key: "files/1-a.txt".to_string(),
            name: "a.txt".to_string(),
            size: 11,
            content_type: "text/plain".to_string(),
        };
        let value = serde_json::to_value(resp).unwrap();
        assert_eq!(value["type"], "text/plain");
    }
}
