//! Thin HTTP client over the backend API, intended for presentation layers
//! that do not want to hand-roll requests.

use reqwest::multipart;
use serde::de::DeserializeOwned;
use std::fmt;
use url::Url;

use crate::models::file::{
    DownloadUrlResponse, FileEntry, FileKeyRequest, UploadResponse,
};
use crate::models::user::User;
use crate::models::MessageResponse;

#[derive(Debug)]
pub enum ClientError {
    Url(url::ParseError),
    Http(reqwest::Error),
    Api { status: u16, message: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Url(err) => write!(f, "Invalid base URL: {}", err),
            ClientError::Http(err) => write!(f, "Request failed: {}", err),
            ClientError::Api { status, message } => write!(f, "API error {}: {}", status, message),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Url(err)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(err)
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` should point at the API root, e.g. `http://localhost:3001/api`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Url::parse(base_url)?;
        Ok(ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        if response.status().is_success() {
            return Ok(response.json().await?);
        }
        let status = response.status().as_u16();
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Request failed".to_string());
        Err(ClientError::Api { status, message })
    }

    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        filename: &str,
        picture: Vec<u8>,
        content_type: &str,
    ) -> Result<User, ClientError> {
        let part = multipart::Part::bytes(picture)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = multipart::Form::new()
            .text("name", name.to_string())
            .text("email", email.to_string())
            .part("profilePicture", part);

        let response = self
            .http
            .post(self.endpoint("users"))
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn fetch_users(&self) -> Result<Vec<User>, ClientError> {
        let response = self.http.get(self.endpoint("users")).send().await?;
        Self::decode(response).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<MessageResponse, ClientError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("users/{}", id)))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn upload_file(
        &self,
        filename: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<UploadResponse, ClientError> {
        let part = multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.endpoint("files"))
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn fetch_files(&self) -> Result<Vec<FileEntry>, ClientError> {
        let response = self.http.get(self.endpoint("files")).send().await?;
        Self::decode(response).await
    }

    pub async fn delete_file(&self, key: &str) -> Result<MessageResponse, ClientError> {
        let response = self
            .http
            .delete(self.endpoint("files"))
            .json(&FileKeyRequest {
                key: key.to_string(),
            })
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn download_url(&self, key: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.endpoint("files/download"))
            .json(&FileKeyRequest {
                key: key.to_string(),
            })
            .send()
            .await?;
        let body: DownloadUrlResponse = Self::decode(response).await?;
        Ok(body.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ClientError::Url(_))
        ));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:3001/api/").unwrap();
        assert_eq!(client.endpoint("users"), "http://localhost:3001/api/users");
    }

    #[test]
    fn api_error_display_carries_status_and_message() {
        let err = ClientError::Api {
            status: 404,
            message: "User not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error 404: User not found");
    }
}
