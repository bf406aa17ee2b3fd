//! Reqwest-backed object storage adapter for work photos.
//!
//! Uploads are `PUT` requests against the storage host; the vendor responds
//! with the public URL of the stored object.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::ports::{ObjectStore, ObjectStoreError};

/// Object storage adapter performing HTTPS requests against one endpoint.
pub struct HttpObjectStore {
    client: Client,
    base_url: Url,
    access_token: String,
}

impl HttpObjectStore {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        access_token: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            access_token,
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> ObjectStoreError {
    if error.is_timeout() {
        ObjectStoreError::transport("request timed out")
    } else {
        ObjectStoreError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ObjectStoreError {
    let message = String::from_utf8_lossy(body);
    let trimmed: String = message.chars().take(200).collect();
    ObjectStoreError::status(status.as_u16(), trimmed)
}

#[derive(Debug, Deserialize)]
struct PutResponseDto {
    url: String,
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, ObjectStoreError> {
        let endpoint = self
            .base_url
            .join(path)
            .map_err(|err| ObjectStoreError::transport(format!("invalid object path: {err}")))?;

        let response = self
            .client
            .put(endpoint)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let decoded: PutResponseDto = serde_json::from_slice(body.as_ref())
            .map_err(|err| ObjectStoreError::decode(format!("invalid upload payload: {err}")))?;
        Ok(decoded.url)
    }
}
