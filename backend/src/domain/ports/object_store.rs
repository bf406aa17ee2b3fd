//! Port for the hosted object-storage vendor.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by object storage adapters.
    pub enum ObjectStoreError {
        /// The request never produced a response (timeout, DNS, connect).
        Transport { message: String } =>
            "object store transport failed: {message}",
        /// The vendor answered with a non-success status.
        Status { status: u16, message: String } =>
            "object store returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "object store response could not be decoded: {message}",
    }
}

/// Port for uploading public assets to the storage vendor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `path` and return the public URL.
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, ObjectStoreError>;
}

/// Fixture implementation for testing without the vendor.
///
/// Discards the payload and returns a deterministic URL derived from the
/// path, so tests can assert on the stored URL set.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureObjectStore;

#[async_trait]
impl ObjectStore for FixtureObjectStore {
    async fn put(
        &self,
        path: &str,
        _bytes: &[u8],
        _content_type: &str,
    ) -> Result<String, ObjectStoreError> {
        Ok(format!("https://blob.example.invalid/{path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_url_is_derived_from_the_path() {
        let store = FixtureObjectStore;
        let url = store
            .put("providers/abc/work-photos/0-kitchen.jpg", &[1, 2], "image/jpeg")
            .await
            .expect("fixture put succeeds");
        assert_eq!(
            url,
            "https://blob.example.invalid/providers/abc/work-photos/0-kitchen.jpg"
        );
    }
}
