//! Storage backend abstraction layer.
//!
//! One configured bucket on one provider (AWS S3, Azure Blob Storage, Google
//! Cloud Storage, all via the object_store crate) holds every object this
//! service serves. The [`FileStore`] trait is the narrow contract the handlers
//! need: enumerate keys, fetch, write, delete. [`ObjectStoreBackend`]
//! implements it over any `object_store::ObjectStore`, applying the configured
//! prefix on the way in and stripping it on the way out.

mod aws;
mod azure;
mod gcp;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use object_store::path::Path;
use object_store::ObjectStore;
use std::sync::Arc;

use crate::config::{BackendType, Config};
use crate::metrics;

/// Keys returned by a single enumeration, mirroring the upstream store's
/// single-page limit. Larger buckets list silently truncated.
const LIST_PAGE_LIMIT: usize = 1000;

/// The object-store operations the handlers are built on.
///
/// Implementations report failures as `object_store::Error`; translating those
/// into HTTP responses is the handlers' concern.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Enumerate object keys in the bucket, in the store's order, capped at
    /// one page.
    async fn list_keys(&self) -> Result<Vec<String>, object_store::Error>;

    /// Fetch an object's content by key.
    async fn get(&self, key: &str) -> Result<Bytes, object_store::Error>;

    /// Write (create or overwrite) an object by key.
    async fn put(&self, key: &str, contents: Bytes) -> Result<(), object_store::Error>;

    /// Delete an object by key.
    async fn delete(&self, key: &str) -> Result<(), object_store::Error>;
}

/// [`FileStore`] over any `object_store` implementation.
pub struct ObjectStoreBackend {
    store: Arc<dyn ObjectStore>,
    prefix: Option<Path>,
}

impl ObjectStoreBackend {
    /// Wrap a provider store. The prefix, if any, must itself be a valid
    /// object path.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        prefix: Option<&str>,
    ) -> Result<Self, object_store::Error> {
        let prefix = prefix.map(parse_path).transpose()?;
        Ok(Self { store, prefix })
    }

    /// Map a client key to the full storage path. Keys are used verbatim; the
    /// only rejection is a key that is not a valid object path (empty, `.` or
    /// `..` segments).
    fn full_path(&self, key: &str) -> Result<Path, object_store::Error> {
        let path = parse_path(key)?;
        match &self.prefix {
            Some(prefix) => parse_path(&format!("{}/{}", prefix.as_ref(), path.as_ref())),
            None => Ok(path),
        }
    }

    /// Map a storage location back to the client key, stripping the prefix.
    fn client_key(&self, location: &Path) -> String {
        let raw = location.as_ref();
        match &self.prefix {
            Some(prefix) => raw
                .strip_prefix(prefix.as_ref())
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(raw)
                .to_string(),
            None => raw.to_string(),
        }
    }
}

fn parse_path(key: &str) -> Result<Path, object_store::Error> {
    Path::parse(key).map_err(|source| object_store::Error::InvalidPath { source })
}

#[async_trait]
impl FileStore for ObjectStoreBackend {
    async fn list_keys(&self) -> Result<Vec<String>, object_store::Error> {
        metrics::observe_storage_op("list", async {
            let mut stream = self.store.list(self.prefix.as_ref());
            let mut keys = Vec::new();
            while let Some(meta) = stream.next().await {
                keys.push(self.client_key(&meta?.location));
                if keys.len() >= LIST_PAGE_LIMIT {
                    break;
                }
            }
            Ok(keys)
        })
        .await
    }

    async fn get(&self, key: &str) -> Result<Bytes, object_store::Error> {
        let path = self.full_path(key)?;
        metrics::observe_storage_op("get", async {
            let result = self.store.get(&path).await?;
            result.bytes().await
        })
        .await
    }

    async fn put(&self, key: &str, contents: Bytes) -> Result<(), object_store::Error> {
        let path = self.full_path(key)?;
        metrics::observe_storage_op("put", async {
            self.store.put(&path, contents.into()).await?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<(), object_store::Error> {
        let path = self.full_path(key)?;
        metrics::observe_storage_op("delete", async { self.store.delete(&path).await }).await
    }
}

/// Build the storage handle for the configured backend. Constructed once at
/// startup and shared read-only across requests.
pub fn create_store(config: &Config) -> anyhow::Result<Arc<dyn FileStore>> {
    let store: Arc<dyn ObjectStore> = match config.backend.backend_type {
        BackendType::Aws => Arc::new(aws::build(&config.backend)?),
        BackendType::Azure => Arc::new(azure::build(&config.backend)?),
        BackendType::Gcp => Arc::new(gcp::build(&config.backend)?),
    };

    let backend = ObjectStoreBackend::new(store, config.backend.prefix.as_deref())?;
    Ok(Arc::new(backend))
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    fn backend(prefix: Option<&str>) -> ObjectStoreBackend {
        ObjectStoreBackend::new(Arc::new(InMemory::new()), prefix).unwrap()
    }

    #[tokio::test]
    async fn round_trips_content() {
        let store = backend(None);
        store.put("notes.txt", Bytes::from("hello")).await.unwrap();
        assert_eq!(store.get("notes.txt").await.unwrap(), Bytes::from("hello"));
    }

    #[tokio::test]
    async fn get_missing_key_is_not_found() {
        let store = backend(None);
        let err = store.get("absent.txt").await.unwrap_err();
        assert!(matches!(err, object_store::Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn rejects_traversal_keys() {
        let store = backend(None);
        let err = store.get("../escape.txt").await.unwrap_err();
        assert!(matches!(err, object_store::Error::InvalidPath { .. }));
    }

    #[tokio::test]
    async fn delete_removes_key() {
        let store = backend(None);
        store.put("a.txt", Bytes::from("x")).await.unwrap();
        store.delete("a.txt").await.unwrap();
        assert!(matches!(
            store.get("a.txt").await.unwrap_err(),
            object_store::Error::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn lists_keys_in_store_order() {
        let store = backend(None);
        store.put("b.txt", Bytes::from("2")).await.unwrap();
        store.put("a.txt", Bytes::from("1")).await.unwrap();
        store.put("c/d.txt", Bytes::from("3")).await.unwrap();

        // InMemory enumerates in key order.
        assert_eq!(
            store.list_keys().await.unwrap(),
            vec!["a.txt", "b.txt", "c/d.txt"]
        );
    }

    #[tokio::test]
    async fn empty_bucket_lists_no_keys() {
        let store = backend(None);
        assert!(store.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn prefix_is_invisible_to_clients() {
        let inner: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
        let store = ObjectStoreBackend::new(inner.clone(), Some("tenant/files")).unwrap();
        store.put("report.pdf", Bytes::from("data")).await.unwrap();

        // Stored under the prefix...
        let raw = inner
            .get(&Path::parse("tenant/files/report.pdf").unwrap())
            .await
            .unwrap();
        assert_eq!(raw.bytes().await.unwrap(), Bytes::from("data"));

        // ...but listed and fetched without it.
        assert_eq!(store.list_keys().await.unwrap(), vec!["report.pdf"]);
        assert_eq!(store.get("report.pdf").await.unwrap(), Bytes::from("data"));
    }

    #[tokio::test]
    async fn invalid_prefix_is_rejected_at_construction() {
        let result = ObjectStoreBackend::new(Arc::new(InMemory::new()), Some("a//b"));
        assert!(result.is_err());
    }
}
