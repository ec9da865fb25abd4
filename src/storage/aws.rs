//! AWS S3 provider store.
//!
//! Credentials come from the default AWS chain (environment variables, IRSA,
//! instance/task metadata). A custom endpoint points the builder at
//! S3-compatible services such as MinIO; `allow_http` permits talking to them
//! over plain HTTP.

use object_store::aws::{AmazonS3, AmazonS3Builder};

use crate::config::BackendConfig;

pub(crate) fn build(config: &BackendConfig) -> Result<AmazonS3, object_store::Error> {
    let mut builder = AmazonS3Builder::from_env().with_bucket_name(&config.bucket);

    if let Some(region) = &config.region {
        builder = builder.with_region(region);
    }

    if let Some(endpoint) = &config.endpoint {
        builder = builder.with_endpoint(endpoint);
    }

    if config.allow_http {
        builder = builder.with_allow_http(true);
    }

    builder.build()
}
