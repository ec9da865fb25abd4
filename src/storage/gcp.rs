//! Google Cloud Storage provider store.
//!
//! Credentials follow the Application Default Credentials chain (workload
//! identity in GKE, GOOGLE_APPLICATION_CREDENTIALS, metadata server).

use object_store::gcp::{GoogleCloudStorage, GoogleCloudStorageBuilder};

use crate::config::BackendConfig;

pub(crate) fn build(config: &BackendConfig) -> Result<GoogleCloudStorage, object_store::Error> {
    GoogleCloudStorageBuilder::from_env()
        .with_bucket_name(&config.bucket)
        .build()
}
