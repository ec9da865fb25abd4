//! Azure Blob Storage provider store.
//!
//! Credentials come from the standard Azure chain (environment variables,
//! managed identity, workload identity in AKS); the container name is the only
//! value taken from our configuration.

use object_store::azure::{MicrosoftAzure, MicrosoftAzureBuilder};

use crate::config::BackendConfig;

pub(crate) fn build(config: &BackendConfig) -> Result<MicrosoftAzure, object_store::Error> {
    MicrosoftAzureBuilder::from_env()
        .with_container_name(&config.bucket)
        .build()
}
