use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{ImageStore, ImageStoreError};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::object_image_store::ObjectImageStore;

pub struct ImageStoreFactory;

impl ImageStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn ImageStore>, ImageStoreError> {
        match settings.provider {
            StorageProviderSetting::Local => {
                let path = PathBuf::from(&settings.local_path);
                let store = ObjectImageStore::local(path, &settings.public_base_url)?;
                Ok(Arc::new(store))
            }
            StorageProviderSetting::Memory => Ok(Arc::new(ObjectImageStore::in_memory(
                &settings.public_base_url,
            ))),
        }
    }
}
