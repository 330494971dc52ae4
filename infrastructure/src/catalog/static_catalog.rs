//! In-memory [`ModelCatalog`] snapshot.

use crate::config::FileCatalogConfig;
use ensemble_application::ModelCatalog;
use ensemble_domain::ModelMeta;

/// Catalog built once at startup from configuration and/or discovery.
///
/// Order is preserved: `list_installed` returns models in the order they
/// were added, which is the dispatch order when a request names no models.
#[derive(Debug, Clone, Default)]
pub struct StaticModelCatalog {
    models: Vec<ModelMeta>,
}

impl StaticModelCatalog {
    pub fn new(models: Vec<ModelMeta>) -> Self {
        let mut catalog = Self::default();
        for model in models {
            catalog.upsert(model);
        }
        catalog
    }

    /// Catalog from `[[catalog.models]]` entries only.
    pub fn from_config(config: &FileCatalogConfig) -> Self {
        Self::new(config.to_models())
    }

    /// Discovered models with configured entries layered on top.
    ///
    /// A configured entry for a discovered id keeps the discovered size when
    /// the config does not give one, and otherwise replaces the entry.
    /// Configured ids the server does not list are added as-is.
    pub fn merged(discovered: Vec<ModelMeta>, config: &FileCatalogConfig) -> Self {
        let mut catalog = Self::new(discovered);
        for entry in &config.models {
            if entry.id.trim().is_empty() {
                continue;
            }
            let mut meta = entry.to_meta();
            if let Some(existing) = catalog.get(&meta.id) {
                if entry.size_bytes == 0 {
                    meta.size_bytes = existing.size_bytes;
                }
                if entry.display_name.is_none() {
                    meta.display_name = existing.display_name;
                }
            }
            catalog.upsert(meta);
        }
        catalog
    }

    /// Insert `meta`, replacing any entry with the same id in place.
    pub fn upsert(&mut self, meta: ModelMeta) {
        match self.models.iter_mut().find(|m| m.id == meta.id) {
            Some(existing) => *existing = meta,
            None => self.models.push(meta),
        }
    }

    pub fn all(&self) -> &[ModelMeta] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl ModelCatalog for StaticModelCatalog {
    fn list_installed(&self) -> Vec<ModelMeta> {
        self.models
            .iter()
            .filter(|m| m.is_installed)
            .cloned()
            .collect()
    }

    fn get(&self, model_id: &str) -> Option<ModelMeta> {
        self.models.iter().find(|m| m.id == model_id).cloned()
    }
}
