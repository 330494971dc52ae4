//! Model catalog port
//!
//! Read-only view of which models exist and which are installed.

use ensemble_domain::ModelMeta;

/// Catalog of known models.
///
/// The use cases only read from the catalog; installation state is owned by
/// whatever adapter backs it.
pub trait ModelCatalog: Send + Sync {
    /// Every model currently marked installed, in catalog order.
    fn list_installed(&self) -> Vec<ModelMeta>;

    /// Look up a single model, installed or not.
    fn get(&self, model_id: &str) -> Option<ModelMeta>;
}
