//! Registry of CRS stores

use std::sync::Arc;
use log::{debug, info};

use crate::coordinate::CoordinateTransformer;
use crate::errors::{CrsError, CrsResult};
use crate::model::CoordinateSystem;
use super::crs_store::CrsStore;

/// Holds every loaded store in order of preference
///
/// Lookups walk the stores in registration order and stop at the first
/// hit. Each store gets its own transformer so cached chains never mix
/// definitions from different providers.
#[derive(Default)]
pub struct CrsManager {
    stores: Vec<(Arc<CrsStore>, Arc<CoordinateTransformer>)>,
}

impl CrsManager {
    pub fn new() -> Self {
        CrsManager { stores: Vec::new() }
    }

    /// Manager holding only the definitions shipped with the crate
    pub fn with_default_store() -> CrsResult<Self> {
        let mut manager = CrsManager::new();
        manager.register(CrsStore::from_default_definitions()?)?;
        Ok(manager)
    }

    /// Add a store with the lowest preference so far
    ///
    /// Fails if a store with the same id is already registered.
    pub fn register(&mut self, store: CrsStore) -> CrsResult<Arc<CrsStore>> {
        if self.store(store.id()).is_some() {
            return Err(CrsError::Configuration(format!(
                "a CRS store with id {} is already registered", store.id()
            )));
        }
        let store = Arc::new(store);
        let transformer = Arc::new(CoordinateTransformer::new(store.clone()));
        info!("Registered CRS store {} ({} systems)", store.id(), store.len());
        self.stores.push((store.clone(), transformer));
        Ok(store)
    }

    /// Store registered under `id`
    pub fn store(&self, id: &str) -> Option<Arc<CrsStore>> {
        self.stores
            .iter()
            .find(|(store, _)| store.id() == id)
            .map(|(store, _)| store.clone())
    }

    /// Ids of all stores, most preferred first
    pub fn store_ids(&self) -> Vec<String> {
        self.stores.iter().map(|(store, _)| store.id().to_string()).collect()
    }

    /// First store that knows `code`
    pub fn store_for(&self, code: &str) -> Option<Arc<CrsStore>> {
        self.stores
            .iter()
            .find(|(store, _)| store.get_crs_by_code(code).is_some())
            .map(|(store, _)| store.clone())
    }

    /// Resolve `code` in the first store that knows it
    pub fn lookup(&self, code: &str) -> Option<Arc<CoordinateSystem>> {
        let found = self.stores.iter().find_map(|(store, _)| store.get_crs_by_code(code));
        if found.is_none() {
            debug!("No registered store knows {}", code);
        }
        found
    }

    /// Transformer bound to the first store that knows `code`
    pub fn transformer_for(&self, code: &str) -> Option<Arc<CoordinateTransformer>> {
        self.stores
            .iter()
            .find(|(store, _)| store.get_crs_by_code(code).is_some())
            .map(|(_, transformer)| transformer.clone())
    }

    /// Transformer of the store registered under `id`
    pub fn transformer(&self, id: &str) -> Option<Arc<CoordinateTransformer>> {
        self.stores
            .iter()
            .find(|(store, _)| store.id() == id)
            .map(|(_, transformer)| transformer.clone())
    }

    /// Drop all stores and their cached transformations
    pub fn destroy(&mut self) {
        debug!("Releasing {} CRS stores", self.stores.len());
        self.stores.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
