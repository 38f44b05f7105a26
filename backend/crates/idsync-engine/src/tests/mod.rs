mod fakes;
mod property_tests;

use crate::ReconciliationEngine;

use fakes::{FakeCatalog, InMemoryStore};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;

#[track_caller]
pub(crate) fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

/// Engine over a fresh in-memory store and a fully seeded catalog.
pub(crate) fn seeded_engine() -> (ReconciliationEngine, Arc<InMemoryStore>, Arc<FakeCatalog>) {
    let store = Arc::new(InMemoryStore::new());
    let catalog = Arc::new(FakeCatalog::seeded());
    let engine = ReconciliationEngine::new(store.clone(), catalog.clone());
    (engine, store, catalog)
}
