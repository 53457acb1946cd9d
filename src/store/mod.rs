//! Loading and holding CRS definitions

mod config;
mod linker;
mod crs_store;
mod manager;

#[cfg(test)]
mod tests;

// Re-export key types
pub use self::crs_store::{CrsStore, DEFAULT_DEFINITIONS};
pub use self::manager::CrsManager;
