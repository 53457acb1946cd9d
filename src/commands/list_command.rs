//! Listing of known coordinate systems

use std::sync::Arc;
use clap::ArgMatches;

use crate::commands::command_traits::Command;
use crate::errors::{CrsError, CrsResult};
use crate::store::CrsManager;
use crate::utils::logger::Logger;

/// Command listing the systems of one or all stores
pub struct ListCommand<'a> {
    /// Restrict the listing to this store
    store: Option<String>,
    manager: Arc<CrsManager>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ListCommand<'a> {
    pub fn new(args: &ArgMatches, manager: Arc<CrsManager>, logger: &'a Logger) -> CrsResult<Self> {
        Ok(ListCommand {
            store: args.get_one::<String>("store").cloned(),
            manager,
            logger,
        })
    }
}

impl<'a> Command for ListCommand<'a> {
    fn execute(&self) -> CrsResult<Vec<String>> {
        let ids = match &self.store {
            Some(id) => {
                if self.manager.store(id).is_none() {
                    return Err(CrsError::GenericError(format!("No CRS store with id {}", id)));
                }
                vec![id.clone()]
            }
            None => self.manager.store_ids(),
        };

        let mut lines = Vec::new();
        for store in ids.iter().filter_map(|id| self.manager.store(id)) {
            lines.push(format!("# {} ({} systems)", store.id(), store.len()));
            for code in store.available_codes() {
                if let Some(crs) = store.get_crs(&code) {
                    lines.push(format!("{}\t{}\t{}", code, crs.crs_type(), crs.name()));
                }
            }
        }
        self.logger.log(&format!("listed {} stores", ids.len()))?;
        Ok(lines)
    }
}
