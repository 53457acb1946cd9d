//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod lookup_command;
pub mod transform_command;
pub mod envelope_command;
pub mod list_command;
pub mod path_command;

pub use command_traits::{Command, CommandFactory};
pub use lookup_command::LookupCommand;
pub use transform_command::TransformCommand;
pub use envelope_command::EnvelopeCommand;
pub use list_command::ListCommand;
pub use path_command::PathCommand;

use std::sync::Arc;
use clap::ArgMatches;

use crate::coordinate::CoordinateTransformer;
use crate::errors::{CrsError, CrsResult};
use crate::model::CoordinateSystem;
use crate::store::CrsManager;
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the selected subcommand and creates
/// the appropriate command instance for execution.
pub struct CrskitCommandFactory {
    manager: Arc<CrsManager>,
}

impl CrskitCommandFactory {
    /// Create a new factory over the loaded stores
    pub fn new(manager: Arc<CrsManager>) -> Self {
        CrskitCommandFactory { manager }
    }
}

impl<'a> CommandFactory<'a> for CrskitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> CrsResult<Box<dyn Command + 'a>> {
        let manager = self.manager.clone();
        match args.subcommand() {
            Some(("lookup", sub)) => Ok(Box::new(LookupCommand::new(sub, manager, logger)?)),
            Some(("transform", sub)) => Ok(Box::new(TransformCommand::new(sub, manager, logger)?)),
            Some(("envelope", sub)) => Ok(Box::new(EnvelopeCommand::new(sub, manager, logger)?)),
            Some(("list", sub)) => Ok(Box::new(ListCommand::new(sub, manager, logger)?)),
            Some(("path", sub)) => Ok(Box::new(PathCommand::new(sub, manager, logger)?)),
            Some((other, _)) => Err(CrsError::GenericError(format!("Unknown command: {}", other))),
            None => Err(CrsError::GenericError("No command given".to_string())),
        }
    }
}

/// String argument that clap has already enforced
pub(crate) fn required_arg(args: &ArgMatches, name: &str) -> CrsResult<String> {
    args.get_one::<String>(name)
        .cloned()
        .ok_or_else(|| CrsError::GenericError(format!("Missing argument: {}", name)))
}

/// Resolve both codes and pick the transformer of the store holding the source
pub(crate) fn resolve_pair(
    manager: &CrsManager,
    source: &str,
    target: &str,
) -> CrsResult<(Arc<CoordinateSystem>, Arc<CoordinateSystem>, Arc<CoordinateTransformer>)> {
    let source_crs = manager.lookup(source).ok_or_else(|| CrsError::UnknownCrs(source.to_string()))?;
    let target_crs = manager.lookup(target).ok_or_else(|| CrsError::UnknownCrs(target.to_string()))?;
    let transformer = manager
        .transformer_for(source)
        .ok_or_else(|| CrsError::UnknownCrs(source.to_string()))?;
    Ok((source_crs, target_crs, transformer))
}
