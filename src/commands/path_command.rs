//! Show the transformation chain between two systems

use std::sync::Arc;
use clap::ArgMatches;

use crate::commands::command_traits::Command;
use crate::commands::{required_arg, resolve_pair};
use crate::errors::CrsResult;
use crate::store::CrsManager;
use crate::utils::logger::Logger;

/// Command printing one line per step of a chain
pub struct PathCommand<'a> {
    source: String,
    target: String,
    manager: Arc<CrsManager>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> PathCommand<'a> {
    pub fn new(args: &ArgMatches, manager: Arc<CrsManager>, logger: &'a Logger) -> CrsResult<Self> {
        Ok(PathCommand {
            source: required_arg(args, "from")?,
            target: required_arg(args, "to")?,
            manager,
            logger,
        })
    }
}

impl<'a> Command for PathCommand<'a> {
    fn execute(&self) -> CrsResult<Vec<String>> {
        let (source, target, transformer) = resolve_pair(&self.manager, &self.source, &self.target)?;
        let lines = match transformer.transformation_between(&source, &target)? {
            Some(chain) => {
                self.logger.log(&chain.to_string())?;
                chain
                    .steps()
                    .iter()
                    .enumerate()
                    .map(|(i, step)| format!("{}. {} => {}  {}", i + 1, step.source().code(), step.target().code(), step.describe()))
                    .collect()
            }
            None => vec!["Identity".to_string()],
        };
        Ok(lines)
    }
}
