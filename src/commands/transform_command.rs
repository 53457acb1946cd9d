//! Point transformation command

use std::sync::Arc;
use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{required_arg, resolve_pair};
use crate::coordinate::Point;
use crate::errors::{CrsError, CrsResult};
use crate::store::CrsManager;
use crate::utils::format_utils::format_point;
use crate::utils::logger::Logger;

/// Command transforming points given as "x,y[,z]"
pub struct TransformCommand<'a> {
    source: String,
    target: String,
    points: Vec<Point>,
    /// Print the chain before the results
    show_path: bool,
    manager: Arc<CrsManager>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> TransformCommand<'a> {
    pub fn new(args: &ArgMatches, manager: Arc<CrsManager>, logger: &'a Logger) -> CrsResult<Self> {
        let points = args
            .get_many::<String>("points")
            .ok_or_else(|| CrsError::GenericError("Missing points to transform".to_string()))?
            .map(|text| Point::from_string(text))
            .collect::<CrsResult<Vec<_>>>()?;

        Ok(TransformCommand {
            source: required_arg(args, "from")?,
            target: required_arg(args, "to")?,
            points,
            show_path: args.get_flag("path"),
            manager,
            logger,
        })
    }
}

impl<'a> Command for TransformCommand<'a> {
    fn execute(&self) -> CrsResult<Vec<String>> {
        let (source, target, transformer) = resolve_pair(&self.manager, &self.source, &self.target)?;
        info!("Transforming {} points from {} to {}", self.points.len(), source.code(), target.code());

        let mut lines = Vec::with_capacity(self.points.len() + 1);
        if self.show_path {
            let path = match transformer.transformation_between(&source, &target)? {
                Some(chain) => chain.describe(),
                None => "Identity".to_string(),
            };
            lines.push(format!("# {}", path));
        }

        let transformed = transformer.transform_crs(&source, &target, &self.points)?;
        for (input, output) in self.points.iter().zip(&transformed) {
            self.logger.log(&format!("{} {} -> {} {}", source.code(), input, target.code(), output))?;
            lines.push(format_point(output, &target));
        }
        Ok(lines)
    }
}
