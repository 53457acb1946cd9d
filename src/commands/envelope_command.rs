//! Envelope transformation command

use std::sync::Arc;
use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{required_arg, resolve_pair};
use crate::coordinate::{BoundingBox, Point};
use crate::errors::CrsResult;
use crate::store::CrsManager;
use crate::utils::format_utils::format_point;
use crate::utils::logger::Logger;

/// Command transforming a "minx,miny,maxx,maxy" envelope
pub struct EnvelopeCommand<'a> {
    source: String,
    target: String,
    bbox: BoundingBox,
    manager: Arc<CrsManager>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> EnvelopeCommand<'a> {
    pub fn new(args: &ArgMatches, manager: Arc<CrsManager>, logger: &'a Logger) -> CrsResult<Self> {
        let bbox = BoundingBox::from_string(&required_arg(args, "bbox")?)?;
        Ok(EnvelopeCommand {
            source: required_arg(args, "from")?,
            target: required_arg(args, "to")?,
            bbox,
            manager,
            logger,
        })
    }
}

impl<'a> Command for EnvelopeCommand<'a> {
    fn execute(&self) -> CrsResult<Vec<String>> {
        let (source, target, transformer) = resolve_pair(&self.manager, &self.source, &self.target)?;
        info!("Transforming envelope {} from {} to {}", self.bbox, source.code(), target.code());

        let result = transformer.transform_envelope_crs(&source, &target, &self.bbox)?;
        self.logger.log(&format!("{} {} -> {}", source.code(), self.bbox, result))?;

        let lower = format_point(&Point::new(result.min_x, result.min_y), &target);
        let upper = format_point(&Point::new(result.max_x, result.max_y), &target);
        Ok(vec![lower, upper])
    }
}
