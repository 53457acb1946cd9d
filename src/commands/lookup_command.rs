//! Describe a coordinate system

use std::sync::Arc;
use clap::ArgMatches;
use log::debug;

use crate::commands::command_traits::Command;
use crate::commands::required_arg;
use crate::errors::{CrsError, CrsResult};
use crate::model::CoordinateSystem;
use crate::store::CrsManager;
use crate::utils::format_utils::format_axes;
use crate::utils::logger::Logger;

/// Command printing the definition behind a code
pub struct LookupCommand<'a> {
    /// Code as given on the command line
    code: String,
    manager: Arc<CrsManager>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> LookupCommand<'a> {
    pub fn new(args: &ArgMatches, manager: Arc<CrsManager>, logger: &'a Logger) -> CrsResult<Self> {
        Ok(LookupCommand {
            code: required_arg(args, "code")?,
            manager,
            logger,
        })
    }

    fn describe(&self, crs: &CoordinateSystem) -> Vec<String> {
        let id = crs.id();
        let mut lines = vec![
            format!("{} [{}]", id.name(), crs.crs_type()),
            format!("  codes: {}", id.codes().iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ")),
            format!("  axes: {}", format_axes(crs)),
        ];
        if let Some(area) = id.area_of_use() {
            lines.push(format!("  area of use: {}", area));
        }
        if let Some(datum) = crs.datum() {
            let ellipsoid = datum.ellipsoid();
            lines.push(format!("  datum: {} ({})", datum.id().name(), datum.id().code()));
            lines.push(format!(
                "  ellipsoid: {} a={} 1/f={}",
                ellipsoid.id().name(), ellipsoid.semi_major_axis(), ellipsoid.inverse_flattening()
            ));
            if !datum.prime_meridian().is_greenwich() {
                lines.push(format!(
                    "  prime meridian: {} {} {}",
                    datum.prime_meridian().id().name(), datum.prime_meridian().longitude(), datum.prime_meridian().units()
                ));
            }
            match datum.to_wgs84() {
                Some(helmert) => lines.push(format!("  to WGS84: {} {:?}", helmert.id().code(), helmert.values())),
                None if datum.is_wgs84() => {}
                None => lines.push("  to WGS84: unknown".to_string()),
            }
        }
        match crs {
            CoordinateSystem::Projected(projected) => {
                let projection = projected.projection();
                lines.push(format!(
                    "  projection: {} lon0={:.9} lat0={:.9} k={} FE={} FN={}",
                    projection.kind(),
                    projection.projection_longitude().to_degrees(),
                    projection.projection_latitude().to_degrees(),
                    projection.scale(),
                    projection.false_easting(),
                    projection.false_northing(),
                ));
            }
            CoordinateSystem::Vertical(vertical) => {
                lines.push(format!("  vertical datum: {}", vertical.datum_name()));
            }
            CoordinateSystem::Compound(compound) => {
                lines.push(format!("  horizontal: {}", compound.horizontal().code()));
                lines.push(format!("  vertical: {}", compound.vertical().id().code()));
                lines.push(format!("  default height: {}", compound.default_height()));
            }
            _ => {}
        }
        lines
    }
}

impl<'a> Command for LookupCommand<'a> {
    fn execute(&self) -> CrsResult<Vec<String>> {
        let crs = self.manager
            .lookup(&self.code)
            .ok_or_else(|| CrsError::UnknownCrs(self.code.clone()))?;
        debug!("Resolved {} to {}", self.code, crs.code());
        let lines = self.describe(&crs);
        self.logger.log(&format!("lookup {} -> {}", self.code, crs))?;
        Ok(lines)
    }
}
