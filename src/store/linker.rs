//! Second loading pass: resolving references between raw definitions

use std::collections::HashMap;
use std::sync::Arc;
use log::debug;

use crate::errors::{CrsError, CrsResult};
use crate::model::wgs84::GREENWICH;
use crate::model::{
    Axis, CompoundCrs, CoordinateSystem, CrsCode, DatumShift, Ellipsoid, GeocentricCrs, GeodeticDatum, GeographicCrs,
    HelmertParameters, PrimeMeridian, ProjectedCrs, VerticalCrs,
};
use crate::projection::Projection;
use super::config::{EllipsoidShape, RawDefinitions, RawHeader};

/// Fully linked components, each registered under all of its codes
#[derive(Debug, Default)]
pub(crate) struct LinkedComponents {
    pub ellipsoids: HashMap<CrsCode, Arc<Ellipsoid>>,
    pub prime_meridians: HashMap<CrsCode, Arc<PrimeMeridian>>,
    pub helmerts: HashMap<CrsCode, Arc<HelmertParameters>>,
    pub datums: HashMap<CrsCode, Arc<GeodeticDatum>>,
    pub projections: HashMap<CrsCode, Arc<Projection>>,
    pub systems: HashMap<CrsCode, Arc<CoordinateSystem>>,
    /// Helmert parameters configured between two datums
    pub datum_shifts: Vec<DatumShift>,
    /// Primary codes of all systems in linking order
    pub primary_codes: Vec<CrsCode>,
}

fn register<T>(map: &mut HashMap<CrsCode, Arc<T>>, header: &RawHeader, value: Arc<T>) {
    for code in &header.codes {
        map.insert(code.clone(), value.clone());
    }
}

fn resolve<T>(map: &HashMap<CrsCode, Arc<T>>, code: &CrsCode, kind: &str, referrer: &RawHeader) -> CrsResult<Arc<T>> {
    map.get(code).cloned().ok_or_else(|| {
        CrsError::Configuration(format!(
            "{} references unknown {} {}", referrer.primary(), kind, code
        ))
    })
}

/// Link raw definitions in dependency order
///
/// Definitions are grouped by kind before linking, so the order in which
/// they appear in the source does not matter.
pub(crate) fn link(raw: RawDefinitions) -> CrsResult<LinkedComponents> {
    let mut linked = LinkedComponents::default();

    for def in &raw.ellipsoids {
        let id = def.header.to_identifiable();
        let ellipsoid = match def.shape {
            EllipsoidShape::InverseFlattening(invf) => {
                Ellipsoid::from_inverse_flattening(id, def.semi_major_axis, invf, def.units)
            }
            EllipsoidShape::SemiMinorAxis(b) => {
                if b <= 0.0 || b > def.semi_major_axis {
                    return Err(CrsError::Configuration(format!(
                        "ellipsoid {} has an invalid semi-minor axis {}", def.header.primary(), b
                    )));
                }
                Ellipsoid::from_semi_minor_axis(id, def.semi_major_axis, b, def.units)
            }
        };
        register(&mut linked.ellipsoids, &def.header, Arc::new(ellipsoid));
    }

    for def in &raw.prime_meridians {
        let meridian = PrimeMeridian::new(def.header.to_identifiable(), def.longitude, def.units);
        register(&mut linked.prime_meridians, &def.header, Arc::new(meridian));
    }

    let mut direct = Vec::new();
    for def in &raw.helmerts {
        let helmert = Arc::new(HelmertParameters::new(
            def.header.to_identifiable(), def.translation, def.rotation, def.ppm,
        ));
        if let Some((source, target)) = &def.direct {
            direct.push((source, target, &def.header, helmert.clone()));
        }
        register(&mut linked.helmerts, &def.header, helmert);
    }

    for def in &raw.datums {
        let ellipsoid = resolve(&linked.ellipsoids, &def.ellipsoid, "ellipsoid", &def.header)?;
        let prime_meridian = match &def.prime_meridian {
            Some(code) => resolve(&linked.prime_meridians, code, "prime meridian", &def.header)?,
            None => GREENWICH.clone(),
        };
        let to_wgs84 = match &def.to_wgs84 {
            Some(code) => Some(resolve(&linked.helmerts, code, "Helmert transformation", &def.header)?),
            None => None,
        };
        let datum = GeodeticDatum::new(def.header.to_identifiable(), ellipsoid, prime_meridian, to_wgs84);
        register(&mut linked.datums, &def.header, Arc::new(datum));
    }

    for def in &raw.projections {
        let projection = Projection::new(
            def.header.to_identifiable(),
            def.kind,
            def.natural_origin,
            def.scale,
            def.false_origin,
            def.units,
        )?;
        register(&mut linked.projections, &def.header, Arc::new(projection));
    }

    for def in &raw.geographic {
        let datum = resolve(&linked.datums, &def.datum, "datum", &def.header)?;
        let axes = def.axes.clone().unwrap_or_else(Axis::default_geographic);
        let crs = GeographicCrs::new(def.header.to_identifiable(), datum, axes)?;
        linked.add_system(&def.header, CoordinateSystem::Geographic(crs));
    }

    for def in &raw.geocentric {
        let datum = resolve(&linked.datums, &def.datum, "datum", &def.header)?;
        let axes = def.axes.clone().unwrap_or_else(Axis::default_geocentric);
        let crs = GeocentricCrs::new(def.header.to_identifiable(), datum, axes)?;
        linked.add_system(&def.header, CoordinateSystem::Geocentric(crs));
    }

    for def in &raw.projected {
        let base = resolve(&linked.systems, &def.base, "base system", &def.header)?;
        let base = match base.as_ref() {
            CoordinateSystem::Geographic(geographic) => geographic.clone(),
            other => {
                return Err(CrsError::Configuration(format!(
                    "{} needs a geographic base, {} is {}", def.header.primary(), other.code(), other.crs_type()
                )));
            }
        };
        let projection = resolve(&linked.projections, &def.projection, "projection", &def.header)?;
        let axes = def.axes.clone().unwrap_or_else(Axis::default_projected);
        let crs = ProjectedCrs::new(def.header.to_identifiable(), base, projection, axes)?;
        linked.add_system(&def.header, CoordinateSystem::Projected(crs));
    }

    let mut verticals = HashMap::new();
    for def in &raw.vertical {
        let axis = def.axis.clone().unwrap_or_else(Axis::default_vertical);
        let crs = VerticalCrs::new(def.header.to_identifiable(), &def.datum_name, axis)?;
        register(&mut verticals, &def.header, Arc::new(crs.clone()));
        linked.add_system(&def.header, CoordinateSystem::Vertical(crs));
    }

    for def in &raw.compound {
        let horizontal = resolve(&linked.systems, &def.horizontal, "horizontal system", &def.header)?;
        let vertical = resolve(&verticals, &def.vertical, "vertical system", &def.header)?;
        let crs = CompoundCrs::new(def.header.to_identifiable(), horizontal, vertical, def.default_height)?;
        linked.add_system(&def.header, CoordinateSystem::Compound(crs));
    }

    // systems are known now, so the direct shifts can name them
    for (source, target, header, parameters) in direct {
        let source_datum = system_datum(&linked.systems, source, header)?;
        let target_datum = system_datum(&linked.systems, target, header)?;
        if source_datum.id().code() == target_datum.id().code() {
            return Err(CrsError::Configuration(format!(
                "{} relates datum {} to itself", header.primary(), source_datum.id().code()
            )));
        }
        linked.datum_shifts.push(DatumShift::new(source_datum, target_datum, parameters));
    }

    debug!(
        "Linked {} systems, {} datums, {} ellipsoids, {} projections, {} direct datum shifts",
        linked.primary_codes.len(), raw.datums.len(), raw.ellipsoids.len(), raw.projections.len(),
        linked.datum_shifts.len()
    );
    Ok(linked)
}

/// Geodetic datum of a referenced system
fn system_datum(
    systems: &HashMap<CrsCode, Arc<CoordinateSystem>>,
    code: &CrsCode,
    referrer: &RawHeader,
) -> CrsResult<Arc<GeodeticDatum>> {
    let crs = resolve(systems, code, "system", referrer)?;
    crs.datum().cloned().ok_or_else(|| {
        CrsError::Configuration(format!(
            "{} references {}, which has no geodetic datum", referrer.primary(), crs.code()
        ))
    })
}

impl LinkedComponents {
    fn add_system(&mut self, header: &RawHeader, crs: CoordinateSystem) {
        self.primary_codes.push(crs.code().clone());
        register(&mut self.systems, header, Arc::new(crs));
    }
}
