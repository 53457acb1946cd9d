//! First loading pass: TOML definitions into raw, unlinked records
//!
//! References between definitions stay plain codes here. Field types,
//! required fields and code uniqueness are checked; resolving the
//! references is left to the linker.

use std::collections::HashSet;
use toml::value::Table;
use toml::Value;

use crate::errors::{CrsError, CrsResult};
use crate::model::{Axis, AxisOrientation, CrsCode, Identifiable, Unit};
use crate::projection::ProjectionKind;

const DEFAULT_PROVIDER_ID: &str = "default";

/// Identification shared by every raw record
#[derive(Debug, Clone)]
pub(crate) struct RawHeader {
    pub codes: Vec<CrsCode>,
    pub name: String,
    pub area_of_use: Option<String>,
}

impl RawHeader {
    pub fn to_identifiable(&self) -> Identifiable {
        let mut codes = self.codes.iter().cloned();
        let primary = codes.next().unwrap_or_else(|| CrsCode::new("", &self.name));
        let mut id = codes.fold(Identifiable::new(primary, &self.name), |id, alias| id.with_alias(alias));
        if let Some(area) = &self.area_of_use {
            id = id.with_area_of_use(area);
        }
        id
    }

    pub fn primary(&self) -> String {
        self.codes.first().map(|c| c.to_string()).unwrap_or_else(|| self.name.clone())
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum EllipsoidShape {
    InverseFlattening(f64),
    SemiMinorAxis(f64),
}

#[derive(Debug)]
pub(crate) struct RawEllipsoid {
    pub header: RawHeader,
    pub semi_major_axis: f64,
    pub shape: EllipsoidShape,
    pub units: Unit,
}

#[derive(Debug)]
pub(crate) struct RawPrimeMeridian {
    pub header: RawHeader,
    pub longitude: f64,
    pub units: Unit,
}

#[derive(Debug)]
pub(crate) struct RawHelmert {
    pub header: RawHeader,
    pub translation: [f64; 3],
    pub rotation: [f64; 3],
    pub ppm: f64,
    /// Systems whose datums the parameters relate directly
    pub direct: Option<(CrsCode, CrsCode)>,
}

#[derive(Debug)]
pub(crate) struct RawDatum {
    pub header: RawHeader,
    pub ellipsoid: CrsCode,
    pub prime_meridian: Option<CrsCode>,
    pub to_wgs84: Option<CrsCode>,
}

#[derive(Debug)]
pub(crate) struct RawProjection {
    pub header: RawHeader,
    pub kind: ProjectionKind,
    pub natural_origin: (f64, f64),
    pub scale: f64,
    pub false_origin: (f64, f64),
    pub units: Unit,
}

#[derive(Debug)]
pub(crate) struct RawGeodeticCrs {
    pub header: RawHeader,
    pub datum: CrsCode,
    pub axes: Option<Vec<Axis>>,
}

#[derive(Debug)]
pub(crate) struct RawProjectedCrs {
    pub header: RawHeader,
    pub base: CrsCode,
    pub projection: CrsCode,
    pub axes: Option<Vec<Axis>>,
}

#[derive(Debug)]
pub(crate) struct RawVerticalCrs {
    pub header: RawHeader,
    pub datum_name: String,
    pub axis: Option<Axis>,
}

#[derive(Debug)]
pub(crate) struct RawCompoundCrs {
    pub header: RawHeader,
    pub horizontal: CrsCode,
    pub vertical: CrsCode,
    pub default_height: f64,
}

/// Everything the first pass extracted from one configuration source
#[derive(Debug, Default)]
pub(crate) struct RawDefinitions {
    pub provider_id: String,
    pub description: Option<String>,
    pub ellipsoids: Vec<RawEllipsoid>,
    pub prime_meridians: Vec<RawPrimeMeridian>,
    pub helmerts: Vec<RawHelmert>,
    pub datums: Vec<RawDatum>,
    pub projections: Vec<RawProjection>,
    pub geographic: Vec<RawGeodeticCrs>,
    pub geocentric: Vec<RawGeodeticCrs>,
    pub projected: Vec<RawProjectedCrs>,
    pub vertical: Vec<RawVerticalCrs>,
    pub compound: Vec<RawCompoundCrs>,
}

impl RawDefinitions {
    /// Parse a TOML document into raw definitions
    pub fn from_str(content: &str) -> CrsResult<Self> {
        let document: Value = content
            .parse()
            .map_err(|e| CrsError::Configuration(format!("Failed to parse TOML: {}", e)))?;

        let mut defs = RawDefinitions {
            provider_id: DEFAULT_PROVIDER_ID.to_string(),
            ..RawDefinitions::default()
        };

        if let Some(provider) = document.get("provider") {
            let table = provider
                .as_table()
                .ok_or_else(|| CrsError::Configuration("[provider] must be a table".to_string()))?;
            let entry = Entry { section: "provider", index: 0, table };
            if let Some(id) = entry.optional_str("id")? {
                defs.provider_id = id.to_string();
            }
            defs.description = entry.optional_str("description")?.map(str::to_string);
        }

        for entry in entries(&document, "ellipsoid")? {
            defs.ellipsoids.push(parse_ellipsoid(&entry)?);
        }
        for entry in entries(&document, "prime_meridian")? {
            defs.prime_meridians.push(RawPrimeMeridian {
                header: entry.header()?,
                longitude: entry.required_f64("longitude")?,
                units: entry.unit("units", Unit::Degree)?,
            });
        }
        for entry in entries(&document, "helmert")? {
            let direct = match (entry.optional_code("source")?, entry.optional_code("target")?) {
                (Some(source), Some(target)) => Some((source, target)),
                (None, None) => None,
                _ => return Err(entry.error("source and target must be given together")),
            };
            defs.helmerts.push(RawHelmert {
                header: entry.header()?,
                translation: [entry.f64_or("dx", 0.0)?, entry.f64_or("dy", 0.0)?, entry.f64_or("dz", 0.0)?],
                rotation: [entry.f64_or("rx", 0.0)?, entry.f64_or("ry", 0.0)?, entry.f64_or("rz", 0.0)?],
                ppm: entry.f64_or("ppm", 0.0)?,
                direct,
            });
        }
        for entry in entries(&document, "datum")? {
            defs.datums.push(RawDatum {
                header: entry.header()?,
                ellipsoid: entry.required_code("ellipsoid")?,
                prime_meridian: entry.optional_code("prime_meridian")?,
                to_wgs84: entry.optional_code("to_wgs84")?,
            });
        }
        for entry in entries(&document, "projection")? {
            defs.projections.push(parse_projection(&entry)?);
        }
        for entry in entries(&document, "geographic_crs")? {
            defs.geographic.push(RawGeodeticCrs {
                header: entry.header()?,
                datum: entry.required_code("datum")?,
                axes: entry.axes()?,
            });
        }
        for entry in entries(&document, "geocentric_crs")? {
            defs.geocentric.push(RawGeodeticCrs {
                header: entry.header()?,
                datum: entry.required_code("datum")?,
                axes: entry.axes()?,
            });
        }
        for entry in entries(&document, "projected_crs")? {
            defs.projected.push(RawProjectedCrs {
                header: entry.header()?,
                base: entry.required_code("base")?,
                projection: entry.required_code("projection")?,
                axes: entry.axes()?,
            });
        }
        for entry in entries(&document, "vertical_crs")? {
            let axis = match entry.axes()? {
                None => None,
                Some(mut axes) if axes.len() == 1 => axes.pop(),
                Some(axes) => {
                    return Err(entry.error(&format!("expects exactly one axis, got {}", axes.len())));
                }
            };
            defs.vertical.push(RawVerticalCrs {
                header: entry.header()?,
                datum_name: entry.required_str("vertical_datum")?.to_string(),
                axis,
            });
        }
        for entry in entries(&document, "compound_crs")? {
            defs.compound.push(RawCompoundCrs {
                header: entry.header()?,
                horizontal: entry.required_code("horizontal")?,
                vertical: entry.required_code("vertical")?,
                default_height: entry.f64_or("default_height", 0.0)?,
            });
        }

        defs.check_unique_codes()?;
        Ok(defs)
    }

    /// Every code may be registered once across all sections
    fn check_unique_codes(&self) -> CrsResult<()> {
        let headers = self.ellipsoids.iter().map(|d| &d.header)
            .chain(self.prime_meridians.iter().map(|d| &d.header))
            .chain(self.helmerts.iter().map(|d| &d.header))
            .chain(self.datums.iter().map(|d| &d.header))
            .chain(self.projections.iter().map(|d| &d.header))
            .chain(self.geographic.iter().map(|d| &d.header))
            .chain(self.geocentric.iter().map(|d| &d.header))
            .chain(self.projected.iter().map(|d| &d.header))
            .chain(self.vertical.iter().map(|d| &d.header))
            .chain(self.compound.iter().map(|d| &d.header));

        let mut seen = HashSet::new();
        for header in headers {
            for code in &header.codes {
                if !seen.insert(code.clone()) {
                    return Err(CrsError::Configuration(format!(
                        "duplicate registration of code {} (in {})", code, header.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Number of raw records of all kinds
    pub fn len(&self) -> usize {
        self.ellipsoids.len() + self.prime_meridians.len() + self.helmerts.len() + self.datums.len()
            + self.projections.len() + self.geographic.len() + self.geocentric.len()
            + self.projected.len() + self.vertical.len() + self.compound.len()
    }
}

/// One `[[section]]` table with typed accessors
struct Entry<'a> {
    section: &'static str,
    index: usize,
    table: &'a Table,
}

impl<'a> Entry<'a> {
    fn error(&self, message: &str) -> CrsError {
        let name = self.table.get("name").and_then(Value::as_str).unwrap_or("?");
        CrsError::Configuration(format!("[[{}]] #{} ({}): {}", self.section, self.index + 1, name, message))
    }

    fn header(&self) -> CrsResult<RawHeader> {
        let codes = match self.table.get("codes") {
            Some(Value::Array(values)) => values
                .iter()
                .map(|v| v.as_str().map(CrsCode::parse).ok_or_else(|| self.error("codes must be strings")))
                .collect::<CrsResult<Vec<_>>>()?,
            Some(Value::String(code)) => vec![CrsCode::parse(code)],
            Some(_) => return Err(self.error("codes must be a string or an array of strings")),
            None => return Err(self.error("missing codes")),
        };
        if codes.is_empty() {
            return Err(self.error("needs at least one code"));
        }
        let mut unique: Vec<CrsCode> = Vec::with_capacity(codes.len());
        for code in codes {
            if !unique.contains(&code) {
                unique.push(code);
            }
        }
        Ok(RawHeader {
            codes: unique,
            name: self.required_str("name")?.to_string(),
            area_of_use: self.optional_str("area_of_use")?.map(str::to_string),
        })
    }

    fn optional_f64(&self, key: &str) -> CrsResult<Option<f64>> {
        match self.table.get(key) {
            None => Ok(None),
            Some(Value::Float(v)) => Ok(Some(*v)),
            Some(Value::Integer(v)) => Ok(Some(*v as f64)),
            Some(_) => Err(self.error(&format!("{} must be a number", key))),
        }
    }

    fn required_f64(&self, key: &str) -> CrsResult<f64> {
        self.optional_f64(key)?.ok_or_else(|| self.error(&format!("missing {}", key)))
    }

    fn f64_or(&self, key: &str, default: f64) -> CrsResult<f64> {
        Ok(self.optional_f64(key)?.unwrap_or(default))
    }

    fn optional_str(&self, key: &str) -> CrsResult<Option<&'a str>> {
        match self.table.get(key) {
            None => Ok(None),
            Some(Value::String(v)) => Ok(Some(v.as_str())),
            Some(_) => Err(self.error(&format!("{} must be a string", key))),
        }
    }

    fn required_str(&self, key: &str) -> CrsResult<&'a str> {
        self.optional_str(key)?.ok_or_else(|| self.error(&format!("missing {}", key)))
    }

    fn optional_code(&self, key: &str) -> CrsResult<Option<CrsCode>> {
        Ok(self.optional_str(key)?.map(CrsCode::parse))
    }

    fn required_code(&self, key: &str) -> CrsResult<CrsCode> {
        Ok(CrsCode::parse(self.required_str(key)?))
    }

    fn unit(&self, key: &str, default: Unit) -> CrsResult<Unit> {
        match self.optional_str(key)? {
            None => Ok(default),
            Some(name) => Unit::from_name(name).ok_or_else(|| self.error(&format!("unknown unit {}", name))),
        }
    }

    fn axes(&self) -> CrsResult<Option<Vec<Axis>>> {
        let values = match self.table.get("axes") {
            None => return Ok(None),
            Some(Value::Array(values)) => values,
            Some(_) => return Err(self.error("axes must be an array of tables")),
        };
        let mut axes = Vec::with_capacity(values.len());
        for value in values {
            let table = value.as_table().ok_or_else(|| self.error("axes must be an array of tables"))?;
            let axis = Entry { section: self.section, index: self.index, table };
            let orientation_name = axis.required_str("orientation")?;
            let orientation = AxisOrientation::from_name(orientation_name)
                .ok_or_else(|| self.error(&format!("unknown axis orientation {}", orientation_name)))?;
            let units_name = axis.required_str("units")?;
            let units = Unit::from_name(units_name)
                .ok_or_else(|| self.error(&format!("unknown unit {}", units_name)))?;
            axes.push(Axis::new(axis.required_str("name")?, orientation, units));
        }
        Ok(Some(axes))
    }
}

fn entries<'a>(document: &'a Value, section: &'static str) -> CrsResult<Vec<Entry<'a>>> {
    match document.get(section) {
        None => Ok(Vec::new()),
        Some(Value::Array(values)) => values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value
                    .as_table()
                    .map(|table| Entry { section, index, table })
                    .ok_or_else(|| CrsError::Configuration(format!("[[{}]] #{} is not a table", section, index + 1)))
            })
            .collect(),
        Some(_) => Err(CrsError::Configuration(format!("{} must be an array of tables ([[{}]])", section, section))),
    }
}

fn parse_ellipsoid(entry: &Entry) -> CrsResult<RawEllipsoid> {
    let shape = match (entry.optional_f64("inverse_flattening")?, entry.optional_f64("semi_minor_axis")?) {
        (Some(invf), None) => EllipsoidShape::InverseFlattening(invf),
        (None, Some(b)) => EllipsoidShape::SemiMinorAxis(b),
        (None, None) => return Err(entry.error("needs inverse_flattening or semi_minor_axis")),
        (Some(_), Some(_)) => return Err(entry.error("give either inverse_flattening or semi_minor_axis, not both")),
    };
    let semi_major_axis = entry.required_f64("semi_major_axis")?;
    if semi_major_axis <= 0.0 {
        return Err(entry.error("semi_major_axis must be positive"));
    }
    let units = entry.unit("units", Unit::Metre)?;
    if !units.is_linear() {
        return Err(entry.error("ellipsoid units must be linear"));
    }
    Ok(RawEllipsoid { header: entry.header()?, semi_major_axis, shape, units })
}

fn parse_projection(entry: &Entry) -> CrsResult<RawProjection> {
    let angular = entry.unit("angular_units", Unit::Degree)?;
    if !angular.is_angular() {
        return Err(entry.error("angular_units must be an angular unit"));
    }
    let lat0 = angular.to_base(entry.f64_or("latitude_of_origin", 0.0)?);
    let lon0 = angular.to_base(entry.f64_or("central_meridian", 0.0)?);

    let method = entry.required_str("method")?;
    let kind = match method.trim().to_lowercase().as_str() {
        "transverse_mercator" | "tmerc" => ProjectionKind::TransverseMercator,
        "lambert_conformal_conic" | "lcc" => {
            let first = entry.optional_f64("standard_parallel_1")?.map(|v| angular.to_base(v)).unwrap_or(lat0);
            let second = entry.optional_f64("standard_parallel_2")?.map(|v| angular.to_base(v)).unwrap_or(first);
            ProjectionKind::LambertConformalConic { first_parallel: first, second_parallel: second }
        }
        "lambert_azimuthal_equal_area" | "laea" => ProjectionKind::LambertAzimuthalEqualArea,
        "oblique_stereographic" | "stereographic_alternative" | "sterea" => ProjectionKind::ObliqueStereographic,
        "mercator" | "merc" => ProjectionKind::Mercator,
        "pseudo_mercator" | "popular_visualisation_pseudo_mercator" => ProjectionKind::PseudoMercator,
        other => return Err(entry.error(&format!("unknown projection method {}", other))),
    };

    Ok(RawProjection {
        header: entry.header()?,
        kind,
        natural_origin: (lon0, lat0),
        scale: entry.f64_or("scale_factor", 1.0)?,
        false_origin: (entry.f64_or("false_easting", 0.0)?, entry.f64_or("false_northing", 0.0)?),
        units: entry.unit("units", Unit::Metre)?,
    })
}
