//! Codes and identification shared by every named component

use std::fmt;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // urn:ogc:def:crs:EPSG::4326, urn:x-ogc:def:crs:EPSG:6.6:4326, urn:ogc:def:crs:EPSG:4326
    static ref URN_CODE: Regex = Regex::new(
        r"^urn:(?:x-)?ogc:def:[a-z\-]+:([a-z0-9_.\-]+):(?:[^:]*:)?([^:]+)$"
    ).expect("URN code pattern");
    // http://www.opengis.net/gml/srs/epsg.xml#4326
    static ref GML_SRS_CODE: Regex = Regex::new(
        r"^https?://www\.opengis\.net/gml/srs/([a-z0-9_\-]+)\.xml#(.+)$"
    ).expect("GML srs code pattern");
    // http://www.opengis.net/def/crs/EPSG/0/4326
    static ref OGC_URI_CODE: Regex = Regex::new(
        r"^https?://www\.opengis\.net/def/[a-z\-]+/([a-z0-9_\-]+)/[^/]+/(.+)$"
    ).expect("OGC URI code pattern");
}

/// A (codespace, code) pair, the canonical lookup key
///
/// Both parts are stored lower-cased so that `EPSG:4326` and `epsg:4326`
/// address the same definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrsCode {
    codespace: String,
    code: String,
}

impl CrsCode {
    /// Create a code from its parts
    pub fn new(codespace: &str, code: &str) -> Self {
        CrsCode {
            codespace: codespace.trim().to_lowercase(),
            code: code.trim().to_lowercase(),
        }
    }

    /// Shorthand for an EPSG code
    pub fn epsg(code: u32) -> Self {
        CrsCode::new("epsg", &code.to_string())
    }

    /// Parse any of the common code notations into a normalized code
    ///
    /// Recognizes URNs, the two OGC http forms and `authority:code`.
    /// A string without an authority keeps an empty codespace.
    pub fn parse(text: &str) -> Self {
        let normalized = text.trim().to_lowercase();

        for pattern in [&*URN_CODE, &*GML_SRS_CODE, &*OGC_URI_CODE] {
            if let Some(caps) = pattern.captures(&normalized) {
                return CrsCode::new(&caps[1], &caps[2]);
            }
        }

        match normalized.split_once(':') {
            Some((codespace, code)) if !codespace.is_empty() && !code.is_empty() => {
                CrsCode::new(codespace, code)
            }
            _ => CrsCode::new("", &normalized),
        }
    }

    /// The authority part, e.g. `epsg`
    pub fn codespace(&self) -> &str {
        &self.codespace
    }

    /// The code within the authority, e.g. `4326`
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Numeric value of the code if it is one (EPSG style)
    pub fn numeric(&self) -> Option<u32> {
        self.code.parse().ok()
    }

    /// Derive a code in the same codespace with a suffix appended
    pub fn with_suffix(&self, suffix: &str) -> Self {
        CrsCode {
            codespace: self.codespace.clone(),
            code: format!("{}_{}", self.code, suffix.to_lowercase()),
        }
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.codespace.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}:{}", self.codespace, self.code)
        }
    }
}

impl From<&str> for CrsCode {
    fn from(text: &str) -> Self {
        CrsCode::parse(text)
    }
}

/// Identification carried by every named component
///
/// The first code is the primary one. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifiable {
    codes: Vec<CrsCode>,
    name: String,
    area_of_use: Option<String>,
}

impl Identifiable {
    /// Create an identifiable with a primary code
    pub fn new(primary: CrsCode, name: &str) -> Self {
        Identifiable {
            codes: vec![primary],
            name: name.to_string(),
            area_of_use: None,
        }
    }

    /// Add an alias code, ignoring duplicates
    pub fn with_alias(mut self, code: CrsCode) -> Self {
        if !self.codes.contains(&code) {
            self.codes.push(code);
        }
        self
    }

    /// Attach an area-of-use description
    pub fn with_area_of_use(mut self, area: &str) -> Self {
        self.area_of_use = Some(area.to_string());
        self
    }

    pub fn code(&self) -> &CrsCode {
        &self.codes[0]
    }

    pub fn codes(&self) -> &[CrsCode] {
        &self.codes
    }

    pub fn has_code(&self, code: &CrsCode) -> bool {
        self.codes.contains(code)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn area_of_use(&self) -> Option<&str> {
        self.area_of_use.as_deref()
    }
}

impl fmt::Display for Identifiable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code())
    }
}
