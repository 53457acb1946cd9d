use crate::model::{CrsCode, Identifiable};

#[test]
fn test_parse_authority_code() {
    let code = CrsCode::parse("EPSG:4326");
    assert_eq!(code.codespace(), "epsg");
    assert_eq!(code.code(), "4326");
    assert_eq!(code, CrsCode::epsg(4326));
    assert_eq!(code.numeric(), Some(4326));
    assert_eq!(code.to_string(), "epsg:4326");
}

#[test]
fn test_parse_urn_forms() {
    assert_eq!(CrsCode::parse("urn:ogc:def:crs:EPSG::31467"), CrsCode::epsg(31467));
    assert_eq!(CrsCode::parse("urn:x-ogc:def:crs:EPSG:6.6:4258"), CrsCode::epsg(4258));
    assert_eq!(CrsCode::parse("urn:ogc:def:crs:EPSG:25832"), CrsCode::epsg(25832));
}

#[test]
fn test_parse_http_forms() {
    assert_eq!(CrsCode::parse("http://www.opengis.net/gml/srs/epsg.xml#4326"), CrsCode::epsg(4326));
    assert_eq!(CrsCode::parse("http://www.opengis.net/def/crs/EPSG/0/3857"), CrsCode::epsg(3857));
    assert_eq!(CrsCode::parse("https://www.opengis.net/def/crs/EPSG/0/3857"), CrsCode::epsg(3857));
}

#[test]
fn test_uri_forms_keep_other_authorities() {
    let crs84 = CrsCode::new("ogc", "crs84");
    assert_eq!(CrsCode::parse("urn:ogc:def:crs:OGC:1.3:CRS84"), crs84);
    assert_eq!(CrsCode::parse("http://www.opengis.net/def/crs/OGC/1.3/CRS84"), crs84);
    assert_eq!(CrsCode::parse("http://www.opengis.net/gml/srs/crskit.xml#UTM32"), CrsCode::new("crskit", "utm32"));
}

#[test]
fn test_parse_is_case_and_space_insensitive() {
    assert_eq!(CrsCode::parse("  crskit:UTM32N_Zone_Prefix "), CrsCode::new("CRSKIT", "utm32n_zone_prefix"));
    assert_eq!(CrsCode::parse("CRS:84"), CrsCode::new("crs", "84"));
}

#[test]
fn test_parse_bare_code() {
    let code = CrsCode::parse("31467");
    assert_eq!(code.codespace(), "");
    assert_eq!(code.code(), "31467");
    assert_eq!(code.to_string(), "31467");
    assert_eq!(CrsCode::parse(":4326").codespace(), "");
}

#[test]
fn test_non_numeric_code() {
    let code = CrsCode::new("crskit", "amersfoort_wgs84");
    assert_eq!(code.numeric(), None);
    assert_eq!(code.with_suffix("Geocentric").code(), "amersfoort_wgs84_geocentric");
}

#[test]
fn test_identifiable_aliases() {
    let id = Identifiable::new(CrsCode::epsg(3857), "WGS 84 / Pseudo-Mercator")
        .with_alias(CrsCode::epsg(900913))
        .with_alias(CrsCode::epsg(3857))
        .with_area_of_use("World");

    assert_eq!(id.code(), &CrsCode::epsg(3857));
    assert_eq!(id.codes().len(), 2);
    assert!(id.has_code(&CrsCode::epsg(900913)));
    assert!(!id.has_code(&CrsCode::epsg(4326)));
    assert_eq!(id.area_of_use(), Some("World"));
    assert_eq!(id.to_string(), "WGS 84 / Pseudo-Mercator (epsg:3857)");
}
