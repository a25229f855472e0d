//! Loading the reference datasets from disk.
//!
//! Both files are JSON objects. The division tree is
//! `{ province: { canton: { parish_id: parish_name } } }` and the coordinate
//! table is `{ parish_id: { name, lat, lng } }`.

use std::path::Path;

use hazard_map_geography_models::{RawCoordinateRecord, RawDivisionRecord};
use serde::de::DeserializeOwned;

use crate::{AdministrativeIndex, GeoError};

/// Default location of the division tree, relative to the working directory.
pub const DEFAULT_DIVISIONS_PATH: &str = "data/divisions.json";

/// Default location of the coordinate table, relative to the working
/// directory.
pub const DEFAULT_COORDINATES_PATH: &str = "data/coordinates.json";

/// Reads and parses the division tree.
///
/// # Errors
///
/// Returns [`GeoError`] if the file cannot be read or is not a valid
/// division tree.
pub fn read_divisions(path: &Path) -> Result<RawDivisionRecord, GeoError> {
    read_json(path)
}

/// Reads and parses the coordinate table.
///
/// # Errors
///
/// Returns [`GeoError`] if the file cannot be read or is not a valid
/// coordinate table.
pub fn read_coordinates(path: &Path) -> Result<RawCoordinateRecord, GeoError> {
    read_json(path)
}

/// Reads both datasets and builds the index.
///
/// # Errors
///
/// Returns [`GeoError`] if either file is missing or malformed. Callers
/// treat this as fatal.
pub fn load_index(
    divisions_path: &Path,
    coordinates_path: &Path,
) -> Result<AdministrativeIndex, GeoError> {
    log::info!("Loading division tree from {}", divisions_path.display());
    let divisions = read_divisions(divisions_path)?;

    log::info!("Loading parish coordinates from {}", coordinates_path.display());
    let coordinates = read_coordinates(coordinates_path)?;

    let index = AdministrativeIndex::build(&divisions, &coordinates);
    if index.is_empty() {
        log::warn!("Administrative index is empty; every lookup will fail");
    }

    Ok(index)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, GeoError> {
    let contents = std::fs::read_to_string(path).map_err(|source| GeoError::Read {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| GeoError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    /// Writes `contents` to a file unique to this test process.
    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hazard_map_geography_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_index_from_files() {
        let divisions = write_temp(
            "load_ok_divisions.json",
            r#"{ "Azuay": { "Cuenca": { "010150": "BELLAVISTA", "010151": "CAÑARIBAMBA" } } }"#,
        );
        let coordinates = write_temp(
            "load_ok_coordinates.json",
            r#"{
                "010150": { "nombre": "BELLAVISTA", "lat": -2.89, "lng": -79.01 },
                "010151": { "name": "CAÑARIBAMBA", "latitude": -2.90, "longitude": -78.99 }
            }"#,
        );

        let index = load_index(&divisions, &coordinates).unwrap();

        assert_eq!(index.parish_count(), 2);
        assert_eq!(index.canton_keys("AZUAY"), ["CUENCA"]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let coordinates = write_temp("missing_coordinates.json", "{}");
        let missing = std::env::temp_dir().join("hazard_map_geography_does_not_exist.json");

        let err = load_index(&missing, &coordinates).unwrap_err();

        assert!(matches!(err, GeoError::Read { .. }), "unexpected error: {err}");
    }

    #[test]
    fn wrong_structure_is_a_parse_error() {
        // Parish names must be strings, not numbers.
        let divisions = write_temp(
            "bad_divisions.json",
            r#"{ "Azuay": { "Cuenca": { "010150": 42 } } }"#,
        );
        let coordinates = write_temp("bad_divisions_coordinates.json", "{}");

        let err = load_index(&divisions, &coordinates).unwrap_err();

        assert!(matches!(err, GeoError::Parse { .. }), "unexpected error: {err}");
    }

    #[test]
    fn truncated_coordinates_are_a_parse_error() {
        let divisions = write_temp("truncated_divisions.json", "{}");
        let coordinates = write_temp("truncated_coordinates.json", r#"{ "010150": { "lat": "#);

        assert!(matches!(
            read_coordinates(&coordinates),
            Err(GeoError::Parse { .. })
        ));
        assert!(read_divisions(&divisions).unwrap().is_empty());
    }
}
