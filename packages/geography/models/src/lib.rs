#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Administrative division and parish geocoding types.
//!
//! The raw types mirror the two reference datasets loaded at startup: the
//! province → canton → parish division tree and the per-parish coordinate
//! table. [`ParishDetail`] is the joined, display-ready form stored in the
//! administrative index.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Parish internal ID → raw parish name, as listed under a canton.
pub type RawParishNames = BTreeMap<String, String>;

/// Canton name → parishes, as listed under a province.
pub type RawCantons = BTreeMap<String, RawParishNames>;

/// The raw division tree: province name → canton name → parish ID → name.
///
/// Names are kept exactly as they appear in the source file; normalization
/// happens when the index is built.
pub type RawDivisionRecord = BTreeMap<String, RawCantons>;

/// The raw coordinate table: parish internal ID → coordinates.
pub type RawCoordinateRecord = BTreeMap<String, RawCoordinate>;

/// A single geocoded parish entry from the coordinate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCoordinate {
    /// Name as written in the coordinate source. Informational only; the
    /// division tree is the source of truth for display names.
    #[serde(default, alias = "nombre")]
    pub name: String,
    /// Latitude (WGS84).
    #[serde(alias = "lat", alias = "latitud")]
    pub latitude: f64,
    /// Longitude (WGS84).
    #[serde(alias = "lng", alias = "lon", alias = "longitud")]
    pub longitude: f64,
}

/// A parish that has both a place in the division tree and coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParishDetail {
    /// Internal parish ID shared by both source datasets.
    pub id: String,
    /// Title-cased display name (e.g. "Tarqui").
    pub display_name: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}
