#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Administrative index construction and place-name resolution.
//!
//! Joins the province → canton → parish division tree with the parish
//! coordinate table into an [`index::AdministrativeIndex`] keyed by
//! normalized names, then resolves free-text (province, canton) input
//! against it. The index is built once at startup and is read-only
//! afterwards, so it can be shared behind an `Arc` without locking.

pub mod index;
pub mod load;
pub mod normalize;
pub mod resolve;

pub use index::AdministrativeIndex;
pub use resolve::{MatchKind, Resolution, resolve};

use thiserror::Error;

/// Errors that can occur while loading the reference datasets.
///
/// Any of these is fatal at startup: the process must not serve requests
/// without an index.
#[derive(Debug, Error)]
pub enum GeoError {
    /// A reference file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path of the file that failed to open or read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A reference file did not match the expected JSON structure.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// Path of the malformed file.
        path: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Errors returned when user input cannot be resolved against the index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No province has the normalized key of the input.
    #[error("Province not found: {province}")]
    ProvinceNotFound {
        /// Province text as supplied by the caller.
        province: String,
    },

    /// The province exists but neither exact nor approximate canton
    /// matching found a canton with geocoded parishes.
    #[error("Canton not found: {canton} in {province}")]
    CantonNotFound {
        /// Province text as supplied by the caller.
        province: String,
        /// Canton text as supplied by the caller.
        canton: String,
    },
}
