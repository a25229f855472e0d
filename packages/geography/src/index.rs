//! The in-memory administrative index.
//!
//! Built once from the raw division tree and coordinate table. Keys at both
//! levels are [`canonicalize`]d names. Original spelling survives, title-cased,
//! in [`ParishDetail::display_name`] and in the province and canton display
//! names kept beside the keys.

use std::collections::BTreeMap;

use hazard_map_geography_models::{ParishDetail, RawCoordinateRecord, RawDivisionRecord};

use crate::normalize::{canonicalize, title_case};

/// Normalized canton key → parishes with coordinates, ordered by parish ID.
pub type CantonIndex = BTreeMap<String, Vec<ParishDetail>>;

/// Counters reported after an index build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Parishes that made it into the index.
    pub parishes_indexed: usize,
    /// Parishes skipped because the coordinate table has no entry for them.
    pub parishes_without_coordinates: usize,
    /// Distinct canton keys registered in the index.
    pub cantons_retained: usize,
    /// Raw cantons dropped because none of their parishes had coordinates.
    pub cantons_dropped: usize,
}

/// Normalized province → canton → parish index.
///
/// Invariant: every registered canton has at least one parish, and every
/// registered province has at least one canton. A canton with no geocoded
/// parishes is indistinguishable from a canton that does not exist.
#[derive(Debug, Clone, Default)]
pub struct AdministrativeIndex {
    provinces: BTreeMap<String, CantonIndex>,
    names: BTreeMap<String, ProvinceNames>,
}

/// Display names of a province and its cantons, keyed like the index.
#[derive(Debug, Clone, Default)]
struct ProvinceNames {
    display_name: String,
    cantons: BTreeMap<String, String>,
}

impl AdministrativeIndex {
    /// Joins the division tree with the coordinate table.
    ///
    /// Raw names that normalize to the same key are merged into one entry.
    #[must_use]
    pub fn build(divisions: &RawDivisionRecord, coordinates: &RawCoordinateRecord) -> Self {
        Self::build_with_stats(divisions, coordinates).0
    }

    /// Same as [`Self::build`], also returning the build counters.
    #[must_use]
    pub fn build_with_stats(
        divisions: &RawDivisionRecord,
        coordinates: &RawCoordinateRecord,
    ) -> (Self, IndexStats) {
        let mut provinces: BTreeMap<String, CantonIndex> = BTreeMap::new();
        let mut names: BTreeMap<String, ProvinceNames> = BTreeMap::new();
        let mut stats = IndexStats::default();

        for (province_name, cantons) in divisions {
            let province_key = canonicalize(province_name);
            if province_key.is_empty() {
                log::warn!("Skipping province with blank name {province_name:?}");
                continue;
            }

            for (canton_name, parishes) in cantons {
                let canton_key = canonicalize(canton_name);
                if canton_key.is_empty() {
                    log::warn!("Skipping canton with blank name in {province_key}");
                    stats.cantons_dropped += 1;
                    continue;
                }

                let mut details = Vec::with_capacity(parishes.len());
                for (parish_id, raw_name) in parishes {
                    let Some(coords) = coordinates.get(parish_id) else {
                        stats.parishes_without_coordinates += 1;
                        continue;
                    };
                    details.push(ParishDetail {
                        id: parish_id.clone(),
                        display_name: title_case(raw_name),
                        latitude: coords.latitude,
                        longitude: coords.longitude,
                    });
                }

                if details.is_empty() {
                    log::debug!("Dropping canton {province_key}/{canton_key}: no geocoded parishes");
                    stats.cantons_dropped += 1;
                    continue;
                }

                // First raw spelling seen wins for merged keys.
                names
                    .entry(province_key.clone())
                    .or_insert_with(|| ProvinceNames {
                        display_name: title_case(province_name),
                        cantons: BTreeMap::new(),
                    })
                    .cantons
                    .entry(canton_key.clone())
                    .or_insert_with(|| title_case(canton_name));

                let entry = provinces
                    .entry(province_key.clone())
                    .or_default()
                    .entry(canton_key)
                    .or_default();
                entry.extend(details);
                entry.sort_by(|a, b| a.id.cmp(&b.id));
                entry.dedup_by(|a, b| a.id == b.id);
            }
        }

        stats.cantons_retained = provinces.values().map(BTreeMap::len).sum();
        stats.parishes_indexed = provinces
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum();

        log::info!(
            "Indexed {} parishes in {} cantons across {} provinces ({} cantons dropped, {} parishes without coordinates)",
            stats.parishes_indexed,
            stats.cantons_retained,
            provinces.len(),
            stats.cantons_dropped,
            stats.parishes_without_coordinates,
        );

        (Self { provinces, names }, stats)
    }

    /// Looks up a province by its normalized key, returning the stored key
    /// alongside its cantons.
    #[must_use]
    pub fn province(&self, key: &str) -> Option<(&str, &CantonIndex)> {
        self.provinces
            .get_key_value(key)
            .map(|(k, cantons)| (k.as_str(), cantons))
    }

    /// Iterates provinces in key order.
    pub fn provinces(&self) -> impl Iterator<Item = (&str, &CantonIndex)> {
        self.provinces.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Canton keys registered under a province, in key order.
    #[must_use]
    pub fn canton_keys(&self, province_key: &str) -> Vec<&str> {
        self.provinces
            .get(province_key)
            .map(|cantons| cantons.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Title-cased spelling of a registered province.
    #[must_use]
    pub fn province_display_name(&self, province_key: &str) -> Option<&str> {
        self.names
            .get(province_key)
            .map(|names| names.display_name.as_str())
    }

    /// Title-cased spelling of a registered canton.
    #[must_use]
    pub fn canton_display_name(&self, province_key: &str, canton_key: &str) -> Option<&str> {
        self.names
            .get(province_key)
            .and_then(|names| names.cantons.get(canton_key))
            .map(String::as_str)
    }

    #[must_use]
    pub fn province_count(&self) -> usize {
        self.provinces.len()
    }

    #[must_use]
    pub fn canton_count(&self) -> usize {
        self.provinces.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn parish_count(&self) -> usize {
        self.provinces
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.provinces.is_empty()
    }
}
