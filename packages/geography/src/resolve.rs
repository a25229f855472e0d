//! Resolution of free-text (province, canton) input to parishes.
//!
//! Provinces must match exactly after normalization. Cantons try an exact
//! normalized match first and fall back to bidirectional substring
//! containment among the province's cantons, which absorbs minor naming
//! variants ("Santo Domingo" vs "Santo Domingo de los Colorados").

use hazard_map_geography_models::ParishDetail;

use crate::{AdministrativeIndex, ResolveError, normalize::canonicalize};

/// How a canton was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Normalized input equals a registered canton key.
    Exact,
    /// Input and key contain one another.
    Approximate,
}

/// A successful resolution against the index.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    /// Registered province key.
    pub province_key: &'a str,
    /// Registered canton key that was selected.
    pub canton_key: &'a str,
    /// Whether the canton matched exactly or via the fallback.
    pub match_kind: MatchKind,
    /// Parishes of the canton, ordered by parish ID. Never empty.
    pub parishes: &'a [ParishDetail],
}

/// Resolves a province and canton to the canton's parishes.
///
/// When several cantons satisfy the containment fallback, the shortest key
/// wins and ties go to the lexicographically smallest key, so the outcome
/// does not depend on map iteration order.
///
/// # Errors
///
/// * [`ResolveError::ProvinceNotFound`] if the normalized province is not
///   registered. There is no approximate matching for provinces.
/// * [`ResolveError::CantonNotFound`] if neither exact nor approximate
///   matching finds a canton.
pub fn resolve<'a>(
    index: &'a AdministrativeIndex,
    province: &str,
    canton: &str,
) -> Result<Resolution<'a>, ResolveError> {
    let province_key = canonicalize(province);
    let canton_key = canonicalize(canton);

    let Some((province_key, cantons)) = index.province(&province_key) else {
        return Err(ResolveError::ProvinceNotFound {
            province: province.to_string(),
        });
    };

    if let Some((key, parishes)) = cantons.get_key_value(&canton_key) {
        return Ok(Resolution {
            province_key,
            canton_key: key,
            match_kind: MatchKind::Exact,
            parishes,
        });
    }

    if canton_key.is_empty() {
        return Err(ResolveError::CantonNotFound {
            province: province.to_string(),
            canton: canton.to_string(),
        });
    }

    let candidates: Vec<(&String, &Vec<ParishDetail>)> = cantons
        .iter()
        .filter(|(key, _)| key.contains(&canton_key) || canton_key.contains(key.as_str()))
        .collect();

    let Some(&(key, parishes)) = candidates.iter().min_by(|(a, _), (b, _)| {
        a.chars()
            .count()
            .cmp(&b.chars().count())
            .then_with(|| a.cmp(b))
    }) else {
        return Err(ResolveError::CantonNotFound {
            province: province.to_string(),
            canton: canton.to_string(),
        });
    };

    if candidates.len() > 1 {
        log::warn!(
            "Ambiguous approximate canton match for '{canton}' in {province_key}: candidates [{}], using {key}",
            candidates
                .iter()
                .map(|(k, _)| k.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    } else {
        log::warn!("Approximate canton match for '{canton}' in {province_key}: using {key}");
    }

    Ok(Resolution {
        province_key,
        canton_key: key,
        match_kind: MatchKind::Approximate,
        parishes,
    })
}

#[cfg(test)]
mod tests {
    use hazard_map_geography_models::{RawCoordinate, RawCoordinateRecord, RawDivisionRecord};

    use super::*;

    /// Builds an index where every parish ID listed has coordinates.
    fn index(value: serde_json::Value) -> AdministrativeIndex {
        let divisions: RawDivisionRecord = serde_json::from_value(value).unwrap();
        let coordinates: RawCoordinateRecord = divisions
            .values()
            .flat_map(|cantons| cantons.values())
            .flat_map(|parishes| parishes.keys())
            .map(|id| {
                (
                    id.clone(),
                    RawCoordinate {
                        name: String::new(),
                        latitude: -1.0,
                        longitude: -79.0,
                    },
                )
            })
            .collect();
        AdministrativeIndex::build(&divisions, &coordinates)
    }

    fn ecuador() -> AdministrativeIndex {
        index(serde_json::json!({
            "Guayas": {
                "Guayaquil": { "090150": "TARQUI", "090151": "XIMENA" },
                "Samborondón": { "091650": "SAMBORONDÓN" },
                "Durán": { "090750": "ELOY ALFARO (DURÁN)" }
            },
            "Pichincha": {
                "Samborondón": { "179950": "SAMBORONDÓN" },
                "Quito": { "170150": "QUITO" },
                "Pedro Moncayo": { "171050": "TABACUNDO" }
            },
            "Santo Domingo de los Tsáchilas": {
                "Santo Domingo": { "230150": "SANTO DOMINGO" },
                "La Concordia": { "230250": "LA CONCORDIA" }
            }
        }))
    }

    #[test]
    fn resolves_exact_match_ignoring_case_and_accents() {
        let index = ecuador();
        let resolution = resolve(&index, "guayas", "SAMBORONDON").unwrap();
        assert_eq!(resolution.province_key, "GUAYAS");
        assert_eq!(resolution.canton_key, "SAMBORONDON");
        assert_eq!(resolution.match_kind, MatchKind::Exact);
        assert_eq!(resolution.parishes[0].display_name, "Samborondón");
    }

    #[test]
    fn missing_tilde_resolves_without_fallback() {
        let index = ecuador();
        let resolution = resolve(&index, "Pichincha", "Samborondon").unwrap();
        assert_eq!(resolution.canton_key, "SAMBORONDON");
        assert_eq!(resolution.match_kind, MatchKind::Exact);
        assert_eq!(resolution.parishes[0].id, "179950");
    }

    #[test]
    fn unknown_province_has_no_fallback() {
        let index = ecuador();
        let err = resolve(&index, "Guaya", "Guayaquil").unwrap_err();
        assert_eq!(
            err,
            ResolveError::ProvinceNotFound {
                province: "Guaya".to_string()
            }
        );
    }

    #[test]
    fn falls_back_when_input_is_longer_than_key() {
        let index = ecuador();
        let resolution = resolve(&index, "Guayas", "Guayaquil Centro").unwrap();
        assert_eq!(resolution.canton_key, "GUAYAQUIL");
        assert_eq!(resolution.match_kind, MatchKind::Approximate);
        assert_eq!(resolution.parishes.len(), 2);
    }

    #[test]
    fn falls_back_when_key_is_longer_than_input() {
        let index = ecuador();
        let resolution = resolve(&index, "Pichincha", "moncayo").unwrap();
        assert_eq!(resolution.canton_key, "PEDRO MONCAYO");
        assert_eq!(resolution.match_kind, MatchKind::Approximate);
    }

    #[test]
    fn exact_match_wins_over_fallback() {
        // The longer key also passes the containment test.
        let index = index(serde_json::json!({
            "Santo Domingo de los Tsáchilas": {
                "Santo Domingo de los Colorados": { "230151": "BOMBOLÍ" },
                "Santo Domingo": { "230150": "SANTO DOMINGO" }
            }
        }));
        let resolution =
            resolve(&index, "Santo Domingo de los Tsachilas", "santo domingo").unwrap();
        assert_eq!(resolution.canton_key, "SANTO DOMINGO");
        assert_eq!(resolution.match_kind, MatchKind::Exact);
    }

    #[test]
    fn ambiguous_fallback_picks_shortest_then_lexicographic_key() {
        let index = index(serde_json::json!({
            "Loja": {
                "San Pedro de Vilcabamba": { "110151": "VILCABAMBA" },
                "San Pedro Norte": { "110152": "NORTE" },
                "San Pedro Sur": { "110153": "SUR" },
                "San Pedro Este": { "110154": "ESTE" }
            }
        }));

        let first = resolve(&index, "Loja", "San Pedro").unwrap();
        assert_eq!(first.canton_key, "SAN PEDRO SUR");
        assert_eq!(first.match_kind, MatchKind::Approximate);

        for _ in 0..10 {
            let again = resolve(&index, "Loja", "San Pedro").unwrap();
            assert_eq!(again.canton_key, first.canton_key);
        }
    }

    #[test]
    fn ambiguous_fallback_breaks_length_ties_lexicographically() {
        let index = index(serde_json::json!({
            "Loja": {
                "Alamor Bajo": { "110160": "B" },
                "Alamor Alto": { "110161": "A" }
            }
        }));
        let resolution = resolve(&index, "Loja", "Alamor").unwrap();
        assert_eq!(resolution.canton_key, "ALAMOR ALTO");
    }

    #[test]
    fn unmatched_canton_is_not_found() {
        let index = ecuador();
        let err = resolve(&index, "Guayas", "Riobamba").unwrap_err();
        assert_eq!(
            err,
            ResolveError::CantonNotFound {
                province: "Guayas".to_string(),
                canton: "Riobamba".to_string(),
            }
        );
    }

    #[test]
    fn canton_from_another_province_is_not_found() {
        let index = ecuador();
        assert!(matches!(
            resolve(&index, "Guayas", "Quito"),
            Err(ResolveError::CantonNotFound { .. })
        ));
    }

    #[test]
    fn blank_canton_is_not_found() {
        let index = ecuador();
        assert!(matches!(
            resolve(&index, "Guayas", "   "),
            Err(ResolveError::CantonNotFound { .. })
        ));
    }
}
