//! Aggregate statistics over the live findings.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::finding::Finding;

/// Number of entries reported in [`FindingStats::top_pets`].
pub const TOP_PETS_LIMIT: usize = 10;

/// Occurrence count for one pet name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetCount {
    /// Pet name.
    pub pet: String,
    /// Occurrences summed across every live finding.
    pub count: usize,
}

/// Summary of the live findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingStats {
    /// Live finding count.
    pub total_findings: usize,
    /// Distinct pet names across all live findings.
    pub unique_pets: usize,
    /// Most frequent pets, highest first.
    pub top_pets: Vec<PetCount>,
    /// Timestamp of the oldest live finding.
    #[serde(serialize_with = "serialize_iso_millis")]
    pub oldest_finding: Option<DateTime<Utc>>,
    /// Timestamp of the newest live finding.
    #[serde(serialize_with = "serialize_iso_millis")]
    pub newest_finding: Option<DateTime<Utc>>,
}

impl FindingStats {
    /// Aggregate over `findings`, which must already be compacted.
    ///
    /// Pets are tallied in iteration order, and ties in the ranking keep the
    /// order in which each pet was first seen.
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut tally: Vec<PetCount> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for pet in findings.iter().flat_map(|finding| finding.pets.iter()) {
            match positions.get(pet.as_str()) {
                Some(&index) => tally[index].count += 1,
                None => {
                    positions.insert(pet.as_str(), tally.len());
                    tally.push(PetCount {
                        pet: pet.clone(),
                        count: 1,
                    });
                }
            }
        }

        let unique_pets = tally.len();
        tally.sort_by(|a, b| b.count.cmp(&a.count));
        tally.truncate(TOP_PETS_LIMIT);

        Self {
            total_findings: findings.len(),
            unique_pets,
            top_pets: tally,
            oldest_finding: findings.iter().map(|f| f.timestamp).min(),
            newest_finding: findings.iter().map(|f| f.timestamp).max(),
        }
    }
}

fn serialize_iso_millis<S>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(instant) => serializer.serialize_str(
            &instant.to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        None => serializer.serialize_none(),
    }
}
