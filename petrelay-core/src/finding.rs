//! Finding records and the raw submission shape scanners send.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A rate reported for one pet. Scanners send either a number or a
/// preformatted string, and the store hands back whichever it was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rate {
    /// Numeric rate, kept as the exact JSON number that was submitted.
    Number(serde_json::Number),
    /// Free-form rate such as `"1.2M/s"`.
    Text(String),
}

impl From<i64> for Rate {
    fn from(value: i64) -> Self {
        Rate::Number(value.into())
    }
}

impl From<&str> for Rate {
    fn from(value: &str) -> Self {
        Rate::Text(value.to_string())
    }
}

/// Uniqueness key of a finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FindingKey {
    /// Opaque job identifier.
    pub job_id: String,
    /// Opaque place identifier.
    pub place_id: String,
}

/// One live observation tied to a `(jobId, placeId)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Opaque job identifier, never empty.
    pub job_id: String,
    /// Opaque place identifier, never empty.
    pub place_id: String,
    /// Pet names in the order the scanner reported them, never empty.
    pub pets: Vec<String>,
    /// Per-pet rates; may be empty.
    #[serde(default)]
    pub rates: BTreeMap<String, Rate>,
    /// When this finding was created or last replaced.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl Finding {
    /// Whether this finding shares a key with `job_id`/`place_id`.
    pub fn matches(&self, job_id: &str, place_id: &str) -> bool {
        self.job_id == job_id && self.place_id == place_id
    }

    /// The uniqueness key of this finding.
    pub fn key(&self) -> FindingKey {
        FindingKey {
            job_id: self.job_id.clone(),
            place_id: self.place_id.clone(),
        }
    }
}

/// Raw submission as received from a scanner.
///
/// Every field is optional so that absent values reach validation instead of
/// failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitFinding {
    /// Job identifier.
    pub job_id: Option<String>,
    /// Place identifier.
    pub place_id: Option<String>,
    /// Pet names.
    pub pets: Option<Vec<String>>,
    /// Optional rates keyed by pet name.
    pub rates: Option<BTreeMap<String, Rate>>,
}

impl SubmitFinding {
    /// Build a submission from already-present values.
    pub fn new(
        job_id: impl Into<String>,
        place_id: impl Into<String>,
        pets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            job_id: Some(job_id.into()),
            place_id: Some(place_id.into()),
            pets: Some(pets.into_iter().map(Into::into).collect()),
            rates: None,
        }
    }

    /// Attach a rate for `pet`.
    pub fn with_rate(
        mut self,
        pet: impl Into<String>,
        rate: impl Into<Rate>,
    ) -> Self {
        self.rates
            .get_or_insert_with(BTreeMap::new)
            .insert(pet.into(), rate.into());
        self
    }

    /// Check required fields and stamp the result with `timestamp`.
    pub fn into_finding(
        self,
        timestamp: DateTime<Utc>,
    ) -> Result<Finding, ValidationError> {
        let job_id = self
            .job_id
            .filter(|id| !id.is_empty())
            .ok_or(ValidationError::MissingJobId)?;
        let place_id = self
            .place_id
            .filter(|id| !id.is_empty())
            .ok_or(ValidationError::MissingPlaceId)?;
        let pets = self.pets.ok_or(ValidationError::MissingPets)?;
        if pets.is_empty() {
            return Err(ValidationError::EmptyPets);
        }

        Ok(Finding {
            job_id,
            place_id,
            pets,
            rates: self.rates.unwrap_or_default(),
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submission_requires_non_empty_identifiers() {
        let now = Utc::now();

        let missing_job = SubmitFinding {
            job_id: Some(String::new()),
            ..SubmitFinding::new("J1", "P1", ["Cat"])
        };
        assert_eq!(
            missing_job.into_finding(now),
            Err(ValidationError::MissingJobId)
        );

        let missing_place = SubmitFinding {
            place_id: None,
            ..SubmitFinding::new("J1", "P1", ["Cat"])
        };
        assert_eq!(
            missing_place.into_finding(now),
            Err(ValidationError::MissingPlaceId)
        );
    }

    #[test]
    fn submission_requires_pets() {
        let now = Utc::now();

        let missing = SubmitFinding {
            pets: None,
            ..SubmitFinding::new("J1", "P1", ["Cat"])
        };
        assert_eq!(
            missing.into_finding(now),
            Err(ValidationError::MissingPets)
        );

        let empty = SubmitFinding::new("J1", "P1", Vec::<String>::new());
        assert_eq!(empty.into_finding(now), Err(ValidationError::EmptyPets));
    }

    #[test]
    fn submission_deserializes_camel_case_with_mixed_rates() {
        let raw = json!({
            "jobId": "J1",
            "placeId": "P1",
            "pets": ["Cat", "Dog"],
            "rates": { "Cat": 5, "Dog": "1.5K/s" }
        });

        let submission: SubmitFinding =
            serde_json::from_value(raw).expect("valid submission");
        let finding = submission
            .into_finding(Utc::now())
            .expect("submission passes validation");

        assert_eq!(finding.pets, vec!["Cat", "Dog"]);
        assert_eq!(finding.rates.get("Cat"), Some(&Rate::from(5_i64)));
        assert_eq!(finding.rates.get("Dog"), Some(&Rate::from("1.5K/s")));
    }

    #[test]
    fn finding_serializes_timestamp_as_millis() {
        let timestamp = DateTime::from_timestamp_millis(1_700_000_000_123)
            .expect("valid timestamp");
        let finding = SubmitFinding::new("J1", "P1", ["Cat"])
            .into_finding(timestamp)
            .expect("valid finding");

        let value = serde_json::to_value(&finding).expect("serializes");
        assert_eq!(
            value,
            json!({
                "jobId": "J1",
                "placeId": "P1",
                "pets": ["Cat"],
                "rates": {},
                "timestamp": 1_700_000_000_123_i64
            })
        );
    }
}
