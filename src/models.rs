use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Credit type counted as a written analysis.
pub const CREDIT_WRITTEN: &str = "Written by";
/// Credit type counted as a quality check.
pub const CREDIT_QUALITY_CHECKED: &str = "Quality checked by";

// ============ Upstream Models ============

/// A credit entry as embedded in the CMS page.
///
/// Fields default when absent or `null`; upstream schema is accessed best-effort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCredit {
    /// `"<generation>/<format>"`, e.g. `"sv/OU"`.
    #[serde(deserialize_with = "null_as_default")]
    pub format_id: String,
    /// `"<generation>/<name>"`, e.g. `"sv/Chinchou"`.
    #[serde(deserialize_with = "null_as_default")]
    pub pokemon_id: String,
    /// Locale code.
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    /// Free-text role label.
    #[serde(deserialize_with = "null_as_default")]
    pub credit_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub set_order: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub credit_order: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub gen_order: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decoded `react-data` payload. Only `credits` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CmsPayload {
    #[serde(default)]
    pub credits: Option<Vec<RawCredit>>,
}

// ============ Report Models ============

/// One normalized contribution, one per [`RawCredit`] in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    /// `<pokemonId>_<formatId>_<setOrder>_<index>`.
    pub id: String,
    pub credit_type: String,
    #[serde(rename = "pokemon")]
    pub pokemon_name: String,
    pub format: String,
    pub generation: String,
    pub language: String,
    /// Dex page for the Pokémon in this generation.
    pub url: String,
    pub set_number: i64,
}

/// Aggregate counts over a report's contributions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionStats {
    #[serde(rename = "written")]
    pub written_count: u64,
    #[serde(rename = "qualityChecked")]
    pub quality_checked_count: u64,
    #[serde(rename = "byFormat")]
    pub counts_by_format: BTreeMap<String, u64>,
    #[serde(rename = "byGeneration")]
    pub counts_by_generation: BTreeMap<String, u64>,
}

/// The artifact written to disk after a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionReport {
    pub user_id: String,
    pub username: String,
    /// Time the report was assembled, not the time of the fetch.
    #[serde(with = "iso_millis")]
    pub fetched_at: DateTime<Utc>,
    #[serde(rename = "totalContributions")]
    pub total_count: usize,
    pub contributions: Vec<Contribution>,
    pub stats: ContributionStats,
}

impl ContributionReport {
    /// Contributions whose credit type matches `credit_type` exactly.
    pub fn by_credit_type<'a>(
        &'a self,
        credit_type: &'a str,
    ) -> impl Iterator<Item = &'a Contribution> + 'a {
        self.contributions
            .iter()
            .filter(move |c| c.credit_type == credit_type)
    }

    /// Contributions credited as "Written by".
    pub fn written_contributions(&self) -> impl Iterator<Item = &Contribution> + '_ {
        self.by_credit_type(CREDIT_WRITTEN)
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_raw_credit_missing_fields_default() {
        let json = r#"{"format_id": "sv/OU", "pokemon_id": "sv/Chinchou"}"#;
        let credit: RawCredit = serde_json::from_str(json).unwrap();
        assert_eq!(credit.format_id, "sv/OU");
        assert_eq!(credit.credit_type, "");
        assert_eq!(credit.set_order, 0);
    }

    #[test]
    fn test_raw_credit_null_fields_default() {
        let json = r#"{"format_id": "sv/OU", "language": null, "set_order": null}"#;
        let credit: RawCredit = serde_json::from_str(json).unwrap();
        assert_eq!(credit.format_id, "sv/OU");
        assert_eq!(credit.language, "");
        assert_eq!(credit.set_order, 0);
    }

    #[test]
    fn test_payload_without_credits() {
        let payload: CmsPayload = serde_json::from_str(r#"{"user": {"id": 1}}"#).unwrap();
        assert!(payload.credits.is_none());

        let payload: CmsPayload = serde_json::from_str(r#"{"credits": null}"#).unwrap();
        assert!(payload.credits.is_none());
    }

    #[test]
    fn test_report_serializes_with_artifact_field_names() {
        let report = ContributionReport {
            user_id: "641532".into(),
            username: "Someone".into(),
            fetched_at: Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap(),
            total_count: 1,
            contributions: vec![Contribution {
                id: "sv/Chinchou_sv/OU_1_0".into(),
                credit_type: CREDIT_WRITTEN.into(),
                pokemon_name: "Chinchou".into(),
                format: "OU".into(),
                generation: "sv".into(),
                language: "en".into(),
                url: "https://www.smogon.com/dex/sv/pokemon/chinchou".into(),
                set_number: 1,
            }],
            stats: ContributionStats {
                written_count: 1,
                quality_checked_count: 0,
                counts_by_format: BTreeMap::from([("OU".to_string(), 1)]),
                counts_by_generation: BTreeMap::from([("sv".to_string(), 1)]),
            },
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["userId"], "641532");
        assert_eq!(value["fetchedAt"], "2025-03-04T05:06:07.000Z");
        assert_eq!(value["totalContributions"], 1);
        assert_eq!(value["contributions"][0]["pokemon"], "Chinchou");
        assert_eq!(value["contributions"][0]["creditType"], "Written by");
        assert_eq!(value["contributions"][0]["setNumber"], 1);
        assert_eq!(value["stats"]["written"], 1);
        assert_eq!(value["stats"]["qualityChecked"], 0);
        assert_eq!(value["stats"]["byFormat"]["OU"], 1);
        assert_eq!(value["stats"]["byGeneration"]["sv"], 1);

        let back: ContributionReport = serde_json::from_value(value).unwrap();
        assert_eq!(back, report);
        assert_eq!(back.written_contributions().count(), 1);
        assert_eq!(back.by_credit_type(CREDIT_QUALITY_CHECKED).count(), 0);
    }
}
