//! Grant record as returned by the remote store.

use serde::{Deserialize, Deserializer, Serialize};

/// One funded-program entry.
///
/// Records are immutable once fetched. Text columns that arrive as `null`
/// are read as empty strings, and `funding` accepts either a JSON number or
/// a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantRecord {
    /// Project sponsor name.
    #[serde(rename = "project_sponsor", default, deserialize_with = "text_or_null")]
    pub sponsor: String,
    /// Grant program name.
    #[serde(rename = "grant_program", default, deserialize_with = "text_or_null")]
    pub program: String,
    /// Fiscal year of the award.
    pub fiscal_year: i32,
    /// Funding amount in dollars.
    #[serde(deserialize_with = "funding_amount")]
    pub funding: f64,
    /// Free-text project description.
    #[serde(
        rename = "project_description",
        default,
        deserialize_with = "text_or_null"
    )]
    pub description: String,
    /// Unique opportunity identifier.
    #[serde(default, deserialize_with = "text_or_null")]
    pub opportunity_id: String,
}

impl GrantRecord {
    /// Funding truncated towards zero to whole dollars.
    pub fn funding_whole(&self) -> i64 {
        self.funding.trunc() as i64
    }

    /// The four text fields searched by a free-text term, in match order.
    pub fn text_fields(&self) -> [&str; 4] {
        [
            &self.sponsor,
            &self.program,
            &self.description,
            &self.opportunity_id,
        ]
    }
}

fn text_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

fn funding_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(n) => n,
        RawAmount::Text(s) => s.trim().parse::<f64>().map_err(|_| {
            serde::de::Error::custom(format!("funding is not numeric: {:?}", s))
        })?,
    };

    if !amount.is_finite() || amount < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "funding must be a non-negative amount, got {}",
            amount
        )));
    }

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_wire_row() {
        let json = r#"{
            "id": 17,
            "project_sponsor": "Metro Transit",
            "grant_program": "Bus and Bus Facilities",
            "fiscal_year": 2024,
            "funding": 1250000,
            "project_description": "Replace diesel buses",
            "opportunity_id": "FTA-2024-001"
        }"#;

        let record: GrantRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.sponsor, "Metro Transit");
        assert_eq!(record.program, "Bus and Bus Facilities");
        assert_eq!(record.fiscal_year, 2024);
        assert_eq!(record.funding_whole(), 1_250_000);
        assert_eq!(record.opportunity_id, "FTA-2024-001");
    }

    #[test]
    fn test_funding_string_is_coerced() {
        let json = r#"{"fiscal_year": 2023, "funding": " 98765.99 ",
            "project_sponsor": "A", "grant_program": "B",
            "project_description": null, "opportunity_id": "X"}"#;

        let record: GrantRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.funding, 98765.99);
        assert_eq!(record.funding_whole(), 98765);
        assert_eq!(record.description, "");
    }

    #[test]
    fn test_rejects_garbage_funding() {
        let json = r#"{"fiscal_year": 2023, "funding": "lots"}"#;
        assert!(serde_json::from_str::<GrantRecord>(json).is_err());

        let json = r#"{"fiscal_year": 2023, "funding": -5}"#;
        assert!(serde_json::from_str::<GrantRecord>(json).is_err());
    }
}
