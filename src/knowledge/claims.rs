use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::{wikidata_entity_id, KnowledgeBase};

pub const PROP_DATE_OF_BIRTH: &str = "P569";
pub const PROP_DATE_OF_DEATH: &str = "P570";
pub const PROP_THEATERLEXIKON_ID: &str = "P1362";

const THEATERLEXIKON_BASE: &str = "http://tls.theaterwissenschaft.ch/wiki/";

/// Claims document as returned by `wbgetclaims`
#[derive(Debug, Clone, Default)]
pub struct Claims {
    json: Value,
}

impl Claims {
    pub fn new(json: Value) -> Self {
        Self { json }
    }

    /// Plain values of one property in claim order.
    ///
    /// Stops at the first claim without a value (`novalue` / `somevalue`).
    /// Entity references yield their id, dates their time string, texts their text.
    pub fn values(&self, property: &str) -> Vec<String> {
        let Some(claims) = self.json["claims"][property].as_array() else {
            return Vec::new();
        };

        let mut values = Vec::new();
        for claim in claims {
            let snak = &claim["mainsnak"];
            if matches!(snak["snaktype"].as_str(), Some("novalue" | "somevalue")) {
                break;
            }
            let value = &snak["datavalue"]["value"];
            let extracted = match value {
                Value::String(s) => Some(s.as_str()),
                Value::Object(o) => ["id", "time", "text"]
                    .iter()
                    .find_map(|key| o.get(*key).and_then(Value::as_str)),
                _ => None,
            };
            if let Some(v) = extracted {
                values.push(v.to_string());
            }
        }
        values
    }
}

/// Biographical facts fetched for one authority entry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Enrichment {
    pub dob: Option<String>,
    pub dod: Option<String>,
    pub theaterlexikon: Option<String>,
}

impl Enrichment {
    pub fn from_claims(claims: &Claims) -> Self {
        let theaterlexikon = claims
            .values(PROP_THEATERLEXIKON_ID)
            .into_iter()
            .next()
            .map(|id| format!("{}{}", THEATERLEXIKON_BASE, id));

        Self {
            dob: format_wikidate(&claims.values(PROP_DATE_OF_BIRTH)),
            dod: format_wikidate(&claims.values(PROP_DATE_OF_DEATH)),
            theaterlexikon,
        }
    }
}

/// Look up enrichment facts for a Wikidata URI.
///
/// Lookup failures are logged and produce an empty enrichment.
pub async fn enrich<K: KnowledgeBase + ?Sized>(kb: &K, uri: &str) -> Enrichment {
    let Some(entity_id) = wikidata_entity_id(uri) else {
        return Enrichment::default();
    };

    match kb.claims(entity_id).await {
        Ok(claims) => Enrichment::from_claims(&claims),
        Err(e) => {
            warn!("Wikidata lookup for {} failed: {}", entity_id, e);
            Enrichment::default()
        }
    }
}

/// Format the first Wikidata time value as `D.M.YYYY`
fn format_wikidate(values: &[String]) -> Option<String> {
    let time = values.first()?;
    // "+1911-05-15T00:00:00Z" -> "1911-05-15T00:00:00"
    let inner = time.get(1..time.len().checked_sub(1)?)?;
    let date = NaiveDateTime::parse_from_str(inner, "%Y-%m-%dT%H:%M:%S").ok()?;
    Some(format!("{}.{}.{}", date.day(), date.month(), date.year()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn frisch_claims() -> Claims {
        Claims::new(json!({
            "claims": {
                "P569": [{
                    "mainsnak": {
                        "snaktype": "value",
                        "datavalue": {"value": {"time": "+1911-05-15T00:00:00Z", "precision": 11}}
                    }
                }],
                "P570": [{
                    "mainsnak": {
                        "snaktype": "value",
                        "datavalue": {"value": {"time": "+1991-04-04T00:00:00Z", "precision": 11}}
                    }
                }],
                "P1362": [
                    {"mainsnak": {"snaktype": "value", "datavalue": {"value": "Max_Frisch"}}}
                ]
            }
        }))
    }

    #[test]
    fn test_enrichment_from_claims() {
        let enrichment = Enrichment::from_claims(&frisch_claims());

        assert_eq!(enrichment.dob.as_deref(), Some("15.5.1911"));
        assert_eq!(enrichment.dod.as_deref(), Some("4.4.1991"));
        assert_eq!(
            enrichment.theaterlexikon.as_deref(),
            Some("http://tls.theaterwissenschaft.ch/wiki/Max_Frisch")
        );
    }

    #[test]
    fn test_values_stop_at_novalue() {
        let claims = Claims::new(json!({
            "claims": {
                "P570": [
                    {"mainsnak": {"snaktype": "somevalue"}},
                    {"mainsnak": {"snaktype": "value", "datavalue": {"value": {"time": "+1990-01-01T00:00:00Z"}}}}
                ],
                "P31": [
                    {"mainsnak": {"snaktype": "value", "datavalue": {"value": {"id": "Q5"}}}}
                ]
            }
        }));

        assert!(claims.values("P570").is_empty());
        assert_eq!(claims.values("P31"), vec!["Q5"]);
        assert!(claims.values("P999").is_empty());
    }

    #[test]
    fn test_format_wikidate_rejects_partial_dates() {
        assert_eq!(format_wikidate(&["+1920-00-00T00:00:00Z".to_string()]), None);
        assert_eq!(format_wikidate(&[]), None);
        assert_eq!(format_wikidate(&["".to_string()]), None);
    }
}
