use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static SAPA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^http://data\.performing-arts\.ch/\w/[0-9a-f\-]{36}").unwrap()
});
static WIKIDATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^http://www\.wikidata\.org/entity/(Q\d+)").unwrap());

/// External identifier columns of the authority table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    Wikidata,
    Sapa,
}

impl IdentifierKind {
    pub fn is_valid(self, value: &str) -> bool {
        match self {
            IdentifierKind::Wikidata => WIKIDATA_RE.is_match(value.trim()),
            IdentifierKind::Sapa => SAPA_RE.is_match(value.trim()),
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierKind::Wikidata => write!(f, "Wikidata"),
            IdentifierKind::Sapa => write!(f, "SAPA"),
        }
    }
}

/// An identifier that failed its structural check
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SuspectIdentifier {
    pub entity: String,
    pub kind: IdentifierKind,
    pub value: String,
}

/// Check an optional identifier cell; blank cells are not suspect
pub fn check_identifier(
    entity: &str,
    kind: IdentifierKind,
    value: Option<&str>,
) -> Option<SuspectIdentifier> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    if kind.is_valid(value) {
        return None;
    }
    Some(SuspectIdentifier {
        entity: entity.to_string(),
        kind,
        value: value.to_string(),
    })
}

/// `Q…` id of a Wikidata entity URI
pub fn wikidata_entity_id(uri: &str) -> Option<&str> {
    WIKIDATA_RE
        .captures(uri.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
