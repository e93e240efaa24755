use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// One line of the input stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputRecord {
    #[serde(default)]
    pub claim: Option<String>,
    #[serde(default)]
    pub label: GoldValue,
}

impl InputRecord {
    /// Trimmed claim, or `None` when the record should be skipped.
    pub fn claim_text(&self) -> Option<&str> {
        self.claim.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

/// Gold label as it appeared in the input. Only `String` takes part in scoring;
/// every variant is written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GoldValue {
    String(String),
    Other(Value),
    #[default]
    Absent,
}

impl GoldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            GoldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for GoldValue {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        Ok(match Option::<Value>::deserialize(de)? {
            None | Some(Value::Null) => GoldValue::Absent,
            Some(Value::String(s)) => GoldValue::String(s),
            Some(other) => GoldValue::Other(other),
        })
    }
}

impl Serialize for GoldValue {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            GoldValue::String(s) => ser.serialize_str(s),
            GoldValue::Other(v) => v.serialize(ser),
            GoldValue::Absent => ser.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalLabel {
    #[serde(rename = "supports")]
    Supports,
    #[serde(rename = "refutes")]
    Refutes,
    #[serde(rename = "NOT ENOUGH INFO")]
    NotEnoughInfo,
}

impl CanonicalLabel {
    pub const ALL: [CanonicalLabel; 3] = [
        CanonicalLabel::Supports,
        CanonicalLabel::Refutes,
        CanonicalLabel::NotEnoughInfo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalLabel::Supports => "supports",
            CanonicalLabel::Refutes => "refutes",
            CanonicalLabel::NotEnoughInfo => "NOT ENOUGH INFO",
        }
    }
}

impl fmt::Display for CanonicalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the output stream. Field order is the on-disk key order.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRecord {
    pub claim: String,
    pub predicted_label: CanonicalLabel,
    pub label: GoldValue,
}
