//! Codecs between raw attribute values and application-level properties.
//!
//! Every registry entry owns exactly one [`Codec`]. Decoding is pure and
//! lossy-but-safe: anything it does not understand yields `None`. Encoding
//! produces the raw value to write; the registry performs the actual
//! request against the device.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

pub mod bitfield;
pub mod command;
pub mod diagnostic;
pub mod gates;
pub mod scalar;

pub use bitfield::{BitField, BitfieldCodec, BitfieldLayout};
pub use command::{CommandCodec, CommandPayload, ReadBatch, Resync};
pub use diagnostic::{DiagnosticCodec, Render};
pub use gates::{EnergyHexCodec, GateArrayCodec, GateFormat};
pub use scalar::{BinaryCodec, BinaryWrite, EnumCodec, NumericCodec};

use crate::zcl::RawValue;

/// Decoded, typed value exposed to the gateway.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Number(u32),
    Text(String),
    #[serde(serialize_with = "serialize_fields")]
    Fields(BTreeMap<String, u32>),
}

/// Writes sub-field maps with numeric suffixes in order, `gate2` before
/// `gate10`.
fn serialize_fields<S: Serializer>(
    fields: &BTreeMap<String, u32>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut entries: Vec<_> = fields.iter().collect();
    entries.sort_by(|(a, _), (b, _)| natural_key(a).cmp(&natural_key(b)));
    serializer.collect_map(entries)
}

fn natural_key(key: &str) -> (&str, Option<u64>, &str) {
    let prefix = key.trim_end_matches(|c: char| c.is_ascii_digit());
    (prefix, key[prefix.len()..].parse().ok(), key)
}

impl PropertyValue {
    /// Numeric view; booleans count as 0/1.
    pub fn as_number(&self) -> Option<u32> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            PropertyValue::Bool(b) => Some(u32::from(*b)),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> Option<&BTreeMap<String, u32>> {
        match self {
            PropertyValue::Fields(f) => Some(f),
            _ => None,
        }
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

/// Property name to decoded value, for one report or one write.
pub type Properties = BTreeMap<String, PropertyValue>;

/// What the gateway may do with a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Reported/read diagnostic, never written.
    ReadOnly,
    /// Configuration value, readable and writable.
    ReadWrite,
    /// Stateless trigger, nothing to read back.
    WriteOnly,
}

impl Access {
    pub fn readable(self) -> bool {
        !matches!(self, Access::WriteOnly)
    }

    pub fn writable(self) -> bool {
        !matches!(self, Access::ReadOnly)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Config,
    Diagnostic,
}

/// Inclusive bounds of a numeric property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Range {
    pub min: u32,
    pub max: u32,
}

impl Range {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// The codec variants a registry entry can carry.
#[derive(Clone, Debug)]
pub enum Codec {
    Numeric(NumericCodec),
    Enum(EnumCodec),
    Binary(BinaryCodec),
    Bitfield(BitfieldCodec),
    GateArray(GateArrayCodec),
    EnergyHex(EnergyHexCodec),
    Diagnostic(DiagnosticCodec),
    Command(CommandCodec),
}

impl Codec {
    /// Decode the entry's property from its source attribute value.
    pub fn decode(&self, raw: &RawValue) -> Option<PropertyValue> {
        match self {
            Codec::Numeric(c) => c.decode(raw),
            Codec::Enum(c) => c.decode(raw),
            Codec::Binary(c) => c.decode(raw),
            Codec::Bitfield(c) => c.decode(raw),
            Codec::GateArray(c) => c.decode(raw),
            Codec::EnergyHex(c) => c.decode(raw),
            Codec::Diagnostic(c) => c.decode(raw),
            Codec::Command(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Codec::Numeric(_) => "numeric",
            Codec::Enum(_) => "enum",
            Codec::Binary(_) => "binary",
            Codec::Bitfield(_) => "bitfield",
            Codec::GateArray(_) => "gate_array",
            Codec::EnergyHex(_) => "energy_hex",
            Codec::Diagnostic(_) => "diagnostic",
            Codec::Command(_) => "command",
        }
    }

    /// Labels accepted by enum-like codecs, for describing the property.
    pub fn labels(&self) -> Vec<&'static str> {
        match self {
            Codec::Enum(c) => c.labels().collect(),
            Codec::Binary(c) => vec![c.on.0, c.off.0],
            Codec::Command(c) => c.labels.to_vec(),
            Codec::Diagnostic(c) => match c.render {
                Render::Flag { clear, set } => vec![clear, set],
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Accepted numeric bounds; per gate for gate arrays.
    pub fn range(&self) -> Option<Range> {
        match self {
            Codec::Numeric(c) => c.range,
            Codec::Bitfield(c) => Some(Range::new(0, c.field.max())),
            Codec::GateArray(c) => Some(Range::new(0, u32::from(c.max))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_value_json() {
        let value: PropertyValue = serde_json::from_str("42").unwrap();
        assert_eq!(value, PropertyValue::Number(42));
        let value: PropertyValue = serde_json::from_str(r#""Simple""#).unwrap();
        assert_eq!(value.as_text(), Some("Simple"));
        let value: PropertyValue = serde_json::from_str(r#"{"gate0": 10}"#).unwrap();
        assert_eq!(value.as_fields().unwrap()["gate0"], 10);
        let value: PropertyValue = serde_json::from_str("true").unwrap();
        assert_eq!(value.as_number(), Some(1));
    }

    #[test]
    fn test_fields_serialize_in_suffix_order() {
        let fields: BTreeMap<_, _> = [("gate10", 1), ("gate2", 2), ("gate0", 3), ("base", 4)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let json = serde_json::to_string(&PropertyValue::Fields(fields)).unwrap();
        assert_eq!(json, r#"{"base":4,"gate0":3,"gate2":2,"gate10":1}"#);
    }

    #[test]
    fn test_codec_metadata() {
        let codec = Codec::Enum(EnumCodec::new(&[("Clear", 0), ("Detected", 1)]));
        assert_eq!(codec.labels(), vec!["Clear", "Detected"]);
        assert_eq!(codec.range(), None);

        let codec = Codec::GateArray(GateArrayCodec::new(GateFormat::Plain));
        assert_eq!(codec.range(), Some(Range::new(0, 100)));
        assert_eq!(codec.kind(), "gate_array");
        let restart = Codec::Command(CommandCodec::new(
            crate::zcl::ClusterId::PresenceConfig,
            "restart",
            &["Restart"],
        ));
        assert_eq!(restart.decode(&RawValue::UInt(0)), None);
    }

    #[test]
    fn test_access() {
        assert!(Access::ReadWrite.readable() && Access::ReadWrite.writable());
        assert!(!Access::ReadOnly.writable());
        assert!(!Access::WriteOnly.readable());
    }
}
