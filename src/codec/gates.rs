//! Per-gate byte arrays of the LD2412 radar.

use super::PropertyValue;
use crate::error::{ProfileError, Result};
use crate::zcl::RawValue;
use crate::zcl::clusters::presence_config::GATE_COUNT;
use std::collections::BTreeMap;

/// Highest sensitivity the radar accepts for a gate.
pub const MAX_SENSITIVITY: u8 = 100;

pub fn gate_key(index: usize) -> String {
    format!("gate{index}")
}

/// Wire framing of a gate array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateFormat {
    /// Exactly [`GATE_COUNT`] bytes.
    Plain,
    /// A count byte equal to [`GATE_COUNT`] followed by the gates.
    CountPrefixed,
}

impl GateFormat {
    pub const fn wire_len(self) -> usize {
        match self {
            GateFormat::Plain => GATE_COUNT,
            GateFormat::CountPrefixed => GATE_COUNT + 1,
        }
    }

    /// The gate bytes of `buf`, or `None` if the framing is off.
    pub fn gates(self, buf: &[u8]) -> Option<&[u8]> {
        if buf.len() != self.wire_len() {
            return None;
        }
        match self {
            GateFormat::Plain => Some(buf),
            GateFormat::CountPrefixed if usize::from(buf[0]) == GATE_COUNT => Some(&buf[1..]),
            GateFormat::CountPrefixed => None,
        }
    }
}

/// Sensitivity per gate as `{gate0: .., gate13: ..}`.
#[derive(Clone, Debug)]
pub struct GateArrayCodec {
    pub format: GateFormat,
    pub max: u8,
}

impl GateArrayCodec {
    pub const fn new(format: GateFormat) -> Self {
        Self {
            format,
            max: MAX_SENSITIVITY,
        }
    }

    pub fn decode(&self, raw: &RawValue) -> Option<PropertyValue> {
        let gates = self.format.gates(raw.as_bytes()?)?;
        let fields: BTreeMap<String, u32> = gates
            .iter()
            .enumerate()
            .map(|(i, v)| (gate_key(i), u32::from(*v)))
            .collect();
        Some(PropertyValue::Fields(fields))
    }

    /// Full wire buffer; every gate must be supplied.
    pub fn encode(&self, property: &str, value: &PropertyValue) -> Result<Vec<u8>> {
        let fields = value.as_fields().ok_or_else(|| ProfileError::InvalidValue {
            property: property.to_string(),
            expected: "a gate map",
        })?;

        let mut buf = Vec::with_capacity(self.format.wire_len());
        if self.format == GateFormat::CountPrefixed {
            buf.push(GATE_COUNT as u8);
        }
        for index in 0..GATE_COUNT {
            let key = gate_key(index);
            let value = *fields.get(&key).ok_or_else(|| ProfileError::MissingGate {
                property: property.to_string(),
                gate: key.clone(),
            })?;
            if value > u32::from(self.max) {
                return Err(ProfileError::OutOfRange {
                    property: format!("{property}.{key}"),
                    value,
                    min: 0,
                    max: u32::from(self.max),
                });
            }
            buf.push(value as u8);
        }
        Ok(buf)
    }
}

/// Display-only rendering of raw per-gate energies: `"0a 1f .. 00"`.
#[derive(Clone, Debug, Default)]
pub struct EnergyHexCodec;

impl EnergyHexCodec {
    pub fn decode(&self, raw: &RawValue) -> Option<PropertyValue> {
        let gates = GateFormat::Plain.gates(raw.as_bytes()?)?;
        let text = gates
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ");
        Some(PropertyValue::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate_map(values: &[u32]) -> PropertyValue {
        PropertyValue::Fields(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (gate_key(i), *v))
                .collect(),
        )
    }

    #[test]
    fn test_decode_plain() {
        let codec = GateArrayCodec::new(GateFormat::Plain);
        let raw = RawValue::Bytes((0..14).map(|i| i * 5).collect());
        let fields = codec.decode(&raw).unwrap();
        let fields = fields.as_fields().unwrap();
        assert_eq!(fields.len(), 14);
        assert_eq!(fields["gate0"], 0);
        assert_eq!(fields["gate13"], 65);
    }

    #[test]
    fn test_decoded_gates_print_in_gate_order() {
        let codec = GateArrayCodec::new(GateFormat::Plain);
        let decoded = codec.decode(&RawValue::Bytes(vec![7; 14])).unwrap();
        let json = serde_json::to_string(&decoded).unwrap();
        let keys: Vec<usize> = (0..14)
            .map(|i| json.find(&format!(r#""{}""#, gate_key(i))).unwrap())
            .collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[test]
    fn test_decode_skips_wrong_length() {
        let codec = GateArrayCodec::new(GateFormat::Plain);
        assert_eq!(codec.decode(&RawValue::Bytes(vec![1; 13])), None);
        assert_eq!(codec.decode(&RawValue::Bytes(vec![1; 15])), None);
        assert_eq!(codec.decode(&RawValue::UInt(14)), None);
    }

    #[test]
    fn test_count_prefixed() {
        let codec = GateArrayCodec::new(GateFormat::CountPrefixed);
        let mut buf = vec![14u8];
        buf.extend(std::iter::repeat_n(30u8, 14));
        assert!(codec.decode(&RawValue::Bytes(buf.clone())).is_some());

        buf[0] = 13;
        assert_eq!(codec.decode(&RawValue::Bytes(buf)), None);
        assert_eq!(codec.decode(&RawValue::Bytes(vec![30; 14])), None);

        let encoded = codec.encode("move_sensitivity", &gate_map(&[30; 14])).unwrap();
        assert_eq!(encoded.len(), 15);
        assert_eq!(encoded[0], 14);
    }

    #[test]
    fn test_encode_emits_every_gate() {
        let codec = GateArrayCodec::new(GateFormat::Plain);
        let mut values = [50u32; 14];
        values[3] = 20;
        let encoded = codec.encode("move_sensitivity", &gate_map(&values)).unwrap();
        assert_eq!(encoded.len(), 14);
        assert_eq!(encoded[3], 20);
        assert!(encoded.iter().enumerate().all(|(i, v)| i == 3 || *v == 50));
    }

    #[test]
    fn test_encode_requires_all_gates() {
        let codec = GateArrayCodec::new(GateFormat::Plain);
        let err = codec
            .encode("still_sensitivity", &gate_map(&[10; 13]))
            .unwrap_err();
        assert!(matches!(err, ProfileError::MissingGate { ref gate, .. } if gate == "gate13"));

        let mut values = [10u32; 14];
        values[0] = 101;
        assert!(matches!(
            codec.encode("still_sensitivity", &gate_map(&values)),
            Err(ProfileError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_energy_hex() {
        let mut buf = vec![0u8; 14];
        buf[0] = 0x0a;
        buf[1] = 0xff;
        let text = EnergyHexCodec.decode(&RawValue::Bytes(buf)).unwrap();
        assert_eq!(
            text.as_text(),
            Some("0a ff 00 00 00 00 00 00 00 00 00 00 00 00")
        );
        assert_eq!(EnergyHexCodec.decode(&RawValue::Bytes(vec![0; 3])), None);
    }
}
