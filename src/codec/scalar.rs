//! Single fixed-width attributes: plain numbers, enum lookups and two-state
//! values.

use super::{PropertyValue, Range};
use crate::error::{ProfileError, Result};
use crate::zcl::RawValue;

/// Passes the raw number through, bounded on writes.
#[derive(Clone, Debug)]
pub struct NumericCodec {
    pub range: Option<Range>,
}

impl NumericCodec {
    pub const fn new(min: u32, max: u32) -> Self {
        Self {
            range: Some(Range::new(min, max)),
        }
    }

    pub const fn unbounded() -> Self {
        Self { range: None }
    }

    pub fn decode(&self, raw: &RawValue) -> Option<PropertyValue> {
        raw.as_u32().map(PropertyValue::Number)
    }

    pub fn encode(&self, property: &str, value: &PropertyValue) -> Result<u32> {
        let number = value.as_number().ok_or_else(|| ProfileError::InvalidValue {
            property: property.to_string(),
            expected: "a number",
        })?;
        if let Some(range) = self.range
            && !range.contains(number)
        {
            return Err(ProfileError::OutOfRange {
                property: property.to_string(),
                value: number,
                min: range.min,
                max: range.max,
            });
        }
        Ok(number)
    }
}

/// Closed label table; raw values without a label are dropped on decode.
#[derive(Clone, Debug)]
pub struct EnumCodec {
    pub lookup: &'static [(&'static str, u32)],
}

impl EnumCodec {
    pub const fn new(lookup: &'static [(&'static str, u32)]) -> Self {
        Self { lookup }
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.lookup.iter().map(|(label, _)| *label)
    }

    pub fn label_of(&self, raw: u32) -> Option<&'static str> {
        self.lookup
            .iter()
            .find(|(_, value)| *value == raw)
            .map(|(label, _)| *label)
    }

    pub fn value_of(&self, label: &str) -> Option<u32> {
        self.lookup
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, value)| *value)
    }

    pub fn decode(&self, raw: &RawValue) -> Option<PropertyValue> {
        let label = self.label_of(raw.as_u32()?)?;
        Some(PropertyValue::from(label))
    }

    pub fn encode(&self, property: &str, value: &PropertyValue) -> Result<u32> {
        let label = value.as_text().ok_or_else(|| ProfileError::InvalidValue {
            property: property.to_string(),
            expected: "a label",
        })?;
        self.value_of(label)
            .ok_or_else(|| ProfileError::UnknownLabel {
                property: property.to_string(),
                label: label.to_string(),
            })
    }
}

/// How a two-state property reaches the device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BinaryWrite {
    Attribute,
    /// Invoke a parameterless command per state instead of writing.
    Command {
        on: &'static str,
        off: &'static str,
    },
}

/// Two labelled states, each bound to one raw value.
#[derive(Clone, Debug)]
pub struct BinaryCodec {
    pub on: (&'static str, u32),
    pub off: (&'static str, u32),
    pub write: BinaryWrite,
}

impl BinaryCodec {
    pub const fn new(on: (&'static str, u32), off: (&'static str, u32)) -> Self {
        Self {
            on,
            off,
            write: BinaryWrite::Attribute,
        }
    }

    pub const fn via_commands(mut self, on: &'static str, off: &'static str) -> Self {
        self.write = BinaryWrite::Command { on, off };
        self
    }

    pub fn decode(&self, raw: &RawValue) -> Option<PropertyValue> {
        let raw = raw.as_u32()?;
        if raw == self.on.1 {
            Some(PropertyValue::from(self.on.0))
        } else if raw == self.off.1 {
            Some(PropertyValue::from(self.off.0))
        } else {
            None
        }
    }

    /// Resolve a label to the requested state (`true` = on).
    pub fn encode(&self, property: &str, value: &PropertyValue) -> Result<bool> {
        match value.as_text() {
            Some(label) if label == self.on.0 => Ok(true),
            Some(label) if label == self.off.0 => Ok(false),
            Some(label) => Err(ProfileError::UnknownLabel {
                property: property.to_string(),
                label: label.to_string(),
            }),
            None => Err(ProfileError::InvalidValue {
                property: property.to_string(),
                expected: "a state label",
            }),
        }
    }

    pub fn raw_for(&self, on: bool) -> u32 {
        if on { self.on.1 } else { self.off.1 }
    }
}
