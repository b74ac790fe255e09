//! Several flags or small counters packed into one fixed-width attribute.
//!
//! Writes are read-modify-write: the registry reads the current raw value,
//! [`BitfieldCodec::merge`]s the requested sub-field into it and writes the
//! result back, leaving every other bit untouched.

use super::PropertyValue;
use crate::error::{ProfileError, Result};
use crate::zcl::RawValue;
use serde::Serialize;

/// One named sub-field: `width` bits starting at bit `offset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BitField {
    pub name: &'static str,
    pub offset: u8,
    pub width: u8,
}

impl BitField {
    pub const fn new(name: &'static str, offset: u8, width: u8) -> Self {
        Self {
            name,
            offset,
            width,
        }
    }

    pub const fn flag(name: &'static str, offset: u8) -> Self {
        Self::new(name, offset, 1)
    }

    /// Largest value the field can hold.
    pub const fn max(self) -> u32 {
        if self.width >= 32 {
            u32::MAX
        } else {
            (1u32 << self.width) - 1
        }
    }

    /// Mask of the field's bits in the packed value.
    pub const fn mask(self) -> u32 {
        self.max() << self.offset
    }

    pub const fn extract(self, packed: u32) -> u32 {
        (packed >> self.offset) & self.max()
    }

    /// `(packed & !mask) | (value << offset)`
    pub const fn insert(self, packed: u32, value: u32) -> u32 {
        (packed & !self.mask()) | ((value & self.max()) << self.offset)
    }
}

/// Ordered sub-fields of one packed attribute.
///
/// Layouts are fixed per firmware revision; see [`BitfieldLayout::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BitfieldLayout {
    pub attribute: &'static str,
    pub size_bytes: u8,
    pub fields: &'static [BitField],
}

impl BitfieldLayout {
    /// Fields must fit the buffer and must not overlap.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| ProfileError::InvalidLayout {
            attribute: self.attribute,
            reason,
        };

        if self.size_bytes == 0 || self.size_bytes > 4 {
            return Err(invalid(format!("unsupported size {} bytes", self.size_bytes)));
        }
        let bits = u32::from(self.size_bytes) * 8;

        let mut used = 0u32;
        for field in self.fields {
            if field.width == 0 {
                return Err(invalid(format!("{} has zero width", field.name)));
            }
            if u32::from(field.offset) + u32::from(field.width) > bits {
                return Err(invalid(format!("{} exceeds {} bits", field.name, bits)));
            }
            if used & field.mask() != 0 {
                return Err(invalid(format!("{} overlaps another field", field.name)));
            }
            used |= field.mask();
        }
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<BitField> {
        self.fields.iter().copied().find(|f| f.name == name)
    }
}

/// Property backed by one sub-field of a packed attribute.
#[derive(Clone, Debug)]
pub struct BitfieldCodec {
    pub layout: &'static BitfieldLayout,
    pub field: BitField,
}

impl BitfieldCodec {
    /// Codec for the layout field named `name`, if the layout has one.
    pub fn new(layout: &'static BitfieldLayout, name: &str) -> Option<Self> {
        layout.field(name).map(|field| Self { layout, field })
    }

    pub fn decode(&self, raw: &RawValue) -> Option<PropertyValue> {
        raw.as_u32()
            .map(|packed| PropertyValue::Number(self.field.extract(packed)))
    }

    /// Fold the requested value into the current packed value.
    pub fn merge(&self, property: &str, current: u32, value: &PropertyValue) -> Result<u32> {
        let requested = value.as_number().ok_or_else(|| ProfileError::InvalidValue {
            property: property.to_string(),
            expected: "a number",
        })?;
        if requested > self.field.max() {
            return Err(ProfileError::OutOfRange {
                property: property.to_string(),
                value: requested,
                min: 0,
                max: self.field.max(),
            });
        }
        Ok(self.field.insert(current, requested))
    }
}
