//! Read-only counters and flags unpacked from the firmware's `internals*`
//! attributes.

use super::PropertyValue;
use super::bitfield::{BitField, BitfieldLayout};
use crate::zcl::RawValue;

/// Rendered when a bind bitset has no bit set.
pub const NO_REPORTS_PLACEHOLDER: &str = "<no configured reports>";

/// How an extracted sub-field is presented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Render {
    Number,
    /// Non-zero as `true`.
    Bool,
    /// Single bit as one of two words.
    Flag {
        clear: &'static str,
        set: &'static str,
    },
    /// Bitset as `"{prefix}{bit}, .."`, or `placeholder` when empty.
    FlagList {
        prefix: &'static str,
        placeholder: &'static str,
    },
}

/// Comma-joined names of the set bits, in bit order.
///
/// Bits beyond `names` are ignored.
pub fn render_flags<S: AsRef<str>>(bits: u32, names: &[S], placeholder: &str) -> String {
    let set: Vec<&str> = names
        .iter()
        .enumerate()
        .filter(|(i, _)| *i < 32 && bits & (1 << *i) != 0)
        .map(|(_, name)| name.as_ref())
        .collect();

    if set.is_empty() {
        placeholder.to_string()
    } else {
        set.join(", ")
    }
}

#[derive(Clone, Debug)]
pub struct DiagnosticCodec {
    pub layout: &'static BitfieldLayout,
    pub field: BitField,
    pub render: Render,
}

impl DiagnosticCodec {
    pub fn new(layout: &'static BitfieldLayout, name: &str, render: Render) -> Option<Self> {
        layout.field(name).map(|field| Self {
            layout,
            field,
            render,
        })
    }

    pub fn decode(&self, raw: &RawValue) -> Option<PropertyValue> {
        let value = self.field.extract(raw.as_u32()?);
        let rendered = match &self.render {
            Render::Number => PropertyValue::Number(value),
            Render::Bool => PropertyValue::Bool(value != 0),
            Render::Flag { clear, set } => {
                PropertyValue::from(if value == 0 { *clear } else { *set })
            }
            Render::FlagList {
                prefix,
                placeholder,
            } => {
                let names: Vec<String> = (0..self.field.width)
                    .map(|bit| format!("{prefix}{bit}"))
                    .collect();
                PropertyValue::Text(render_flags(value, &names, placeholder))
            }
        };
        Some(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERNALS: BitfieldLayout = BitfieldLayout {
        attribute: "internals",
        size_bytes: 4,
        fields: &[
            BitField::new("bound_devices", 0, 4),
            BitField::new("configured_reports_for_binds", 8, 8),
            BitField::flag("waiting", 16),
        ],
    };

    #[test]
    fn test_render_flags() {
        let names = ["Bind0", "Bind1", "Bind2"];
        assert_eq!(render_flags(0b0000_0101, &names, NO_REPORTS_PLACEHOLDER), "Bind0, Bind2");
        assert_eq!(render_flags(0, &names, NO_REPORTS_PLACEHOLDER), NO_REPORTS_PLACEHOLDER);
        assert_eq!(render_flags(0b1000, &names, "-"), "-");
    }

    #[test]
    fn test_flag_list_from_packed() {
        let codec = DiagnosticCodec::new(
            &INTERNALS,
            "configured_reports_for_binds",
            Render::FlagList {
                prefix: "Bind",
                placeholder: NO_REPORTS_PLACEHOLDER,
            },
        )
        .unwrap();

        let decoded = codec.decode(&RawValue::UInt(0x0000_8103)).unwrap();
        assert_eq!(decoded.as_text(), Some("Bind0, Bind7"));
        let decoded = codec.decode(&RawValue::UInt(0x0000_0003)).unwrap();
        assert_eq!(decoded.as_text(), Some(NO_REPORTS_PLACEHOLDER));
    }

    #[test]
    fn test_number_and_flag() {
        let count = DiagnosticCodec::new(&INTERNALS, "bound_devices", Render::Number).unwrap();
        assert_eq!(count.decode(&RawValue::UInt(0xFFFF_FF03)), Some(PropertyValue::Number(3)));

        let flag = DiagnosticCodec::new(
            &INTERNALS,
            "waiting",
            Render::Flag {
                clear: "Done",
                set: "Waiting",
            },
        )
        .unwrap();
        assert_eq!(flag.decode(&RawValue::UInt(0x1_0000)), Some(PropertyValue::from("Waiting")));
        assert_eq!(flag.decode(&RawValue::UInt(0)), Some(PropertyValue::from("Done")));
        assert_eq!(flag.decode(&RawValue::Bytes(vec![0])), None);

        let bound = DiagnosticCodec::new(&INTERNALS, "waiting", Render::Bool).unwrap();
        assert_eq!(bound.decode(&RawValue::UInt(0x3_0000)), Some(PropertyValue::Bool(true)));
    }
}
