use crate::codec::{Access, Category, Codec, Range};
use crate::zcl::clusters::{AttributeDef, CommandDef};
use crate::zcl::{ClusterId, DataType};
use serde::Serialize;

/// Where a property lives on the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wire {
    Attribute(&'static AttributeDef),
    Command(&'static CommandDef),
}

impl Wire {
    pub fn cluster(self) -> ClusterId {
        match self {
            Wire::Attribute(def) => def.cluster,
            Wire::Command(def) => def.cluster,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Wire::Attribute(def) => def.name,
            Wire::Command(def) => def.name,
        }
    }
}

/// One registry entry: a named property, its wire source and its codec.
#[derive(Clone, Debug)]
pub struct AttributeDescriptor {
    pub name: &'static str,
    pub wire: Wire,
    pub access: Access,
    pub category: Option<Category>,
    pub unit: Option<&'static str>,
    pub description: &'static str,
    pub codec: Codec,
}

impl AttributeDescriptor {
    /// Access follows the codec: commands are write-only, display-only
    /// codecs read-only, everything else read-write.
    pub fn new(name: &'static str, wire: Wire, codec: Codec) -> Self {
        let access = match codec {
            Codec::Command(_) => Access::WriteOnly,
            Codec::EnergyHex(_) | Codec::Diagnostic(_) => Access::ReadOnly,
            _ => Access::ReadWrite,
        };
        let category = match access {
            Access::ReadOnly => Some(Category::Diagnostic),
            _ => None,
        };
        Self {
            name,
            wire,
            access,
            category,
            unit: None,
            description: "",
            codec,
        }
    }

    pub fn attribute(name: &'static str, def: &'static AttributeDef, codec: Codec) -> Self {
        Self::new(name, Wire::Attribute(def), codec)
    }

    pub fn command(name: &'static str, def: &'static CommandDef, codec: Codec) -> Self {
        Self::new(name, Wire::Command(def), codec)
    }

    pub fn read_only(mut self) -> Self {
        self.access = Access::ReadOnly;
        self
    }

    pub fn config(mut self) -> Self {
        self.category = Some(Category::Config);
        self
    }

    pub fn diagnostic(mut self) -> Self {
        self.category = Some(Category::Diagnostic);
        self
    }

    /// Entity shown without a category.
    pub fn state(mut self) -> Self {
        self.category = None;
        self
    }

    pub fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Source attribute for the decode path, `None` for command triggers.
    pub fn source(&self) -> Option<&'static AttributeDef> {
        match self.wire {
            Wire::Attribute(def) => Some(def),
            Wire::Command(_) => None,
        }
    }

    pub fn info(&self) -> DescriptorInfo {
        let (wire_id, wire_type) = match self.wire {
            Wire::Attribute(def) => (u32::from(def.id), Some(def.data_type)),
            Wire::Command(def) => (u32::from(def.id), None),
        };
        DescriptorInfo {
            name: self.name,
            kind: self.codec.kind(),
            cluster: self.wire.cluster(),
            wire_name: self.wire.name(),
            wire_id,
            wire_type,
            access: self.access,
            category: self.category,
            unit: self.unit,
            range: self.codec.range(),
            labels: self.codec.labels(),
            description: self.description,
        }
    }
}

/// Serializable summary of a descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct DescriptorInfo {
    pub name: &'static str,
    pub kind: &'static str,
    pub cluster: ClusterId,
    pub wire_name: &'static str,
    pub wire_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wire_type: Option<DataType>,
    pub access: Access,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<&'static str>,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'static str,
}
