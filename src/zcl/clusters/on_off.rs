//! OnOff server cluster (0x0006).
//!
//! Mirrors the on/off state of the external signal input. Setting it goes
//! through the standard `on`/`off` commands rather than an attribute write.

use super::{AttributeDef, CommandDef};
use crate::revision::Feature;
use crate::zcl::{ClusterId, DataType};
use strum::FromRepr;

/// Zigbee Cluster ID for OnOff
pub const CLUSTER_ID: u16 = 0x0006;

#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u16)]
pub enum OnOffAttribute {
    OnOff = 0x0000,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum OnOffCommand {
    Off = 0x00,
    On = 0x01,
}

impl OnOffCommand {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }
}

pub const ON_OFF: &str = "onOff";

pub const ATTRIBUTES: &[AttributeDef] = &[AttributeDef::new(
    ClusterId::OnOff,
    ON_OFF,
    OnOffAttribute::OnOff as u16,
    DataType::Bool,
    Feature::PirAndOnOff,
)];

pub const COMMANDS: &[CommandDef] = &[
    CommandDef {
        cluster: ClusterId::OnOff,
        name: OnOffCommand::Off.name(),
        id: OnOffCommand::Off as u8,
        params: &[],
        feature: Feature::PirAndOnOff,
    },
    CommandDef {
        cluster: ClusterId::OnOff,
        name: OnOffCommand::On.name(),
        id: OnOffCommand::On as u8,
        params: &[],
        feature: Feature::PirAndOnOff,
    },
];
