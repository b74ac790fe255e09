//! Static schema of the clusters the device exposes.
//!
//! This is the bit-exact wire contract with the device firmware: attribute
//! ids, primitive types, command ids and command parameters. Entries are
//! tagged with the [`Feature`] that introduced them so a schema can be cut
//! for any [`Revision`].

use super::{ClusterId, DataType};
use crate::revision::{Feature, Revision};
use serde::Serialize;

pub mod occupancy_sensing;
pub mod on_off;
pub mod presence_config;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AttributeDef {
    pub cluster: ClusterId,
    pub name: &'static str,
    pub id: u16,
    pub data_type: DataType,
    pub feature: Feature,
}

impl AttributeDef {
    pub const fn new(
        cluster: ClusterId,
        name: &'static str,
        id: u16,
        data_type: DataType,
        feature: Feature,
    ) -> Self {
        Self {
            cluster,
            name,
            id,
            data_type,
            feature,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ParamDef {
    pub name: &'static str,
    pub data_type: DataType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CommandDef {
    pub cluster: ClusterId,
    pub name: &'static str,
    pub id: u8,
    pub params: &'static [ParamDef],
    pub feature: Feature,
}

fn all_attributes() -> impl Iterator<Item = &'static AttributeDef> {
    occupancy_sensing::ATTRIBUTES
        .iter()
        .chain(on_off::ATTRIBUTES)
        .chain(presence_config::ATTRIBUTES)
}

fn all_commands() -> impl Iterator<Item = &'static CommandDef> {
    on_off::COMMANDS.iter().chain(presence_config::COMMANDS)
}

/// Attributes declared by `revision`.
pub fn attributes(revision: Revision) -> impl Iterator<Item = &'static AttributeDef> {
    all_attributes().filter(move |a| revision.supports(a.feature))
}

/// Commands accepted by `revision`.
pub fn commands(revision: Revision) -> impl Iterator<Item = &'static CommandDef> {
    all_commands().filter(move |c| revision.supports(c.feature))
}

pub fn find_attribute(
    cluster: ClusterId,
    name: &str,
    revision: Revision,
) -> Option<&'static AttributeDef> {
    attributes(revision).find(|a| a.cluster == cluster && a.name == name)
}

pub fn find_command(
    cluster: ClusterId,
    name: &str,
    revision: Revision,
) -> Option<&'static CommandDef> {
    commands(revision).find(|c| c.cluster == cluster && c.name == name)
}
