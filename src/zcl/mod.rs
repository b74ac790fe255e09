//! Wire vocabulary shared with the external Zigbee protocol engine.
//!
//! The engine performs discovery, binding, attribute reads/writes/reports and
//! command dispatch. This crate only sees the already-deserialized attribute
//! values it hands over ([`Report`]) and asks it for requests through the
//! [`Endpoint`] trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};
use thiserror::Error as ThisError;

pub mod clusters;
pub mod memory;

pub use memory::MemoryEndpoint;

/// Endpoint the device exposes all of its clusters on.
pub const PRESENCE_ENDPOINT: u8 = 1;

/// `maximumReportInterval` used for every configured report.
pub const REPORT_INTERVAL_HOUR: u16 = 3600;

/// ZCL primitive data types used by this device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum DataType {
    Bool = 0x10,
    Bitmap8 = 0x18,
    Uint8 = 0x20,
    Uint16 = 0x21,
    Uint32 = 0x23,
    Enum8 = 0x30,
    OctetStr = 0x41,
}

impl DataType {
    /// Largest value a fixed-width type can carry, `None` for byte strings.
    pub const fn max_value(self) -> Option<u32> {
        match self {
            DataType::Bool => Some(1),
            DataType::Bitmap8 | DataType::Uint8 | DataType::Enum8 => Some(u8::MAX as u32),
            DataType::Uint16 => Some(u16::MAX as u32),
            DataType::Uint32 => Some(u32::MAX),
            DataType::OctetStr => None,
        }
    }
}

/// Clusters the device exposes on [`PRESENCE_ENDPOINT`].
///
/// Names follow the protocol engine's cluster keys.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
pub enum ClusterId {
    #[serde(rename = "msOccupancySensing")]
    #[strum(serialize = "msOccupancySensing")]
    OccupancySensing,
    #[serde(rename = "genOnOff")]
    #[strum(serialize = "genOnOff")]
    OnOff,
    #[serde(rename = "customOccupationConfig")]
    #[strum(serialize = "customOccupationConfig")]
    PresenceConfig,
}

impl ClusterId {
    pub const fn id(self) -> u16 {
        match self {
            ClusterId::OccupancySensing => clusters::occupancy_sensing::CLUSTER_ID,
            ClusterId::OnOff => clusters::on_off::CLUSTER_ID,
            ClusterId::PresenceConfig => clusters::presence_config::CLUSTER_ID,
        }
    }
}

/// An attribute value after the engine's per-type deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    UInt(u32),
    Bytes(Vec<u8>),
}

impl RawValue {
    /// Integer view; booleans read as 0/1, byte strings have none.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            RawValue::Bool(b) => Some(u32::from(*b)),
            RawValue::UInt(v) => Some(*v),
            RawValue::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RawValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Fixed-width value in the shape the engine expects for `data_type`.
    pub fn for_type(data_type: DataType, value: u32) -> Self {
        match data_type {
            DataType::Bool => RawValue::Bool(value != 0),
            _ => RawValue::UInt(value),
        }
    }
}

/// Attribute report or read response for one cluster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub cluster: ClusterId,
    #[serde(default)]
    pub data: BTreeMap<String, RawValue>,
}

impl Report {
    pub fn new(cluster: ClusterId) -> Self {
        Self {
            cluster,
            data: BTreeMap::new(),
        }
    }

    pub fn with(mut self, attribute: impl Into<String>, value: RawValue) -> Self {
        self.data.insert(attribute.into(), value);
        self
    }

    pub fn get(&self, attribute: &str) -> Option<&RawValue> {
        self.data.get(attribute)
    }
}

/// Value half of an attribute write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WriteValue {
    /// Fixed-width value; the engine picks the type from the attribute schema.
    Plain(RawValue),
    /// Byte-array value with its wire type spelled out.
    Typed {
        value: Vec<u8>,
        #[serde(rename = "type")]
        data_type: DataType,
    },
}

/// `write(cluster, {attribute: value})`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AttributeWrite {
    pub attribute: String,
    pub value: WriteValue,
}

impl AttributeWrite {
    pub fn plain(attribute: impl Into<String>, value: RawValue) -> Self {
        Self {
            attribute: attribute.into(),
            value: WriteValue::Plain(value),
        }
    }

    pub fn octets(attribute: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            attribute: attribute.into(),
            value: WriteValue::Typed {
                value,
                data_type: DataType::OctetStr,
            },
        }
    }
}

/// Named command parameters.
pub type CommandParams = BTreeMap<String, RawValue>;

/// One entry of a `configureReporting` request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportingConfig {
    pub attribute: &'static str,
    pub min_interval: u16,
    pub max_interval: u16,
    pub reportable_change: Option<u32>,
}

impl ReportingConfig {
    /// Report on every change, at least hourly.
    pub const fn on_change(attribute: &'static str) -> Self {
        Self {
            attribute,
            min_interval: 0,
            max_interval: REPORT_INTERVAL_HOUR,
            reportable_change: None,
        }
    }

    pub const fn with_change(attribute: &'static str, min_interval: u16, change: u32) -> Self {
        Self {
            attribute,
            min_interval,
            max_interval: REPORT_INTERVAL_HOUR,
            reportable_change: Some(change),
        }
    }
}

/// Failures raised by the protocol engine. Passed through untouched.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Device unreachable: {0}")]
    Unreachable(String),

    #[error("Device answered with status 0x{status:02X}: {context}")]
    Status { status: u8, context: String },
}

/// Request surface of the external protocol engine for one device endpoint.
///
/// Reads return the response payload; it is also expected to re-enter the
/// decode path as an inbound report, exactly like an unsolicited one.
#[async_trait]
pub trait Endpoint: Send + Sync {
    async fn read(&self, cluster: ClusterId, attributes: &[&str]) -> Result<Report, TransportError>;

    async fn write(&self, cluster: ClusterId, write: AttributeWrite) -> Result<(), TransportError>;

    async fn command(
        &self,
        cluster: ClusterId,
        command: &str,
        params: CommandParams,
    ) -> Result<(), TransportError>;

    async fn bind(&self, clusters: &[ClusterId]) -> Result<(), TransportError>;

    async fn configure_reporting(
        &self,
        cluster: ClusterId,
        items: &[ReportingConfig],
    ) -> Result<(), TransportError>;
}
