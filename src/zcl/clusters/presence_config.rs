//! Vendor cluster `customOccupationConfig` (0xFC00).
//!
//! Carries the LD2412 radar configuration, its engineering data and the
//! firmware's own diagnostics. Attribute ids were reused between firmware
//! generations (0x0016..0x001B moved from discrete booleans to a packed
//! bitfield plus new attributes), so lookups by id always need a revision.

use super::{AttributeDef, CommandDef, ParamDef};
use crate::revision::{Feature, Revision};
use crate::zcl::{ClusterId, DataType};

/// Zigbee Cluster ID for the manufacturer specific presence cluster
pub const CLUSTER_ID: u16 = 0xFC00;

/// Number of detection gates of the LD2412.
pub const GATE_COUNT: usize = 14;

/// Attribute names as declared to the protocol engine.
pub mod attr {
    pub const MOVE_SENSITIVITY: &str = "moveSensitivity";
    pub const STILL_SENSITIVITY: &str = "stillSensitivity";
    pub const MOVE_ENERGY: &str = "moveEnergy";
    pub const STILL_ENERGY: &str = "stillEnergy";
    pub const MOVE_DISTANCE: &str = "moveDistance";
    pub const STILL_DISTANCE: &str = "stillDistance";
    pub const STATE: &str = "state";
    pub const MIN_DISTANCE: &str = "min_distance";
    pub const MAX_DISTANCE: &str = "max_distance";
    pub const EX_STATE: &str = "ex_state";
    pub const PRESENCE_MODE: &str = "presence_mode";
    pub const MEASURED_LIGHT: &str = "measured_light";
    pub const MOVE_ENERGY_LAST: &str = "move_energy_last";
    pub const STILL_ENERGY_LAST: &str = "still_energy_last";
    pub const MOVE_ENERGY_MIN: &str = "move_energy_min";
    pub const STILL_ENERGY_MIN: &str = "still_energy_min";
    pub const MOVE_ENERGY_MAX: &str = "move_energy_max";
    pub const STILL_ENERGY_MAX: &str = "still_energy_max";
    pub const PIR_PRESENCE: &str = "pir_presence";
    pub const ON_OFF_MODE: &str = "on_off_mode";
    pub const ON_OFF_TIMEOUT: &str = "on_off_timeout";
    pub const ILLUMINANCE_THRESHOLD: &str = "illuminance_threshold";
    pub const EDGE_MM_WAVE: &str = "presence_detection_edge_mm_wave";
    pub const EDGE_PIR_INTERNAL: &str = "presence_detection_edge_pir_internal";
    pub const EDGE_EXTERNAL: &str = "presence_detection_edge_external";
    pub const KEEP_MM_WAVE: &str = "presence_detection_keep_mm_wave";
    pub const KEEP_PIR_INTERNAL: &str = "presence_detection_keep_pir_internal";
    pub const KEEP_EXTERNAL: &str = "presence_detection_keep_external";
    pub const PRESENCE_DETECTION_CONFIG: &str = "presence_detection_config";
    pub const ARMED_FOR_TRIGGER: &str = "armed_for_trigger";
    pub const DISTANCE_RESOLUTION: &str = "distance_resolution";
    pub const INTERNALS3: &str = "internals3";
    pub const EXTERNAL_ON_TIME: &str = "external_on_time";
    pub const FAILURE_STATUS: &str = "failure_status";
    pub const INTERNALS: &str = "internals";
    pub const RESTARTS_COUNT: &str = "restarts_count";
    pub const ILLUMINANCE_EXTERNAL: &str = "illuminance_external";
    pub const INTERNALS2: &str = "internals2";
}

/// Command names as declared to the protocol engine.
pub mod cmd {
    pub const RESTART: &str = "restart";
    pub const FACTORY_RESET: &str = "factory_reset";
    pub const RESET_ENERGY_STAT: &str = "reset_energy_stat";
    pub const SWITCH_BLUETOOTH: &str = "switch_bluetooth";
    pub const RECHECK_BINDS: &str = "recheck_binds";
}

const fn vendor(name: &'static str, id: u16, data_type: DataType, feature: Feature) -> AttributeDef {
    AttributeDef::new(ClusterId::PresenceConfig, name, id, data_type, feature)
}

pub const ATTRIBUTES: &[AttributeDef] = &[
    vendor(attr::MOVE_SENSITIVITY, 0x0000, DataType::OctetStr, Feature::Core),
    vendor(attr::STILL_SENSITIVITY, 0x0001, DataType::OctetStr, Feature::Core),
    vendor(attr::MOVE_ENERGY, 0x0002, DataType::Uint8, Feature::Core),
    vendor(attr::STILL_ENERGY, 0x0003, DataType::Uint8, Feature::Core),
    vendor(attr::MOVE_DISTANCE, 0x0004, DataType::Uint16, Feature::Core),
    vendor(attr::STILL_DISTANCE, 0x0005, DataType::Uint16, Feature::Core),
    vendor(attr::STATE, 0x0006, DataType::Enum8, Feature::Core),
    vendor(attr::MIN_DISTANCE, 0x0007, DataType::Uint16, Feature::Core),
    vendor(attr::MAX_DISTANCE, 0x0008, DataType::Uint16, Feature::Core),
    vendor(attr::EX_STATE, 0x0009, DataType::Enum8, Feature::Core),
    vendor(attr::PRESENCE_MODE, 0x000A, DataType::Enum8, Feature::Core),
    vendor(attr::MEASURED_LIGHT, 0x000B, DataType::Uint8, Feature::EnergyStatistics),
    vendor(attr::MOVE_ENERGY_LAST, 0x000C, DataType::OctetStr, Feature::EnergyStatistics),
    vendor(attr::STILL_ENERGY_LAST, 0x000D, DataType::OctetStr, Feature::EnergyStatistics),
    vendor(attr::MOVE_ENERGY_MIN, 0x000E, DataType::OctetStr, Feature::EnergyStatistics),
    vendor(attr::STILL_ENERGY_MIN, 0x000F, DataType::OctetStr, Feature::EnergyStatistics),
    vendor(attr::MOVE_ENERGY_MAX, 0x0010, DataType::OctetStr, Feature::EnergyStatistics),
    vendor(attr::STILL_ENERGY_MAX, 0x0011, DataType::OctetStr, Feature::EnergyStatistics),
    vendor(attr::PIR_PRESENCE, 0x0012, DataType::Bool, Feature::PirAndOnOff),
    vendor(attr::ON_OFF_MODE, 0x0013, DataType::Enum8, Feature::PirAndOnOff),
    vendor(attr::ON_OFF_TIMEOUT, 0x0014, DataType::Uint16, Feature::PirAndOnOff),
    vendor(attr::ILLUMINANCE_THRESHOLD, 0x0015, DataType::Uint8, Feature::PirAndOnOff),
    vendor(attr::EDGE_MM_WAVE, 0x0016, DataType::Bool, Feature::DiscreteDetectionFlags),
    vendor(attr::EDGE_PIR_INTERNAL, 0x0017, DataType::Bool, Feature::DiscreteDetectionFlags),
    vendor(attr::EDGE_EXTERNAL, 0x0018, DataType::Bool, Feature::DiscreteDetectionFlags),
    vendor(attr::KEEP_MM_WAVE, 0x0019, DataType::Bool, Feature::DiscreteDetectionFlags),
    vendor(attr::KEEP_PIR_INTERNAL, 0x001A, DataType::Bool, Feature::DiscreteDetectionFlags),
    vendor(attr::KEEP_EXTERNAL, 0x001B, DataType::Bool, Feature::DiscreteDetectionFlags),
    vendor(attr::PRESENCE_DETECTION_CONFIG, 0x0016, DataType::Uint8, Feature::PackedDetectionConfig),
    vendor(attr::ARMED_FOR_TRIGGER, 0x0017, DataType::Bool, Feature::PackedDetectionConfig),
    vendor(attr::DISTANCE_RESOLUTION, 0x0018, DataType::Enum8, Feature::PackedDetectionConfig),
    vendor(attr::INTERNALS3, 0x0019, DataType::Uint32, Feature::PirDiagnostics),
    vendor(attr::EXTERNAL_ON_TIME, 0x001C, DataType::Uint16, Feature::ExternalTrigger),
    vendor(attr::FAILURE_STATUS, 0x001D, DataType::Uint16, Feature::Diagnostics),
    vendor(attr::INTERNALS, 0x001E, DataType::Uint32, Feature::Diagnostics),
    vendor(attr::RESTARTS_COUNT, 0x001F, DataType::Uint16, Feature::Diagnostics),
    vendor(attr::ILLUMINANCE_EXTERNAL, 0x0020, DataType::Bool, Feature::DiscreteIlluminanceSource),
    vendor(attr::INTERNALS2, 0x0021, DataType::Uint32, Feature::BindDiagnostics),
];

const fn command(
    name: &'static str,
    id: u8,
    params: &'static [ParamDef],
    feature: Feature,
) -> CommandDef {
    CommandDef {
        cluster: ClusterId::PresenceConfig,
        name,
        id,
        params,
        feature,
    }
}

pub const COMMANDS: &[CommandDef] = &[
    command(cmd::RESTART, 0x00, &[], Feature::Core),
    command(cmd::FACTORY_RESET, 0x01, &[], Feature::Core),
    command(cmd::RESET_ENERGY_STAT, 0x02, &[], Feature::EnergyStatistics),
    command(
        cmd::SWITCH_BLUETOOTH,
        0x03,
        &[ParamDef {
            name: "on",
            data_type: DataType::Bool,
        }],
        Feature::ExternalTrigger,
    ),
    command(cmd::RECHECK_BINDS, 0x04, &[], Feature::BindDiagnostics),
];

/// Resolves a vendor attribute id as understood by `revision`.
pub fn attribute_by_id(id: u16, revision: Revision) -> Option<&'static AttributeDef> {
    ATTRIBUTES
        .iter()
        .find(|a| a.id == id && revision.supports(a.feature))
}
