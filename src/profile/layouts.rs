//! Packed attribute layouts, one constant per firmware generation.

use crate::codec::{BitField, BitfieldLayout};
use crate::revision::{Feature, Revision};
use crate::zcl::clusters::occupancy_sensing;
use crate::zcl::clusters::presence_config::attr;

pub const BOUND_DEVICES: &str = "bound_devices";
pub const DEVICES_UNAVAILABLE_FAILURES: &str = "devices_unavailable_failures";
pub const CONFIGURED_REPORTS_FOR_BINDS: &str = "configured_reports_for_binds";
pub const CMD_RETRY_FAILURES: &str = "cmd_retry_failures";
pub const CMD_TOTAL_FAILURES: &str = "cmd_total_failures";
pub const LAST_INDICATION_STATUS: &str = "last_indication_status";

pub const LAST_TIMEOUT_TSN: &str = "last_timeout_tsn";
pub const LAST_TIMEOUT_WAIT_SEND_STATUS: &str = "last_timeout_wait_send_status";
pub const LAST_TIMEOUT_WAIT_RESPONSE: &str = "last_timeout_wait_response";
pub const FALSE_PIR_TRIGGERS: &str = "false_pir_triggers";
pub const LAST_ESP_ERR: &str = "last_esp_err";

pub const LAST_FALSE_PIR_TICKS: &str = "last_false_pir_ticks";
pub const LAST_FALSE_PIR_MS: &str = "last_false_pir_ms";

pub static OCCUPANCY: BitfieldLayout = BitfieldLayout {
    attribute: occupancy_sensing::OCCUPANCY,
    size_bytes: 1,
    fields: &[BitField::flag(occupancy_sensing::OCCUPANCY, 0)],
};

const DETECTION_SOURCES: [BitField; 6] = [
    BitField::flag(attr::EDGE_MM_WAVE, 0),
    BitField::flag(attr::EDGE_PIR_INTERNAL, 1),
    BitField::flag(attr::EDGE_EXTERNAL, 2),
    BitField::flag(attr::KEEP_MM_WAVE, 3),
    BitField::flag(attr::KEEP_PIR_INTERNAL, 4),
    BitField::flag(attr::KEEP_EXTERNAL, 5),
];

pub static DETECTION_CONFIG_R7: BitfieldLayout = BitfieldLayout {
    attribute: attr::PRESENCE_DETECTION_CONFIG,
    size_bytes: 1,
    fields: &DETECTION_SOURCES,
};

pub static DETECTION_CONFIG_R8: BitfieldLayout = BitfieldLayout {
    attribute: attr::PRESENCE_DETECTION_CONFIG,
    size_bytes: 1,
    fields: &[
        DETECTION_SOURCES[0],
        DETECTION_SOURCES[1],
        DETECTION_SOURCES[2],
        DETECTION_SOURCES[3],
        DETECTION_SOURCES[4],
        DETECTION_SOURCES[5],
        BitField::flag(attr::ILLUMINANCE_EXTERNAL, 6),
    ],
};

pub static INTERNALS: BitfieldLayout = BitfieldLayout {
    attribute: attr::INTERNALS,
    size_bytes: 4,
    fields: &[
        BitField::new(BOUND_DEVICES, 0, 4),
        BitField::new(DEVICES_UNAVAILABLE_FAILURES, 4, 4),
        BitField::new(CONFIGURED_REPORTS_FOR_BINDS, 8, 8),
        BitField::new(CMD_RETRY_FAILURES, 16, 4),
        BitField::new(CMD_TOTAL_FAILURES, 20, 4),
        BitField::new(LAST_INDICATION_STATUS, 24, 8),
    ],
};

pub static INTERNALS2_R6: BitfieldLayout = BitfieldLayout {
    attribute: attr::INTERNALS2,
    size_bytes: 4,
    fields: &[
        BitField::new(LAST_TIMEOUT_TSN, 0, 8),
        BitField::flag(LAST_TIMEOUT_WAIT_SEND_STATUS, 8),
        BitField::flag(LAST_TIMEOUT_WAIT_RESPONSE, 9),
        BitField::new(LAST_ESP_ERR, 16, 16),
    ],
};

pub static INTERNALS2_R8: BitfieldLayout = BitfieldLayout {
    attribute: attr::INTERNALS2,
    size_bytes: 4,
    fields: &[
        BitField::new(LAST_TIMEOUT_TSN, 0, 8),
        BitField::flag(LAST_TIMEOUT_WAIT_SEND_STATUS, 8),
        BitField::flag(LAST_TIMEOUT_WAIT_RESPONSE, 9),
        BitField::new(FALSE_PIR_TRIGGERS, 10, 6),
        BitField::new(LAST_ESP_ERR, 16, 16),
    ],
};

pub static INTERNALS3: BitfieldLayout = BitfieldLayout {
    attribute: attr::INTERNALS3,
    size_bytes: 4,
    fields: &[
        BitField::new(LAST_FALSE_PIR_TICKS, 0, 16),
        BitField::new(LAST_FALSE_PIR_MS, 16, 16),
    ],
};

pub fn detection_config(revision: Revision) -> Option<&'static BitfieldLayout> {
    if !revision.supports(Feature::PackedDetectionConfig) {
        None
    } else if revision.supports(Feature::PirDiagnostics) {
        Some(&DETECTION_CONFIG_R8)
    } else {
        Some(&DETECTION_CONFIG_R7)
    }
}

pub fn internals(revision: Revision) -> Option<&'static BitfieldLayout> {
    revision
        .supports(Feature::Diagnostics)
        .then_some(&INTERNALS)
}

pub fn internals2(revision: Revision) -> Option<&'static BitfieldLayout> {
    if !revision.supports(Feature::BindDiagnostics) {
        None
    } else if revision.supports(Feature::PirDiagnostics) {
        Some(&INTERNALS2_R8)
    } else {
        Some(&INTERNALS2_R6)
    }
}

pub fn internals3(revision: Revision) -> Option<&'static BitfieldLayout> {
    revision
        .supports(Feature::PirDiagnostics)
        .then_some(&INTERNALS3)
}

/// Every layout constant, for validation.
pub fn all() -> [&'static BitfieldLayout; 7] {
    [
        &OCCUPANCY,
        &DETECTION_CONFIG_R7,
        &DETECTION_CONFIG_R8,
        &INTERNALS,
        &INTERNALS2_R6,
        &INTERNALS2_R8,
        &INTERNALS3,
    ]
}
