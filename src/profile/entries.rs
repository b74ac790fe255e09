//! The device's property list.
//!
//! Each block is gated on the [`Feature`] that introduced it, so one list
//! covers every revision. Wire definitions are resolved against the
//! revision's schema; an entry naming something the schema lacks is a
//! [`ProfileError::SchemaMismatch`].

use super::layouts::{
    self, CONFIGURED_REPORTS_FOR_BINDS, FALSE_PIR_TRIGGERS, LAST_FALSE_PIR_MS,
    LAST_FALSE_PIR_TICKS, LAST_TIMEOUT_WAIT_RESPONSE, LAST_TIMEOUT_WAIT_SEND_STATUS,
};
use super::reporting::FACTORY_RESET_RESYNC;
use crate::codec::diagnostic::NO_REPORTS_PLACEHOLDER;
use crate::codec::{
    BinaryCodec, BitfieldCodec, BitfieldLayout, Codec, CommandCodec, DiagnosticCodec,
    EnergyHexCodec, EnumCodec, GateArrayCodec, GateFormat, NumericCodec, Render, Resync,
};
use crate::error::{ProfileError, Result};
use crate::registry::AttributeDescriptor;
use crate::revision::{Feature, Revision};
use crate::zcl::ClusterId;
use crate::zcl::clusters::on_off::{self, OnOffCommand};
use crate::zcl::clusters::presence_config::{attr, cmd};
use crate::zcl::clusters::{self, AttributeDef, CommandDef, occupancy_sensing};
use std::time::Duration;

pub const PRESENCE_STATE: &[(&str, u32)] = &[
    ("Clear", 0),
    ("Move", 1),
    ("Still", 2),
    ("MoveStill", 3),
    ("Configuring", 0x80),
    ("Failed", 0x81),
];

pub const EXTENDED_STATE: &[(&str, u32)] = &[
    ("Normal", 0),
    ("DynamicBackgroundAnalysis", 1),
    ("Calibration", 2),
];

pub const PRESENCE_MODE: &[(&str, u32)] = &[("Simple", 2), ("Energy", 1)];

pub const PIR_PRESENCE: &[(&str, u32)] = &[("Clear", 0), ("Detected", 1)];

pub const ON_OFF_MODE: &[(&str, u32)] = &[
    ("OnOff", 0),
    ("OnOnly", 1),
    ("OffOnly", 2),
    ("TimedOn", 3),
    ("TimedOnLocal", 4),
    ("Nothing", 5),
];

pub const DISTANCE_RESOLUTION: &[(&str, u32)] = &[("_75cm", 0), ("_50cm", 1), ("_20cm", 3)];

/// ZCL status codes the firmware reports for its last failed command.
pub const FAILURE_STATUS: &[(&str, u32)] = &[
    ("Ok", 0x00),
    ("Fail", 0x01),
    ("UnAuth", 0x7E),
    ("MalformedCmd", 0x80),
    ("UnsClustCmd", 0x81),
    ("UnsGenCmd", 0x82),
    ("UnsManClustCmd", 0x83),
    ("UnsManGenCmd", 0x84),
    ("InvField", 0x85),
    ("UnsAttr", 0x86),
    ("InvVal", 0x87),
    ("ReadOnly", 0x88),
    ("InsuffSpace", 0x89),
    ("DupeExists", 0x8A),
    ("NotFound", 0x8B),
    ("UnrepAttr", 0x8C),
    ("InvType", 0x8D),
    ("WriteOnly", 0x8F),
    ("Inconsistent", 0x92),
    ("ActDenied", 0x93),
    ("Timeout", 0x94),
    ("Abort", 0x95),
    ("InvImage", 0x96),
    ("WaitForData", 0x97),
    ("NoImg", 0x98),
    ("ReqMoreImg", 0x99),
    ("NotifPend", 0x9A),
    ("HwFail", 0xC0),
    ("SwFail", 0xC1),
    ("CalibErr", 0xC2),
    ("UnsClust", 0xC3),
    ("Limit", 0xC4),
];

/// Looks up the revision's wire definitions for one profile build.
struct Schema {
    revision: Revision,
}

impl Schema {
    fn attribute(&self, cluster: ClusterId, name: &str) -> Result<&'static AttributeDef> {
        clusters::find_attribute(cluster, name, self.revision)
            .ok_or_else(|| ProfileError::SchemaMismatch(format!("{cluster}.{name}")))
    }

    fn vendor(&self, name: &str) -> Result<&'static AttributeDef> {
        self.attribute(ClusterId::PresenceConfig, name)
    }

    fn command(&self, name: &str) -> Result<&'static CommandDef> {
        clusters::find_command(ClusterId::PresenceConfig, name, self.revision)
            .ok_or_else(|| {
                ProfileError::SchemaMismatch(format!("{}.{name}", ClusterId::PresenceConfig))
            })
    }

    /// Property backed by the vendor attribute `attribute`.
    fn vendor_property(
        &self,
        property: &'static str,
        attribute: &str,
        codec: Codec,
    ) -> Result<AttributeDescriptor> {
        Ok(AttributeDescriptor::attribute(property, self.vendor(attribute)?, codec))
    }

    fn trigger(
        &self,
        property: &'static str,
        command: &'static str,
        label: &'static [&'static str],
    ) -> Result<AttributeDescriptor> {
        Ok(AttributeDescriptor::command(
            property,
            self.command(command)?,
            Codec::Command(CommandCodec::new(ClusterId::PresenceConfig, command, label)),
        ))
    }
}

fn numeric(min: u32, max: u32) -> Codec {
    Codec::Numeric(NumericCodec::new(min, max))
}

fn lookup(table: &'static [(&'static str, u32)]) -> Codec {
    Codec::Enum(EnumCodec::new(table))
}

fn flags(
    def: &'static AttributeDef,
    layout: &'static BitfieldLayout,
) -> Vec<AttributeDescriptor> {
    layout
        .fields
        .iter()
        .map(|field| {
            AttributeDescriptor::attribute(
                field.name,
                def,
                Codec::Bitfield(BitfieldCodec {
                    layout,
                    field: *field,
                }),
            )
            .config()
        })
        .collect()
}

fn diagnostics(
    def: &'static AttributeDef,
    layout: &'static BitfieldLayout,
) -> Vec<AttributeDescriptor> {
    layout
        .fields
        .iter()
        .map(|field| {
            let render = match field.name {
                CONFIGURED_REPORTS_FOR_BINDS => Render::FlagList {
                    prefix: "Bind",
                    placeholder: NO_REPORTS_PLACEHOLDER,
                },
                LAST_TIMEOUT_WAIT_SEND_STATUS | LAST_TIMEOUT_WAIT_RESPONSE => Render::Flag {
                    clear: "Done",
                    set: "Waiting",
                },
                _ => Render::Number,
            };
            let entry = AttributeDescriptor::attribute(
                field.name,
                def,
                Codec::Diagnostic(DiagnosticCodec {
                    layout,
                    field: *field,
                    render,
                }),
            );
            match field.name {
                FALSE_PIR_TRIGGERS => entry.unit("times"),
                LAST_FALSE_PIR_TICKS => entry.unit("ticks"),
                LAST_FALSE_PIR_MS => entry.unit("ms"),
                _ => entry,
            }
        })
        .collect()
}

/// Every property of `revision`, in registration order.
pub fn entries(
    revision: Revision,
    factory_reset_settle: Duration,
) -> Result<Vec<AttributeDescriptor>> {
    let schema = Schema { revision };
    let mut out = Vec::new();

    // Core
    out.push(
        AttributeDescriptor::attribute(
            occupancy_sensing::OCCUPANCY,
            schema.attribute(ClusterId::OccupancySensing, occupancy_sensing::OCCUPANCY)?,
            Codec::Diagnostic(DiagnosticCodec {
                layout: &layouts::OCCUPANCY,
                field: layouts::OCCUPANCY.fields[0],
                render: Render::Bool,
            }),
        )
        .state()
        .describe("Indicates whether the device detected occupancy"),
    );
    out.push(
        AttributeDescriptor::attribute(
            "presence_timeout",
            schema.attribute(
                ClusterId::OccupancySensing,
                occupancy_sensing::OCCUPIED_TO_UNOCCUPIED_DELAY,
            )?,
            numeric(2, 120),
        )
        .config()
        .unit("s")
        .describe("Occupied to unoccupied delay"),
    );
    out.push(
        schema
            .vendor_property("presence_state", attr::STATE, lookup(PRESENCE_STATE))?
            .read_only()
            .diagnostic()
            .describe("Presence state"),
    );
    out.push(
        schema
            .vendor_property("extended_state", attr::EX_STATE, lookup(EXTENDED_STATE))?
            .read_only()
            .describe("Extended state"),
    );
    out.push(
        schema
            .vendor_property(attr::PRESENCE_MODE, attr::PRESENCE_MODE, lookup(PRESENCE_MODE))?
            .config()
            .describe("Detection reporting mode"),
    );
    out.push(
        schema
            .vendor_property(attr::MIN_DISTANCE, attr::MIN_DISTANCE, numeric(0, 12))?
            .config()
            .unit("m")
            .describe("Minimum detection distance"),
    );
    out.push(
        schema
            .vendor_property(attr::MAX_DISTANCE, attr::MAX_DISTANCE, numeric(1, 12))?
            .config()
            .unit("m")
            .describe("Maximum detection distance"),
    );
    for name in [
        attr::MOVE_DISTANCE,
        attr::MOVE_ENERGY,
        attr::STILL_DISTANCE,
        attr::STILL_ENERGY,
    ] {
        let codec = Codec::Numeric(NumericCodec::unbounded());
        out.push(schema.vendor_property(name, name, codec)?.read_only().diagnostic());
    }

    let gates = if revision.supports(Feature::CountPrefixedGates) {
        GateFormat::CountPrefixed
    } else {
        GateFormat::Plain
    };
    for (property, attribute, description) in [
        ("move_sensitivity", attr::MOVE_SENSITIVITY, "Configure sensitivity for Move Sensitivity"),
        ("still_sensitivity", attr::STILL_SENSITIVITY, "Configure sensitivity for Still Sensitivity"),
    ] {
        let codec = Codec::GateArray(GateArrayCodec::new(gates));
        out.push(
            schema
                .vendor_property(property, attribute, codec)?
                .config()
                .describe(description),
        );
    }

    out.push(
        schema
            .trigger(cmd::RESTART, cmd::RESTART, &["Restart"])?
            .describe("Restart LD2412 module"),
    );
    let factory_reset = CommandCodec::new(ClusterId::PresenceConfig, cmd::FACTORY_RESET, &["Reset"])
        .with_resync(Resync {
            settle: factory_reset_settle,
            batch: FACTORY_RESET_RESYNC,
        });
    out.push(
        AttributeDescriptor::command(
            cmd::FACTORY_RESET,
            schema.command(cmd::FACTORY_RESET)?,
            Codec::Command(factory_reset),
        )
        .describe("Perform factory reset on LD2412 module"),
    );

    if revision.supports(Feature::EnergyStatistics) {
        out.push(
            schema
                .vendor_property(attr::MEASURED_LIGHT, attr::MEASURED_LIGHT, numeric(0, 255))?
                .read_only()
                .diagnostic()
                .unit("lx")
                .describe("Measured light level"),
        );
        for name in [
            attr::MOVE_ENERGY_LAST,
            attr::STILL_ENERGY_LAST,
            attr::MOVE_ENERGY_MIN,
            attr::STILL_ENERGY_MIN,
            attr::MOVE_ENERGY_MAX,
            attr::STILL_ENERGY_MAX,
        ] {
            out.push(schema.vendor_property(name, name, Codec::EnergyHex(EnergyHexCodec))?);
        }
        out.push(
            schema
                .trigger(cmd::RESET_ENERGY_STAT, cmd::RESET_ENERGY_STAT, &["Reset"])?
                .describe("Perform reset internally gathered energy statistics"),
        );
    }

    if revision.supports(Feature::PirAndOnOff) {
        out.push(
            schema
                .vendor_property(attr::PIR_PRESENCE, attr::PIR_PRESENCE, lookup(PIR_PRESENCE))?
                .read_only()
                .diagnostic()
                .describe("PIR Presence"),
        );
        out.push(
            schema
                .vendor_property(attr::ON_OFF_MODE, attr::ON_OFF_MODE, lookup(ON_OFF_MODE))?
                .config()
                .describe("On/Off Command Mode"),
        );
        out.push(
            schema
                .vendor_property(attr::ON_OFF_TIMEOUT, attr::ON_OFF_TIMEOUT, numeric(0, 1000))?
                .config()
                .describe("On/Off Timeout"),
        );
        out.push(
            schema
                .vendor_property(
                    attr::ILLUMINANCE_THRESHOLD,
                    attr::ILLUMINANCE_THRESHOLD,
                    numeric(0, 255),
                )?
                .config()
                .describe("Illuminance level below which presence is detected"),
        );
        let external = BinaryCodec::new(("ON", 1), ("OFF", 0))
            .via_commands(OnOffCommand::On.name(), OnOffCommand::Off.name());
        out.push(
            AttributeDescriptor::attribute(
                "external_on_off",
                schema.attribute(ClusterId::OnOff, on_off::ON_OFF)?,
                Codec::Binary(external),
            )
            .describe("External On/Off state"),
        );
    }

    if revision.supports(Feature::ExternalTrigger) {
        out.push(
            schema
                .vendor_property(attr::EXTERNAL_ON_TIME, attr::EXTERNAL_ON_TIME, numeric(0, 120))?
                .config()
                .describe("On Time for external signal"),
        );
        let switch = schema.command(cmd::SWITCH_BLUETOOTH)?;
        let bluetooth: [(&'static str, &'static [&'static str], bool, &'static str); 2] = [
            ("switch_bluetooth_on", &["On"], true, "Turn Bluetooth On"),
            ("switch_bluetooth_off", &["Off"], false, "Turn Bluetooth Off"),
        ];
        for (property, labels, on, description) in bluetooth {
            let codec = CommandCodec::new(ClusterId::PresenceConfig, cmd::SWITCH_BLUETOOTH, labels)
                .with_switch("on", on);
            out.push(
                AttributeDescriptor::command(property, switch, Codec::Command(codec))
                    .describe(description),
            );
        }
    }

    if revision.supports(Feature::DiscreteDetectionFlags) {
        for name in [
            attr::EDGE_MM_WAVE,
            attr::EDGE_PIR_INTERNAL,
            attr::EDGE_EXTERNAL,
            attr::KEEP_MM_WAVE,
            attr::KEEP_PIR_INTERNAL,
            attr::KEEP_EXTERNAL,
        ] {
            out.push(schema.vendor_property(name, name, numeric(0, 1))?.config());
        }
    }

    if revision.supports(Feature::Diagnostics) {
        out.push(
            schema
                .vendor_property(attr::FAILURE_STATUS, attr::FAILURE_STATUS, lookup(FAILURE_STATUS))?
                .read_only()
                .diagnostic()
                .describe("Last Cmd failed status"),
        );
        out.push(
            schema
                .vendor_property(attr::RESTARTS_COUNT, attr::RESTARTS_COUNT, numeric(0, 65535))?
                .read_only()
                .diagnostic()
                .unit("times")
                .describe("Amount of restarts"),
        );
    }
    if let Some(layout) = layouts::internals(revision) {
        out.extend(diagnostics(schema.vendor(attr::INTERNALS)?, layout));
    }

    if revision.supports(Feature::DiscreteIlluminanceSource) {
        out.push(
            schema
                .vendor_property(attr::ILLUMINANCE_EXTERNAL, attr::ILLUMINANCE_EXTERNAL, numeric(0, 1))?
                .config()
                .describe("Defines if illuminance should be taken from external bound sensor"),
        );
    }

    if let Some(layout) = layouts::internals2(revision) {
        out.extend(diagnostics(schema.vendor(attr::INTERNALS2)?, layout));
    }
    if revision.supports(Feature::BindDiagnostics) {
        out.push(
            schema
                .trigger(cmd::RECHECK_BINDS, cmd::RECHECK_BINDS, &["Recheck"])?
                .describe("Run reporting capability check on existing binds again"),
        );
    }

    if let Some(layout) = layouts::detection_config(revision) {
        out.extend(flags(schema.vendor(attr::PRESENCE_DETECTION_CONFIG)?, layout));
    }
    if revision.supports(Feature::PackedDetectionConfig) {
        let armed = BinaryCodec::new(("Armed", 1), ("Not Armed", 0));
        out.push(
            schema
                .vendor_property(attr::ARMED_FOR_TRIGGER, attr::ARMED_FOR_TRIGGER, Codec::Binary(armed))?
                .describe("Can be triggered again"),
        );
        out.push(
            schema
                .vendor_property(
                    attr::DISTANCE_RESOLUTION,
                    attr::DISTANCE_RESOLUTION,
                    lookup(DISTANCE_RESOLUTION),
                )?
                .config()
                .describe("Distance resolution"),
        );
    }

    if let Some(layout) = layouts::internals3(revision) {
        out.extend(diagnostics(schema.vendor(attr::INTERNALS3)?, layout));
    }

    Ok(out)
}
