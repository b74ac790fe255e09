//! Name-keyed table of codecs between device attributes and properties.
//!
//! The protocol engine hands every inbound report to [`CodecRegistry::decode`]
//! and routes property writes and refreshes through [`CodecRegistry::set`] and
//! [`CodecRegistry::get`]. Entries are registered once while the profile is
//! built and never change afterwards.

use crate::codec::{
    BinaryWrite, BitfieldCodec, BitfieldLayout, Codec, Properties, PropertyValue,
};
use crate::error::{ProfileError, Result};
use crate::revision::Revision;
use crate::zcl::clusters::{self, AttributeDef};
use crate::zcl::{AttributeWrite, CommandParams, Endpoint, RawValue, Report};
use std::collections::HashMap;
use std::sync::Arc;

pub mod descriptor;
pub mod locks;
pub mod sink;

pub use descriptor::{AttributeDescriptor, DescriptorInfo, Wire};
pub use locks::AttributeLocks;
pub use sink::{CodecEvent, CodecSink, LogSink};

pub struct CodecRegistry {
    revision: Revision,
    entries: Vec<AttributeDescriptor>,
    index: HashMap<&'static str, usize>,
    sink: Arc<dyn CodecSink>,
    locks: Option<AttributeLocks>,
}

impl CodecRegistry {
    /// Empty registry for `revision`; bitfield writes are serialized.
    pub fn new(revision: Revision, sink: Arc<dyn CodecSink>) -> Self {
        Self {
            revision,
            entries: Vec::new(),
            index: HashMap::new(),
            sink,
            locks: Some(AttributeLocks::new()),
        }
    }

    /// Turn per-attribute write serialization on or off.
    pub fn with_serialized_writes(mut self, enabled: bool) -> Self {
        self.locks = enabled.then(AttributeLocks::new);
        self
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn serializes_writes(&self) -> bool {
        self.locks.is_some()
    }

    /// Add an entry after checking it against the revision schema.
    pub fn register(&mut self, descriptor: AttributeDescriptor) -> Result<()> {
        if self.index.contains_key(descriptor.name) {
            return Err(ProfileError::DuplicateProperty(descriptor.name.to_string()));
        }

        match descriptor.wire {
            Wire::Attribute(def) => {
                if clusters::find_attribute(def.cluster, def.name, self.revision) != Some(def) {
                    return Err(ProfileError::SchemaMismatch(format!(
                        "{}.{}",
                        def.cluster, def.name
                    )));
                }
            }
            Wire::Command(def) => {
                if clusters::find_command(def.cluster, def.name, self.revision) != Some(def) {
                    return Err(ProfileError::SchemaMismatch(format!(
                        "{}.{}",
                        def.cluster, def.name
                    )));
                }
            }
        }

        match (&descriptor.codec, descriptor.wire) {
            (Codec::Bitfield(c), Wire::Attribute(def)) => check_layout(c.layout, def)?,
            (Codec::Diagnostic(c), Wire::Attribute(def)) => check_layout(c.layout, def)?,
            (Codec::Command(c), Wire::Command(def)) => {
                if c.cluster != def.cluster || c.command != def.name {
                    return Err(ProfileError::SchemaMismatch(format!(
                        "{}.{}",
                        c.cluster, c.command
                    )));
                }
            }
            (Codec::Command(_), Wire::Attribute(def)) => {
                return Err(ProfileError::SchemaMismatch(format!(
                    "{} cannot trigger {}",
                    def.name, descriptor.name
                )));
            }
            (_, Wire::Command(def)) => {
                return Err(ProfileError::SchemaMismatch(format!(
                    "{} cannot back {}",
                    def.name, descriptor.name
                )));
            }
            _ => {}
        }

        self.index.insert(descriptor.name, self.entries.len());
        self.entries.push(descriptor);
        Ok(())
    }

    pub fn descriptor(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.index.get(name).map(|i| &self.entries[*i])
    }

    /// Entries in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode every property sourced from the report.
    ///
    /// `None` when nothing in the report is relevant. Never fails: values
    /// the codecs cannot make sense of are skipped.
    pub fn decode(&self, report: &Report) -> Option<Properties> {
        let mut properties = Properties::new();

        for entry in &self.entries {
            let Some(def) = entry.source() else {
                continue;
            };
            if def.cluster != report.cluster || !entry.access.readable() {
                continue;
            }
            let Some(raw) = report.get(def.name) else {
                continue;
            };

            match entry.codec.decode(raw) {
                Some(value) => {
                    self.sink.record(CodecEvent::Decoded {
                        property: entry.name,
                        value: &value,
                    });
                    properties.insert(entry.name.to_string(), value);
                }
                None => self.sink.record(CodecEvent::Skipped {
                    property: entry.name,
                    attribute: def.name,
                }),
            }
        }

        (!properties.is_empty()).then_some(properties)
    }

    /// Encode `value` and issue the resulting request.
    ///
    /// Returns the state to publish: `{name: value}` for attribute-backed
    /// properties, nothing for command triggers. Transport failures
    /// propagate unchanged.
    pub async fn set(
        &self,
        endpoint: &dyn Endpoint,
        name: &str,
        value: PropertyValue,
    ) -> Result<Properties> {
        let entry = self
            .descriptor(name)
            .ok_or_else(|| ProfileError::UnknownProperty(name.to_string()))?;
        if !entry.access.writable() {
            return Err(ProfileError::ReadOnly(name.to_string()));
        }

        let def = match (&entry.codec, entry.wire) {
            (Codec::Command(codec), _) => {
                codec.accept(name, &value)?;
                endpoint
                    .command(codec.cluster, codec.command, codec.params())
                    .await?;
                self.sink.record(CodecEvent::CommandInvoked {
                    property: entry.name,
                    cluster: codec.cluster,
                    command: codec.command,
                });

                if let Some(resync) = codec.resync {
                    self.sink.record(CodecEvent::ResyncScheduled {
                        property: entry.name,
                        settle: resync.settle,
                        reads: resync.batch.len(),
                    });
                    if !resync.settle.is_zero() {
                        tokio::time::sleep(resync.settle).await;
                    }
                    for batch in resync.batch {
                        endpoint.read(batch.cluster, batch.attributes).await?;
                    }
                }
                return Ok(Properties::new());
            }
            (_, Wire::Attribute(def)) => def,
            (_, Wire::Command(def)) => {
                return Err(ProfileError::SchemaMismatch(def.name.to_string()));
            }
        };

        match &entry.codec {
            Codec::Numeric(codec) => {
                let raw = codec.encode(name, &value)?;
                self.write_fixed(endpoint, entry, def, raw).await?;
            }
            Codec::Enum(codec) => {
                let raw = codec.encode(name, &value)?;
                self.write_fixed(endpoint, entry, def, raw).await?;
            }
            Codec::Binary(codec) => {
                let on = codec.encode(name, &value)?;
                match codec.write {
                    BinaryWrite::Attribute => {
                        self.write_fixed(endpoint, entry, def, codec.raw_for(on))
                            .await?;
                    }
                    BinaryWrite::Command { on: on_cmd, off } => {
                        let command = if on { on_cmd } else { off };
                        endpoint
                            .command(def.cluster, command, CommandParams::new())
                            .await?;
                        self.sink.record(CodecEvent::CommandInvoked {
                            property: entry.name,
                            cluster: def.cluster,
                            command,
                        });
                    }
                }
            }
            Codec::Bitfield(codec) => {
                self.write_bitfield(endpoint, entry, def, codec, &value)
                    .await?;
            }
            Codec::GateArray(codec) => {
                let buf = codec.encode(name, &value)?;
                endpoint
                    .write(def.cluster, AttributeWrite::octets(def.name, buf))
                    .await?;
                self.sink.record(CodecEvent::WriteIssued {
                    property: entry.name,
                    cluster: def.cluster,
                    attribute: def.name,
                });
            }
            Codec::EnergyHex(_) | Codec::Diagnostic(_) | Codec::Command(_) => {
                return Err(ProfileError::ReadOnly(name.to_string()));
            }
        }

        Ok(Properties::from([(name.to_string(), value)]))
    }

    /// Read the property's source attribute and decode the response.
    ///
    /// Every property sharing the attribute is refreshed along with it.
    pub async fn get(&self, endpoint: &dyn Endpoint, name: &str) -> Result<Properties> {
        let entry = self
            .descriptor(name)
            .ok_or_else(|| ProfileError::UnknownProperty(name.to_string()))?;
        let def = match entry.source() {
            Some(def) if entry.access.readable() => def,
            _ => return Err(ProfileError::WriteOnly(name.to_string())),
        };

        let report = endpoint.read(def.cluster, &[def.name]).await?;
        Ok(self.decode(&report).unwrap_or_default())
    }

    async fn write_fixed(
        &self,
        endpoint: &dyn Endpoint,
        entry: &AttributeDescriptor,
        def: &'static AttributeDef,
        raw: u32,
    ) -> Result<()> {
        if let Some(max) = def.data_type.max_value()
            && raw > max
        {
            return Err(ProfileError::OutOfRange {
                property: entry.name.to_string(),
                value: raw,
                min: 0,
                max,
            });
        }

        endpoint
            .write(
                def.cluster,
                AttributeWrite::plain(def.name, RawValue::for_type(def.data_type, raw)),
            )
            .await?;
        self.sink.record(CodecEvent::WriteIssued {
            property: entry.name,
            cluster: def.cluster,
            attribute: def.name,
        });
        Ok(())
    }

    /// Read, merge the sub-field, write back; under the attribute's lock
    /// when serialization is enabled.
    async fn write_bitfield(
        &self,
        endpoint: &dyn Endpoint,
        entry: &AttributeDescriptor,
        def: &'static AttributeDef,
        codec: &BitfieldCodec,
        value: &PropertyValue,
    ) -> Result<()> {
        let lock = self.locks.as_ref().map(|l| l.get(def.cluster, def.id));
        let _guard = match &lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        let report = endpoint.read(def.cluster, &[def.name]).await?;
        let current = report
            .get(def.name)
            .and_then(RawValue::as_u32)
            .ok_or_else(|| ProfileError::MissingAttribute {
                attribute: def.name.to_string(),
            })?;
        let merged = codec.merge(entry.name, current, value)?;

        self.write_fixed(endpoint, entry, def, merged).await
    }
}

fn check_layout(layout: &BitfieldLayout, def: &AttributeDef) -> Result<()> {
    layout.validate()?;
    if layout.attribute != def.name {
        return Err(ProfileError::InvalidLayout {
            attribute: layout.attribute,
            reason: format!("registered against {}", def.name),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{
        BinaryCodec, BitField, CommandCodec, EnumCodec, GateArrayCodec, GateFormat,
        NumericCodec, ReadBatch, Resync,
    };
    use crate::registry::sink::RecordingSink;
    use crate::zcl::clusters::presence_config::{attr, cmd};
    use crate::zcl::clusters::{on_off, presence_config};
    use crate::zcl::memory::Request;
    use crate::zcl::{ClusterId, MemoryEndpoint, TransportError, WriteValue};
    use std::time::Duration;

    static DETECTION: BitfieldLayout = BitfieldLayout {
        attribute: attr::PRESENCE_DETECTION_CONFIG,
        size_bytes: 1,
        fields: &[
            BitField::flag(attr::EDGE_MM_WAVE, 0),
            BitField::flag(attr::EDGE_PIR_INTERNAL, 1),
        ],
    };

    static RESYNC: &[ReadBatch] = &[
        ReadBatch {
            cluster: ClusterId::PresenceConfig,
            attributes: &[attr::MIN_DISTANCE, attr::MAX_DISTANCE],
        },
        ReadBatch {
            cluster: ClusterId::PresenceConfig,
            attributes: &[attr::STATE],
        },
    ];

    fn vendor(name: &str) -> &'static AttributeDef {
        clusters::find_attribute(ClusterId::PresenceConfig, name, Revision::R8).unwrap()
    }

    fn registry(serialized: bool) -> (CodecRegistry, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let mut registry =
            CodecRegistry::new(Revision::R8, sink.clone()).with_serialized_writes(serialized);

        let entries = [
            AttributeDescriptor::attribute(
                "presence_mode",
                vendor(attr::PRESENCE_MODE),
                Codec::Enum(EnumCodec::new(&[("Simple", 2), ("Energy", 1)])),
            ),
            AttributeDescriptor::attribute(
                "max_distance",
                vendor(attr::MAX_DISTANCE),
                Codec::Numeric(NumericCodec::new(1, 12)),
            ),
            AttributeDescriptor::attribute(
                "measured_light",
                vendor(attr::MEASURED_LIGHT),
                Codec::Numeric(NumericCodec::new(0, 255)),
            )
            .read_only(),
            AttributeDescriptor::attribute(
                "move_sensitivity",
                vendor(attr::MOVE_SENSITIVITY),
                Codec::GateArray(GateArrayCodec::new(GateFormat::Plain)),
            ),
            AttributeDescriptor::attribute(
                "external_on_off",
                clusters::find_attribute(ClusterId::OnOff, on_off::ON_OFF, Revision::R8).unwrap(),
                Codec::Binary(BinaryCodec::new(("ON", 1), ("OFF", 0)).via_commands("on", "off")),
            ),
            AttributeDescriptor::attribute(
                attr::EDGE_MM_WAVE,
                vendor(attr::PRESENCE_DETECTION_CONFIG),
                Codec::Bitfield(BitfieldCodec::new(&DETECTION, attr::EDGE_MM_WAVE).unwrap()),
            ),
            AttributeDescriptor::attribute(
                attr::EDGE_PIR_INTERNAL,
                vendor(attr::PRESENCE_DETECTION_CONFIG),
                Codec::Bitfield(BitfieldCodec::new(&DETECTION, attr::EDGE_PIR_INTERNAL).unwrap()),
            ),
            AttributeDescriptor::command(
                "factory_reset",
                clusters::find_command(ClusterId::PresenceConfig, cmd::FACTORY_RESET, Revision::R8)
                    .unwrap(),
                Codec::Command(
                    CommandCodec::new(ClusterId::PresenceConfig, cmd::FACTORY_RESET, &["Reset"])
                        .with_resync(Resync {
                            settle: Duration::ZERO,
                            batch: RESYNC,
                        }),
                ),
            ),
        ];
        for entry in entries {
            registry.register(entry).unwrap();
        }
        (registry, sink)
    }

    fn writes(endpoint: &MemoryEndpoint) -> Vec<AttributeWrite> {
        endpoint
            .requests()
            .into_iter()
            .filter_map(|r| match r {
                Request::Write { write, .. } => Some(write),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_decode_enum_and_unknown_value() {
        let (registry, sink) = registry(true);
        let report = Report::new(ClusterId::PresenceConfig)
            .with(attr::PRESENCE_MODE, RawValue::UInt(2))
            .with(attr::MAX_DISTANCE, RawValue::UInt(6));
        let decoded = registry.decode(&report).unwrap();
        assert_eq!(decoded["presence_mode"], PropertyValue::from("Simple"));
        assert_eq!(decoded["max_distance"], PropertyValue::Number(6));

        let report = Report::new(ClusterId::PresenceConfig)
            .with(attr::PRESENCE_MODE, RawValue::UInt(99));
        assert_eq!(registry.decode(&report), None);
        assert!(sink.events.lock().iter().any(|e| e.contains("skipped")));
    }

    #[test]
    fn test_decode_ignores_other_clusters_and_attributes() {
        let (registry, _) = registry(true);
        let report = Report::new(ClusterId::OccupancySensing)
            .with(attr::PRESENCE_MODE, RawValue::UInt(2));
        assert_eq!(registry.decode(&report), None);

        let report = Report::new(ClusterId::PresenceConfig).with("unrelated", RawValue::UInt(1));
        assert_eq!(registry.decode(&report), None);

        let report = Report::new(ClusterId::PresenceConfig)
            .with(attr::PRESENCE_DETECTION_CONFIG, RawValue::UInt(0b10));
        let decoded = registry.decode(&report).unwrap();
        assert_eq!(decoded[attr::EDGE_MM_WAVE], PropertyValue::Number(0));
        assert_eq!(decoded[attr::EDGE_PIR_INTERNAL], PropertyValue::Number(1));
    }

    #[tokio::test]
    async fn test_set_enum_writes_raw_value() {
        let (registry, _) = registry(true);
        let endpoint = MemoryEndpoint::new();
        let state = registry
            .set(&endpoint, "presence_mode", "Energy".into())
            .await
            .unwrap();
        assert_eq!(state["presence_mode"], PropertyValue::from("Energy"));
        assert_eq!(
            writes(&endpoint),
            vec![AttributeWrite::plain(attr::PRESENCE_MODE, RawValue::UInt(1))]
        );
    }

    #[tokio::test]
    async fn test_set_rejects_before_issuing_requests() {
        let (registry, _) = registry(true);
        let endpoint = MemoryEndpoint::new();

        assert!(matches!(
            registry.set(&endpoint, "max_distance", PropertyValue::Number(13)).await,
            Err(ProfileError::OutOfRange { .. })
        ));
        assert!(matches!(
            registry.set(&endpoint, "measured_light", PropertyValue::Number(1)).await,
            Err(ProfileError::ReadOnly(_))
        ));
        assert!(matches!(
            registry.set(&endpoint, "nope", PropertyValue::Number(1)).await,
            Err(ProfileError::UnknownProperty(_))
        ));
        assert!(endpoint.requests().is_empty());
    }

    #[tokio::test]
    async fn test_gate_array_write_is_typed() {
        let (registry, _) = registry(true);
        let endpoint = MemoryEndpoint::new();
        let gates: PropertyValue =
            serde_json::from_value(serde_json::json!({
                "gate0": 10, "gate1": 11, "gate2": 12, "gate3": 13, "gate4": 14,
                "gate5": 15, "gate6": 16, "gate7": 17, "gate8": 18, "gate9": 19,
                "gate10": 20, "gate11": 21, "gate12": 22, "gate13": 23
            }))
            .unwrap();
        registry.set(&endpoint, "move_sensitivity", gates).await.unwrap();

        let written = writes(&endpoint);
        assert_eq!(written.len(), 1);
        match &written[0].value {
            WriteValue::Typed { value, data_type } => {
                assert_eq!(value.len(), 14);
                assert_eq!(value[13], 23);
                assert_eq!(*data_type, crate::zcl::DataType::OctetStr);
            }
            other => panic!("unexpected write {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_binary_via_commands() {
        let (registry, _) = registry(true);
        let endpoint = MemoryEndpoint::new();
        registry
            .set(&endpoint, "external_on_off", "ON".into())
            .await
            .unwrap();
        assert_eq!(
            endpoint.requests(),
            vec![Request::Command {
                cluster: ClusterId::OnOff,
                command: "on".to_string(),
                params: CommandParams::new(),
            }]
        );

        let state = registry.get(&endpoint, "external_on_off").await.unwrap();
        assert_eq!(state["external_on_off"], PropertyValue::from("ON"));
    }

    #[tokio::test]
    async fn test_bitfield_read_modify_write() {
        let (registry, _) = registry(true);
        let endpoint = MemoryEndpoint::new().with_value(
            ClusterId::PresenceConfig,
            attr::PRESENCE_DETECTION_CONFIG,
            RawValue::UInt(0b1010_0000),
        );

        registry
            .set(&endpoint, attr::EDGE_PIR_INTERNAL, PropertyValue::Number(1))
            .await
            .unwrap();

        let requests = endpoint.requests();
        assert!(matches!(requests[0], Request::Read { .. }));
        assert_eq!(
            requests[1],
            Request::Write {
                cluster: ClusterId::PresenceConfig,
                write: AttributeWrite::plain(
                    attr::PRESENCE_DETECTION_CONFIG,
                    RawValue::UInt(0b1010_0010)
                ),
            }
        );
    }

    #[tokio::test]
    async fn test_bitfield_needs_current_value() {
        let (registry, _) = registry(true);
        let endpoint = MemoryEndpoint::new();
        assert!(matches!(
            registry
                .set(&endpoint, attr::EDGE_MM_WAVE, PropertyValue::Number(1))
                .await,
            Err(ProfileError::MissingAttribute { .. })
        ));
        assert!(writes(&endpoint).is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_bitfield_writes_serialized() {
        let (registry, _) = registry(true);
        let endpoint = MemoryEndpoint::new().with_value(
            ClusterId::PresenceConfig,
            attr::PRESENCE_DETECTION_CONFIG,
            RawValue::UInt(0),
        );

        let (a, b) = tokio::join!(
            registry.set(&endpoint, attr::EDGE_MM_WAVE, PropertyValue::Number(1)),
            registry.set(&endpoint, attr::EDGE_PIR_INTERNAL, PropertyValue::Number(1)),
        );
        a.unwrap();
        b.unwrap();

        assert_eq!(
            endpoint.value(ClusterId::PresenceConfig, attr::PRESENCE_DETECTION_CONFIG),
            Some(RawValue::UInt(0b11))
        );
    }

    #[tokio::test]
    async fn test_concurrent_bitfield_writes_race_without_serialization() {
        let (registry, _) = registry(false);
        let endpoint = MemoryEndpoint::new().with_value(
            ClusterId::PresenceConfig,
            attr::PRESENCE_DETECTION_CONFIG,
            RawValue::UInt(0),
        );

        let (a, b) = tokio::join!(
            registry.set(&endpoint, attr::EDGE_MM_WAVE, PropertyValue::Number(1)),
            registry.set(&endpoint, attr::EDGE_PIR_INTERNAL, PropertyValue::Number(1)),
        );
        a.unwrap();
        b.unwrap();

        let value = endpoint
            .value(ClusterId::PresenceConfig, attr::PRESENCE_DETECTION_CONFIG)
            .and_then(|v| v.as_u32())
            .unwrap();
        assert_eq!(value.count_ones(), 1, "one update is lost");
    }

    #[tokio::test]
    async fn test_command_with_resync() {
        let (registry, sink) = registry(true);
        let endpoint = MemoryEndpoint::new();
        let state = registry
            .set(&endpoint, "factory_reset", "Reset".into())
            .await
            .unwrap();
        assert!(state.is_empty());

        let requests = endpoint.requests();
        assert_eq!(requests.len(), 3);
        assert!(matches!(&requests[0], Request::Command { command, .. } if command == "factory_reset"));
        assert_eq!(
            requests[1],
            Request::Read {
                cluster: ClusterId::PresenceConfig,
                attributes: vec![attr::MIN_DISTANCE.to_string(), attr::MAX_DISTANCE.to_string()],
            }
        );
        assert_eq!(
            sink.events
                .lock()
                .iter()
                .filter(|e| e.contains("re-reading"))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_transport_errors_propagate() {
        let (registry, _) = registry(true);
        let endpoint = MemoryEndpoint::new();
        endpoint.fail_next(TransportError::Unreachable("0x1234".into()));
        let err = registry
            .set(&endpoint, "presence_mode", "Simple".into())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProfileError::Transport(TransportError::Unreachable(_))
        ));
    }

    #[tokio::test]
    async fn test_get_write_only_and_read_back() {
        let (registry, _) = registry(true);
        let endpoint = MemoryEndpoint::new().with_value(
            ClusterId::PresenceConfig,
            attr::MAX_DISTANCE,
            RawValue::UInt(8),
        );
        assert!(matches!(
            registry.get(&endpoint, "factory_reset").await,
            Err(ProfileError::WriteOnly(_))
        ));
        let state = registry.get(&endpoint, "max_distance").await.unwrap();
        assert_eq!(state["max_distance"], PropertyValue::Number(8));
    }

    #[test]
    fn test_register_checks_schema() {
        let (mut registry, _) = registry(true);
        let again = AttributeDescriptor::attribute(
            "presence_mode",
            vendor(attr::PRESENCE_MODE),
            Codec::Numeric(NumericCodec::unbounded()),
        );
        assert!(matches!(
            registry.register(again),
            Err(ProfileError::DuplicateProperty(_))
        ));

        let mut old = CodecRegistry::new(Revision::R6, Arc::new(LogSink));
        let packed = AttributeDescriptor::attribute(
            attr::EDGE_MM_WAVE,
            vendor(attr::PRESENCE_DETECTION_CONFIG),
            Codec::Bitfield(BitfieldCodec::new(&DETECTION, attr::EDGE_MM_WAVE).unwrap()),
        );
        assert!(matches!(
            old.register(packed),
            Err(ProfileError::SchemaMismatch(_))
        ));

        let wrong_layout = AttributeDescriptor::attribute(
            "internals_flag",
            vendor(attr::INTERNALS),
            Codec::Bitfield(BitfieldCodec::new(&DETECTION, attr::EDGE_MM_WAVE).unwrap()),
        );
        assert!(matches!(
            registry.register(wrong_layout),
            Err(ProfileError::InvalidLayout { .. })
        ));
        assert_eq!(presence_config::CLUSTER_ID, ClusterId::PresenceConfig.id());
    }
}
