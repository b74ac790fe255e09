//! Logging sink injected into the registry.

use crate::codec::PropertyValue;
use crate::zcl::ClusterId;
use log::{debug, info};
use std::fmt;
use std::time::Duration;

/// Something the registry did worth recording.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecEvent<'a> {
    Decoded {
        property: &'a str,
        value: &'a PropertyValue,
    },
    /// Attribute present in a report but not decodable (unknown enum value,
    /// wrong buffer length, wrong shape).
    Skipped {
        property: &'a str,
        attribute: &'a str,
    },
    WriteIssued {
        property: &'a str,
        cluster: ClusterId,
        attribute: &'a str,
    },
    CommandInvoked {
        property: &'a str,
        cluster: ClusterId,
        command: &'a str,
    },
    ResyncScheduled {
        property: &'a str,
        settle: Duration,
        reads: usize,
    },
}

impl fmt::Display for CodecEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecEvent::Decoded { property, value } => write!(f, "{property} = {value:?}"),
            CodecEvent::Skipped {
                property,
                attribute,
            } => write!(f, "{property}: skipped undecodable {attribute}"),
            CodecEvent::WriteIssued {
                property,
                cluster,
                attribute,
            } => write!(f, "{property}: write {cluster}.{attribute}"),
            CodecEvent::CommandInvoked {
                property,
                cluster,
                command,
            } => write!(f, "{property}: command {cluster}.{command}"),
            CodecEvent::ResyncScheduled {
                property,
                settle,
                reads,
            } => write!(
                f,
                "{property}: re-reading {reads} batches after {}ms",
                settle.as_millis()
            ),
        }
    }
}

pub trait CodecSink: Send + Sync {
    fn record(&self, event: CodecEvent<'_>);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl CodecSink for LogSink {
    fn record(&self, event: CodecEvent<'_>) {
        match event {
            CodecEvent::Decoded { .. } | CodecEvent::Skipped { .. } => {
                debug!("[Codec] {}", event)
            }
            _ => info!("[Codec] {}", event),
        }
    }
}

/// Keeps rendered events in memory.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub events: parking_lot::Mutex<Vec<String>>,
}

#[cfg(test)]
impl CodecSink for RecordingSink {
    fn record(&self, event: CodecEvent<'_>) {
        self.events.lock().push(event.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_rendering() {
        let event = CodecEvent::WriteIssued {
            property: "presence_mode",
            cluster: ClusterId::PresenceConfig,
            attribute: "presence_mode",
        };
        assert_eq!(
            event.to_string(),
            "presence_mode: write customOccupationConfig.presence_mode"
        );

        let event = CodecEvent::ResyncScheduled {
            property: "factory_reset",
            settle: Duration::from_secs(5),
            reads: 3,
        };
        assert_eq!(
            event.to_string(),
            "factory_reset: re-reading 3 batches after 5000ms"
        );
    }
}
