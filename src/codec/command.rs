//! Stateless action triggers mapped onto vendor cluster commands.

use super::PropertyValue;
use crate::error::{ProfileError, Result};
use crate::zcl::{ClusterId, CommandParams, RawValue};
use serde::Serialize;
use std::time::Duration;

/// One `read(cluster, attributes)` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ReadBatch {
    pub cluster: ClusterId,
    pub attributes: &'static [&'static str],
}

/// Re-read scheduled after a command that reboots the radar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resync {
    pub settle: Duration,
    pub batch: &'static [ReadBatch],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandPayload {
    None,
    /// One boolean parameter with a fixed value.
    Switch { param: &'static str, on: bool },
}

/// Property that fires `command` on the device when set to one of `labels`.
#[derive(Clone, Debug)]
pub struct CommandCodec {
    pub cluster: ClusterId,
    pub command: &'static str,
    pub labels: &'static [&'static str],
    pub payload: CommandPayload,
    pub resync: Option<Resync>,
}

impl CommandCodec {
    pub const fn new(
        cluster: ClusterId,
        command: &'static str,
        labels: &'static [&'static str],
    ) -> Self {
        Self {
            cluster,
            command,
            labels,
            payload: CommandPayload::None,
            resync: None,
        }
    }

    pub const fn with_switch(mut self, param: &'static str, on: bool) -> Self {
        self.payload = CommandPayload::Switch { param, on };
        self
    }

    pub const fn with_resync(mut self, resync: Resync) -> Self {
        self.resync = Some(resync);
        self
    }

    pub fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        if let CommandPayload::Switch { param, on } = self.payload {
            params.insert(param.to_string(), RawValue::Bool(on));
        }
        params
    }

    /// Validate the trigger value. Anything outside `labels` is rejected.
    pub fn accept(&self, property: &str, value: &PropertyValue) -> Result<()> {
        match value.as_text() {
            Some(label) if self.labels.iter().any(|l| *l == label) => Ok(()),
            Some(label) => Err(ProfileError::UnknownLabel {
                property: property.to_string(),
                label: label.to_string(),
            }),
            None => Err(ProfileError::InvalidValue {
                property: property.to_string(),
                expected: "a trigger label",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_payload_follows_property() {
        let on = CommandCodec::new(ClusterId::PresenceConfig, "switch_bluetooth", &["On"])
            .with_switch("on", true);
        let off = CommandCodec::new(ClusterId::PresenceConfig, "switch_bluetooth", &["Off"])
            .with_switch("on", false);
        assert_eq!(on.params().get("on"), Some(&RawValue::Bool(true)));
        assert_eq!(off.params().get("on"), Some(&RawValue::Bool(false)));
    }

    #[test]
    fn test_accept() {
        let codec = CommandCodec::new(ClusterId::PresenceConfig, "restart", &["Restart"]);
        assert!(codec.accept("restart", &"Restart".into()).is_ok());
        assert!(matches!(
            codec.accept("restart", &"Reset".into()),
            Err(ProfileError::UnknownLabel { .. })
        ));
        assert!(codec.params().is_empty());
    }
}
