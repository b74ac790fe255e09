//! In-memory [`Endpoint`] used for dry runs and tests.
//!
//! Holds attribute values the way the device would, answers reads from them,
//! applies writes to them and records every request in order.

use super::clusters::on_off::{self, OnOffCommand};
use super::{
    AttributeWrite, ClusterId, CommandParams, Endpoint, RawValue, Report, ReportingConfig,
    TransportError, WriteValue,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;

/// A request as seen by the endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum Request {
    Read {
        cluster: ClusterId,
        attributes: Vec<String>,
    },
    Write {
        cluster: ClusterId,
        write: AttributeWrite,
    },
    Command {
        cluster: ClusterId,
        command: String,
        params: CommandParams,
    },
    Bind {
        clusters: Vec<ClusterId>,
    },
    ConfigureReporting {
        cluster: ClusterId,
        items: Vec<ReportingConfig>,
    },
}

#[derive(Default)]
pub struct MemoryEndpoint {
    values: Mutex<BTreeMap<(ClusterId, String), RawValue>>,
    requests: Mutex<Vec<Request>>,
    failure: Mutex<Option<TransportError>>,
}

impl MemoryEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed attribute values from a report.
    pub fn with_report(self, report: &Report) -> Self {
        self.apply_report(report);
        self
    }

    pub fn with_value(self, cluster: ClusterId, attribute: &str, value: RawValue) -> Self {
        self.set_value(cluster, attribute, value);
        self
    }

    pub fn apply_report(&self, report: &Report) {
        let mut values = self.values.lock();
        for (name, value) in &report.data {
            values.insert((report.cluster, name.clone()), value.clone());
        }
    }

    pub fn set_value(&self, cluster: ClusterId, attribute: &str, value: RawValue) {
        self.values
            .lock()
            .insert((cluster, attribute.to_string()), value);
    }

    pub fn value(&self, cluster: ClusterId, attribute: &str) -> Option<RawValue> {
        self.values
            .lock()
            .get(&(cluster, attribute.to_string()))
            .cloned()
    }

    /// Make the next request fail with `error`.
    pub fn fail_next(&self, error: TransportError) {
        *self.failure.lock() = Some(error);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    fn record(&self, request: Request) -> Result<(), TransportError> {
        self.requests.lock().push(request);
        match self.failure.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Endpoint for MemoryEndpoint {
    async fn read(&self, cluster: ClusterId, attributes: &[&str]) -> Result<Report, TransportError> {
        self.record(Request::Read {
            cluster,
            attributes: attributes.iter().map(|a| a.to_string()).collect(),
        })?;

        let mut report = Report::new(cluster);
        {
            let values = self.values.lock();
            for name in attributes {
                if let Some(value) = values.get(&(cluster, name.to_string())) {
                    report.data.insert(name.to_string(), value.clone());
                }
            }
        }

        // A real round trip suspends here; other requests may run in between.
        tokio::task::yield_now().await;
        Ok(report)
    }

    async fn write(&self, cluster: ClusterId, write: AttributeWrite) -> Result<(), TransportError> {
        self.record(Request::Write {
            cluster,
            write: write.clone(),
        })?;

        let value = match write.value {
            WriteValue::Plain(raw) => raw,
            WriteValue::Typed { value, .. } => RawValue::Bytes(value),
        };
        self.set_value(cluster, &write.attribute, value);
        Ok(())
    }

    async fn command(
        &self,
        cluster: ClusterId,
        command: &str,
        params: CommandParams,
    ) -> Result<(), TransportError> {
        self.record(Request::Command {
            cluster,
            command: command.to_string(),
            params,
        })?;

        if cluster == ClusterId::OnOff {
            if command == OnOffCommand::On.name() {
                self.set_value(cluster, on_off::ON_OFF, RawValue::Bool(true));
            } else if command == OnOffCommand::Off.name() {
                self.set_value(cluster, on_off::ON_OFF, RawValue::Bool(false));
            }
        }
        Ok(())
    }

    async fn bind(&self, clusters: &[ClusterId]) -> Result<(), TransportError> {
        self.record(Request::Bind {
            clusters: clusters.to_vec(),
        })
    }

    async fn configure_reporting(
        &self,
        cluster: ClusterId,
        items: &[ReportingConfig],
    ) -> Result<(), TransportError> {
        self.record(Request::ConfigureReporting {
            cluster,
            items: items.to_vec(),
        })
    }
}
