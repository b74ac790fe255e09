//! Presence-NG device profile.
//!
//! Builds the [`CodecRegistry`] for one firmware revision and runs the
//! one-time configuration sequence against a freshly joined device.

use crate::config::ProfileConfig;
use crate::error::Result;
use crate::registry::{CodecRegistry, CodecSink};
use crate::revision::Revision;
use crate::zcl::Endpoint;
use log::{debug, info};
use std::sync::Arc;

pub mod entries;
pub mod layouts;
pub mod reporting;

pub const MODEL: &str = "Presence-NG";
pub const VENDOR: &str = "Orlangur";

pub struct PresenceProfile {
    registry: CodecRegistry,
}

impl PresenceProfile {
    pub fn build(config: &ProfileConfig, sink: Arc<dyn CodecSink>) -> Result<Self> {
        let mut registry = CodecRegistry::new(config.revision, sink)
            .with_serialized_writes(config.serialize_bitfield_writes);

        for entry in entries::entries(config.revision, config.factory_reset_settle())? {
            registry.register(entry)?;
        }

        debug!(
            "[Profile] {} {}: {} properties",
            MODEL,
            config.revision,
            registry.len()
        );
        Ok(Self { registry })
    }

    pub fn revision(&self) -> Revision {
        self.registry.revision()
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// Bind, read initial state, set up reporting, read the restart counter.
    ///
    /// Stops at the first failed request.
    pub async fn configure(&self, endpoint: &dyn Endpoint) -> Result<()> {
        let revision = self.revision();
        info!("[Profile] Configuring {} ({})", MODEL, revision);

        let clusters = reporting::bind_clusters(revision);
        endpoint.bind(&clusters).await?;

        for read in reporting::initial_reads(revision) {
            endpoint.read(read.cluster, &read.attributes).await?;
        }

        for (cluster, items) in reporting::reporting(revision) {
            debug!(
                "[Profile] Reporting for {}: {} attributes",
                cluster,
                items.len()
            );
            endpoint.configure_reporting(cluster, &items).await?;
        }

        if let Some(read) = reporting::final_read(revision) {
            endpoint.read(read.cluster, &read.attributes).await?;
        }

        info!("[Profile] {} configured", MODEL);
        Ok(())
    }
}
