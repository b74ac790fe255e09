//! Reads and reporting setup issued while configuring the device.

use crate::codec::ReadBatch;
use crate::revision::Revision;
use crate::zcl::clusters::presence_config::attr;
use crate::zcl::clusters::{self, occupancy_sensing, on_off};
use crate::zcl::{ClusterId, ReportingConfig};

/// Re-read after `factory_reset`, once the radar has rebooted.
pub static FACTORY_RESET_RESYNC: &[ReadBatch] = &[
    ReadBatch {
        cluster: ClusterId::OccupancySensing,
        attributes: &[
            occupancy_sensing::OCCUPANCY,
            occupancy_sensing::OCCUPIED_TO_UNOCCUPIED_DELAY,
        ],
    },
    ReadBatch {
        cluster: ClusterId::PresenceConfig,
        attributes: &[attr::STILL_SENSITIVITY, attr::MOVE_SENSITIVITY, attr::STATE],
    },
    ReadBatch {
        cluster: ClusterId::PresenceConfig,
        attributes: &[attr::MIN_DISTANCE, attr::MAX_DISTANCE],
    },
];

const INITIAL_READS: &[ReadBatch] = &[
    ReadBatch {
        cluster: ClusterId::PresenceConfig,
        attributes: &[attr::PRESENCE_MODE, attr::PIR_PRESENCE],
    },
    ReadBatch {
        cluster: ClusterId::OccupancySensing,
        attributes: &[
            occupancy_sensing::OCCUPANCY,
            occupancy_sensing::OCCUPIED_TO_UNOCCUPIED_DELAY,
        ],
    },
    ReadBatch {
        cluster: ClusterId::PresenceConfig,
        attributes: &[attr::MIN_DISTANCE, attr::MAX_DISTANCE],
    },
    ReadBatch {
        cluster: ClusterId::PresenceConfig,
        attributes: &[
            attr::ILLUMINANCE_THRESHOLD,
            attr::ON_OFF_TIMEOUT,
            attr::ON_OFF_MODE,
        ],
    },
    ReadBatch {
        cluster: ClusterId::PresenceConfig,
        attributes: &[attr::STILL_SENSITIVITY, attr::MOVE_SENSITIVITY, attr::STATE],
    },
    ReadBatch {
        cluster: ClusterId::PresenceConfig,
        attributes: &[
            attr::FAILURE_STATUS,
            attr::INTERNALS,
            attr::INTERNALS2,
            attr::INTERNALS3,
        ],
    },
    ReadBatch {
        cluster: ClusterId::PresenceConfig,
        attributes: &[
            attr::PRESENCE_DETECTION_CONFIG,
            attr::ARMED_FOR_TRIGGER,
            attr::DISTANCE_RESOLUTION,
        ],
    },
];

/// Read once reporting is in place.
pub const FINAL_READ: ReadBatch = ReadBatch {
    cluster: ClusterId::PresenceConfig,
    attributes: &[attr::RESTARTS_COUNT],
};

const REPORTING: &[(ClusterId, &[ReportingConfig])] = &[
    (
        ClusterId::OccupancySensing,
        &[ReportingConfig::on_change(occupancy_sensing::OCCUPANCY)],
    ),
    (
        ClusterId::OnOff,
        &[ReportingConfig::with_change(on_off::ON_OFF, 0, 1)],
    ),
    (
        ClusterId::PresenceConfig,
        &[
            ReportingConfig::with_change(attr::MEASURED_LIGHT, 30, 10),
            ReportingConfig::on_change(attr::EX_STATE),
            ReportingConfig::on_change(attr::PRESENCE_MODE),
            ReportingConfig::on_change(attr::PIR_PRESENCE),
        ],
    ),
    (
        ClusterId::PresenceConfig,
        &[
            ReportingConfig::on_change(attr::FAILURE_STATUS),
            ReportingConfig::on_change(attr::INTERNALS),
            ReportingConfig::on_change(attr::INTERNALS2),
            ReportingConfig::on_change(attr::INTERNALS3),
            ReportingConfig::on_change(attr::ARMED_FOR_TRIGGER),
        ],
    ),
];

/// Clusters bound to the coordinator: those the revision declares.
pub fn bind_clusters(revision: Revision) -> Vec<ClusterId> {
    [
        ClusterId::OccupancySensing,
        ClusterId::PresenceConfig,
        ClusterId::OnOff,
    ]
    .into_iter()
    .filter(|cluster| clusters::attributes(revision).any(|a| a.cluster == *cluster))
    .collect()
}

fn declared(revision: Revision, cluster: ClusterId, attribute: &str) -> bool {
    clusters::find_attribute(cluster, attribute, revision).is_some()
}

/// A read request with the attributes `revision` lacks removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadRequest {
    pub cluster: ClusterId,
    pub attributes: Vec<&'static str>,
}

fn trim(revision: Revision, batch: &ReadBatch) -> Option<ReadRequest> {
    let attributes: Vec<&'static str> = batch
        .attributes
        .iter()
        .copied()
        .filter(|a| declared(revision, batch.cluster, a))
        .collect();
    (!attributes.is_empty()).then_some(ReadRequest {
        cluster: batch.cluster,
        attributes,
    })
}

pub fn initial_reads(revision: Revision) -> Vec<ReadRequest> {
    INITIAL_READS
        .iter()
        .filter_map(|batch| trim(revision, batch))
        .collect()
}

pub fn final_read(revision: Revision) -> Option<ReadRequest> {
    trim(revision, &FINAL_READ)
}

/// `configureReporting` requests, in issue order.
pub fn reporting(revision: Revision) -> Vec<(ClusterId, Vec<ReportingConfig>)> {
    REPORTING
        .iter()
        .filter_map(|(cluster, items)| {
            let items: Vec<ReportingConfig> = items
                .iter()
                .filter(|item| declared(revision, *cluster, item.attribute))
                .cloned()
                .collect();
            (!items.is_empty()).then_some((*cluster, items))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zcl::REPORT_INTERVAL_HOUR;

    #[test]
    fn test_resync_batch_is_declared_everywhere() {
        for revision in [Revision::R1, Revision::R4, Revision::R8] {
            for batch in FACTORY_RESET_RESYNC {
                assert_eq!(trim(revision, batch).unwrap().attributes, batch.attributes);
            }
        }
    }

    #[test]
    fn test_reporting_latest() {
        let batches = reporting(Revision::R8);
        assert_eq!(batches.len(), 4);

        let light = &batches[2].1[0];
        assert_eq!(light.attribute, attr::MEASURED_LIGHT);
        assert_eq!(light.min_interval, 30);
        assert_eq!(light.reportable_change, Some(10));

        assert_eq!(batches[1].1[0].reportable_change, Some(1));
        assert!(
            batches
                .iter()
                .flat_map(|(_, items)| items)
                .all(|item| item.max_interval == REPORT_INTERVAL_HOUR)
        );
        assert_eq!(batches[3].1.len(), 5);
    }

    #[test]
    fn test_reporting_filtered_by_revision() {
        let batches = reporting(Revision::R1);
        let attributes: Vec<_> = batches
            .iter()
            .flat_map(|(_, items)| items.iter().map(|i| i.attribute))
            .collect();
        assert_eq!(
            attributes,
            vec![
                occupancy_sensing::OCCUPANCY,
                attr::EX_STATE,
                attr::PRESENCE_MODE
            ]
        );

        let r6: Vec<_> = reporting(Revision::R6)
            .into_iter()
            .flat_map(|(_, items)| items)
            .map(|i| i.attribute)
            .collect();
        assert!(r6.contains(&attr::INTERNALS2));
        assert!(!r6.contains(&attr::INTERNALS3));
        assert!(!r6.contains(&attr::ARMED_FOR_TRIGGER));
    }

    #[test]
    fn test_bind_and_reads() {
        assert_eq!(
            bind_clusters(Revision::R2),
            vec![ClusterId::OccupancySensing, ClusterId::PresenceConfig]
        );
        assert_eq!(bind_clusters(Revision::R8).len(), 3);

        let reads = initial_reads(Revision::R1);
        assert_eq!(reads[0].attributes, vec![attr::PRESENCE_MODE]);
        assert!(reads.iter().all(|r| !r.attributes.contains(&attr::INTERNALS)));
        assert!(final_read(Revision::R4).is_none());
        assert!(final_read(Revision::R5).is_some());
    }
}
