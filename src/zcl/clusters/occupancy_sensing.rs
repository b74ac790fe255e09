//! OccupancySensing cluster (0x0406).
//!
//! The device reports its fused presence through the standard `occupancy`
//! bitmap and takes the presence timeout through the ultrasonic
//! occupied-to-unoccupied delay attribute.

use super::AttributeDef;
use crate::revision::Feature;
use crate::zcl::{ClusterId, DataType};
use strum::FromRepr;

/// Zigbee Cluster ID for OccupancySensing
pub const CLUSTER_ID: u16 = 0x0406;

/// Bit 0 of the occupancy bitmap: occupied.
pub const OCCUPIED: u32 = 0x01;

/// Attribute IDs of the OccupancySensing cluster used by the device
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u16)]
pub enum OccupancySensingAttribute {
    /// Bitmap8 where bit 0 indicates sensed occupancy
    Occupancy = 0x0000,
    /// Seconds before switching to unoccupied
    UltrasonicOccupiedToUnoccupiedDelay = 0x0020,
}

impl OccupancySensingAttribute {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Occupancy => "occupancy",
            Self::UltrasonicOccupiedToUnoccupiedDelay => "ultrasonicOToUDelay",
        }
    }
}

pub const OCCUPANCY: &str = OccupancySensingAttribute::Occupancy.name();
pub const OCCUPIED_TO_UNOCCUPIED_DELAY: &str =
    OccupancySensingAttribute::UltrasonicOccupiedToUnoccupiedDelay.name();

pub const ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::new(
        ClusterId::OccupancySensing,
        OCCUPANCY,
        OccupancySensingAttribute::Occupancy as u16,
        DataType::Bitmap8,
        Feature::Core,
    ),
    AttributeDef::new(
        ClusterId::OccupancySensing,
        OCCUPIED_TO_UNOCCUPIED_DELAY,
        OccupancySensingAttribute::UltrasonicOccupiedToUnoccupiedDelay as u16,
        DataType::Uint16,
        Feature::Core,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_repr() {
        assert_eq!(
            OccupancySensingAttribute::from_repr(0x0020),
            Some(OccupancySensingAttribute::UltrasonicOccupiedToUnoccupiedDelay)
        );
        assert_eq!(OccupancySensingAttribute::from_repr(0x0001), None);
    }
}
