//! Presence-NG device profile.
//!
//! This library maps the Zigbee attributes and commands of the Presence-NG
//! mmWave/PIR sensor onto named application properties, for every firmware
//! revision the device has shipped with.

pub mod codec;
pub mod config;
pub mod error;
pub mod profile;
pub mod registry;
pub mod revision;
pub mod zcl;

pub use error::{ProfileError, Result};
pub use profile::PresenceProfile;
pub use registry::CodecRegistry;
pub use revision::Revision;
