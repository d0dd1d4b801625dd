//! KafkaChannel admission defaulting.
//!
//! Declares the `KafkaChannel` custom resource and fills unset spec fields
//! from a read-only defaults table before the resource is persisted.

pub mod admission;
pub mod config;
pub mod constants;
pub mod crds;
pub mod defaulting;
pub mod error;
pub mod telemetry;

pub use config::ChannelDefaults;
pub use crds::{KafkaChannel, KafkaChannelSpec, KafkaChannelStatus};
pub use defaulting::{Defaultable, DefaultingContext};
pub use error::{Error, Result};
