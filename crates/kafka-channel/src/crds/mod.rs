pub mod channel;
pub mod common;
pub mod delivery;

pub use channel::{KafkaChannel, KafkaChannelSpec, KafkaChannelStatus, SubscriberSpec};
pub use common::{Addressable, Condition};
pub use delivery::{BackoffPolicy, DeliverySpec, Destination, KReference};
