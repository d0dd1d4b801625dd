use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{Addressable, Condition};
use super::delivery::DeliverySpec;

/// Spec for a channel backed by a Kafka topic.
///
/// Numeric fields use zero and the retention duration uses the empty string to
/// mean "unset"; the admission defaulter replaces those sentinels.
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "messaging.knative.dev",
    version = "v1beta1",
    kind = "KafkaChannel",
    namespaced,
    status = "KafkaChannelStatus",
    shortname = "kc",
    category = "all",
    category = "knative",
    category = "messaging",
    category = "channel",
    derive = "Default",
    derive = "PartialEq",
    printcolumn = r#"{"name":"Partitions","type":"integer","jsonPath":".spec.numPartitions"}"#,
    printcolumn = r#"{"name":"RF","type":"integer","jsonPath":".spec.replicationFactor"}"#,
    printcolumn = r#"{"name":"Retention","type":"string","jsonPath":".spec.retentionDuration"}"#,
    printcolumn = r#"{"name":"URL","type":"string","jsonPath":".status.address.url"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct KafkaChannelSpec {
    /// Number of partitions of the backing topic.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub num_partitions: i32,

    /// Replication factor of the backing topic.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub replication_factor: i32,

    /// Topic retention as an ISO-8601 duration (e.g. "P1D").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub retention_duration: String,

    /// Channel-wide delivery policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliverySpec>,

    /// Subscriptions currently attached to the channel.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subscribers: Vec<SubscriberSpec>,
}

fn is_zero(v: &i32) -> bool {
    *v == 0
}

/// A single subscriber as recorded on the channel by the subscription controller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliverySpec>,
}

/// Status for KafkaChannel.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KafkaChannelStatus {
    /// Last observed generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    /// Where the channel accepts events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Addressable>,

    /// Status conditions.
    #[serde(default)]
    pub conditions: Vec<Condition>,
}
