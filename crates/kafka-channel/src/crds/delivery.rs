use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Delivery policy for events that a subscriber fails to accept.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySpec {
    /// Where undeliverable events are sent after retries are exhausted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dead_letter_sink: Option<Destination>,

    /// Minimum number of retries before an event is dead-lettered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<i32>,

    /// Retry backoff policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backoff_policy: Option<BackoffPolicy>,

    /// Base delay between retries as an ISO-8601 duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backoff_delay: Option<String>,
}

impl DeliverySpec {
    /// The object reference of the dead-letter sink, if every level is present.
    pub fn dead_letter_ref(&self) -> Option<&KReference> {
        self.dead_letter_sink.as_ref()?.reference.as_ref()
    }

    pub fn dead_letter_ref_mut(&mut self) -> Option<&mut KReference> {
        self.dead_letter_sink.as_mut()?.reference.as_mut()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BackoffPolicy {
    Linear,
    Exponential,
}

/// An addressable target, either an object reference, a URI, or both.
///
/// When both are set the URI is resolved relative to the referenced object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Destination {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<KReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Reference to a Kubernetes object by kind, name and (optionally) namespace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KReference {
    pub api_version: String,

    pub kind: String,

    pub name: String,

    /// Empty means "same namespace as the referring object".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}
