/// Annotation keys understood by the eventing control plane.
pub mod annotations {
    /// Marks which subscribable duck-type contract the channel implements.
    pub const SUBSCRIBABLE: &str = "messaging.knative.dev/subscribable";

    /// The only subscribable contract version KafkaChannel advertises.
    pub const SUBSCRIBABLE_V1: &str = "v1";
}

/// Built-in defaults applied when neither config nor the resource supplies a value.
pub mod defaults {
    pub const NUM_PARTITIONS: i32 = 1;
    pub const REPLICATION_FACTOR: i32 = 1;

    /// Seven days.
    pub const RETENTION_DURATION: &str = "PT168H";
}

/// Environment variables that override the defaults table at startup.
pub mod env {
    pub const NUM_PARTITIONS: &str = "KAFKA_CHANNEL_DEFAULT_NUM_PARTITIONS";
    pub const REPLICATION_FACTOR: &str = "KAFKA_CHANNEL_DEFAULT_REPLICATION_FACTOR";
    pub const RETENTION_DURATION: &str = "KAFKA_CHANNEL_DEFAULT_RETENTION_DURATION";
}

/// CRD API group.
pub const API_GROUP: &str = "messaging.knative.dev";

/// CRD API version.
pub const API_VERSION: &str = "v1beta1";
