//! Admission-time defaulting for KafkaChannel.
//!
//! Defaulting is total: every input, however incomplete, has a defaulted
//! output, so nothing here returns an error. Explicitly set values are never
//! overwritten, including ones validation would later reject.

use std::sync::Arc;

use kube::ResourceExt;
use tracing::debug;

use crate::config::ChannelDefaults;
use crate::constants::annotations;
use crate::crds::KafkaChannel;

/// Per-request defaulting context.
///
/// Carries the defaults table for the process. Cloning is cheap; the table is
/// shared and never mutated.
#[derive(Clone, Debug, Default)]
pub struct DefaultingContext {
    defaults: Arc<ChannelDefaults>,
}

impl DefaultingContext {
    pub fn new(defaults: ChannelDefaults) -> Self {
        Self {
            defaults: Arc::new(defaults),
        }
    }

    pub fn defaults(&self) -> &ChannelDefaults {
        &self.defaults
    }
}

impl From<Arc<ChannelDefaults>> for DefaultingContext {
    fn from(defaults: Arc<ChannelDefaults>) -> Self {
        Self { defaults }
    }
}

/// Resources that can fill in their own unset fields.
pub trait Defaultable {
    /// Mutate `self` in place so every unset field carries its default.
    fn set_defaults(&mut self, ctx: &DefaultingContext);
}

impl Defaultable for KafkaChannel {
    fn set_defaults(&mut self, ctx: &DefaultingContext) {
        self.annotations_mut().insert(
            annotations::SUBSCRIBABLE.to_string(),
            annotations::SUBSCRIBABLE_V1.to_string(),
        );

        let defaults = ctx.defaults();
        let namespace = self.metadata.namespace.clone().unwrap_or_default();
        let name = self.metadata.name.as_deref().unwrap_or_default();
        let spec = &mut self.spec;

        if spec.num_partitions == 0 {
            debug!(channel = %name, value = defaults.num_partitions, "Defaulting numPartitions");
            spec.num_partitions = defaults.num_partitions;
        }

        if spec.replication_factor == 0 {
            debug!(channel = %name, value = defaults.replication_factor, "Defaulting replicationFactor");
            spec.replication_factor = defaults.replication_factor;
        }

        if spec.retention_duration.is_empty() {
            debug!(channel = %name, value = %defaults.retention_duration, "Defaulting retentionDuration");
            spec.retention_duration = defaults.retention_duration.clone();
        }

        // Cross-namespace dead-letter sinks are legal; only fill an empty namespace.
        if let Some(reference) = spec.delivery.as_mut().and_then(|d| d.dead_letter_ref_mut()) {
            if reference.namespace.is_empty() {
                debug!(channel = %name, namespace = %namespace, "Defaulting deadLetterSink ref namespace");
                reference.namespace = namespace;
            }
        }
    }
}

impl KafkaChannel {
    /// Return a defaulted copy, leaving `self` untouched.
    pub fn defaulted(&self, ctx: &DefaultingContext) -> Self {
        let mut channel = self.clone();
        channel.set_defaults(ctx);
        channel
    }
}
