//! Property-based tests for KafkaChannel defaulting.
//!
//! These verify the defaulting invariants for arbitrary, possibly partial,
//! channels including explicit values validation would reject.

use std::collections::BTreeMap;

use kafka_channel::crds::{DeliverySpec, Destination, KReference, KafkaChannelSpec};
use kafka_channel::{ChannelDefaults, Defaultable, DefaultingContext, KafkaChannel};
use proptest::prelude::*;

const SUBSCRIBABLE: &str = "messaging.knative.dev/subscribable";

fn namespace() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,15}"
}

/// Mostly zero so the unset path is exercised as often as the set one.
fn count() -> impl Strategy<Value = i32> {
    prop_oneof![Just(0), any::<i32>()]
}

fn retention() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "P[0-9]{1,3}D", "PT[0-9]{1,4}H"]
}

fn reference() -> impl Strategy<Value = KReference> {
    (prop_oneof![Just(String::new()), namespace()], "[a-z]{1,8}").prop_map(|(namespace, name)| {
        KReference {
            api_version: "serving.knative.dev/v1".into(),
            kind: "Service".into(),
            name,
            namespace,
        }
    })
}

/// Every level of delivery -> deadLetterSink -> ref may be missing.
fn delivery() -> impl Strategy<Value = Option<DeliverySpec>> {
    prop::option::of(prop::option::of(prop::option::of(reference()))).prop_map(|delivery| {
        delivery.map(|sink| DeliverySpec {
            dead_letter_sink: sink.map(|reference| Destination {
                reference,
                uri: None,
            }),
            ..Default::default()
        })
    })
}

fn annotations() -> impl Strategy<Value = Option<BTreeMap<String, String>>> {
    prop::option::of(prop::collection::btree_map(
        prop_oneof![Just(SUBSCRIBABLE.to_string()), "[a-z.]{1,12}/[a-z]{1,8}"],
        "[a-z0-9]{0,8}",
        0..4,
    ))
}

fn channel() -> impl Strategy<Value = KafkaChannel> {
    (
        prop::option::of(namespace()),
        annotations(),
        count(),
        count(),
        retention(),
        delivery(),
    )
        .prop_map(
            |(namespace, annotations, num_partitions, replication_factor, retention_duration, delivery)| {
                let mut channel = KafkaChannel::new(
                    "ch",
                    KafkaChannelSpec {
                        num_partitions,
                        replication_factor,
                        retention_duration,
                        delivery,
                        ..Default::default()
                    },
                );
                channel.metadata.namespace = namespace;
                channel.metadata.annotations = annotations;
                channel
            },
        )
}

fn dead_letter_ref(channel: &KafkaChannel) -> Option<&KReference> {
    channel.spec.delivery.as_ref()?.dead_letter_ref()
}

proptest! {
    /// INVARIANT: defaulting twice equals defaulting once.
    #[test]
    fn prop_idempotent(initial in channel()) {
        let ctx = DefaultingContext::default();
        let once = initial.defaulted(&ctx);
        let twice = once.defaulted(&ctx);
        prop_assert_eq!(once, twice);
    }

    /// INVARIANT: the subscribable annotation is always v1 and other
    /// annotations survive untouched.
    #[test]
    fn prop_subscribable_annotation(initial in channel()) {
        let after = initial.defaulted(&DefaultingContext::default());
        let annotations = after.metadata.annotations.as_ref().expect("annotations must exist");
        prop_assert_eq!(annotations.get(SUBSCRIBABLE).map(String::as_str), Some("v1"));

        for (key, value) in initial.metadata.annotations.iter().flatten() {
            if key != SUBSCRIBABLE {
                prop_assert_eq!(annotations.get(key), Some(value));
            }
        }
    }

    /// INVARIANT: set fields keep their value; unset fields take the table value.
    #[test]
    fn prop_fill_only(initial in channel()) {
        let table = ChannelDefaults::builtin();
        let after = initial.defaulted(&DefaultingContext::new(table.clone()));
        let (before, after) = (&initial.spec, &after.spec);

        if before.num_partitions == 0 {
            prop_assert_eq!(after.num_partitions, table.num_partitions);
        } else {
            prop_assert_eq!(after.num_partitions, before.num_partitions);
        }

        if before.replication_factor == 0 {
            prop_assert_eq!(after.replication_factor, table.replication_factor);
        } else {
            prop_assert_eq!(after.replication_factor, before.replication_factor);
        }

        if before.retention_duration.is_empty() {
            prop_assert_eq!(&after.retention_duration, &table.retention_duration);
        } else {
            prop_assert_eq!(&after.retention_duration, &before.retention_duration);
        }

        prop_assert_eq!(&after.subscribers, &before.subscribers);
    }

    /// INVARIANT: only an empty dead-letter ref namespace is filled, and only
    /// with the channel's own namespace.
    #[test]
    fn prop_dead_letter_namespace_scope(initial in channel()) {
        let after = initial.defaulted(&DefaultingContext::default());

        match (dead_letter_ref(&initial), dead_letter_ref(&after)) {
            (None, None) => {}
            (Some(before), Some(after_ref)) => {
                prop_assert_eq!(&after_ref.name, &before.name);
                prop_assert_eq!(&after_ref.kind, &before.kind);
                prop_assert_eq!(&after_ref.api_version, &before.api_version);
                if before.namespace.is_empty() {
                    let own = initial.metadata.namespace.clone().unwrap_or_default();
                    prop_assert_eq!(&after_ref.namespace, &own);
                } else {
                    prop_assert_eq!(&after_ref.namespace, &before.namespace);
                }
            }
            (before, after_ref) => {
                prop_assert!(false, "ref presence changed: {:?} -> {:?}", before, after_ref);
            }
        }

        // Nothing outside the ref namespace moves within delivery.
        let strip = |c: &KafkaChannel| {
            let mut d = c.spec.delivery.clone();
            if let Some(r) = d.as_mut().and_then(|d| d.dead_letter_ref_mut()) {
                r.namespace.clear();
            }
            d
        };
        prop_assert_eq!(strip(&initial), strip(&after));
    }

    /// INVARIANT: metadata other than annotations is never touched.
    #[test]
    fn prop_metadata_untouched(initial in channel()) {
        let after = initial.defaulted(&DefaultingContext::default());
        prop_assert_eq!(&after.metadata.name, &initial.metadata.name);
        prop_assert_eq!(&after.metadata.namespace, &initial.metadata.namespace);
        prop_assert_eq!(&after.status, &initial.status);
    }
}

#[test]
fn test_empty_resource_gets_every_default() {
    let mut channel = KafkaChannel::default();
    channel.set_defaults(&DefaultingContext::default());

    assert_eq!(channel.spec.num_partitions, 1);
    assert_eq!(channel.spec.replication_factor, 1);
    assert_eq!(channel.spec.retention_duration, "PT168H");
    assert_eq!(
        channel.metadata.annotations,
        Some(BTreeMap::from([(SUBSCRIBABLE.to_string(), "v1".to_string())]))
    );
}

#[test]
fn test_only_num_partitions_unset() {
    let mut channel = KafkaChannel::new(
        "ch",
        KafkaChannelSpec {
            replication_factor: 5,
            retention_duration: "P1D".into(),
            ..Default::default()
        },
    );
    channel.set_defaults(&DefaultingContext::default());

    assert_eq!(channel.spec.num_partitions, 1);
    assert_eq!(channel.spec.replication_factor, 5);
    assert_eq!(channel.spec.retention_duration, "P1D");
}
