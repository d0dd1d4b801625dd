//! Generate CRD YAML for KafkaChannel

use kube::CustomResourceExt;

use kafka_channel::KafkaChannel;

fn main() -> anyhow::Result<()> {
    let crd = KafkaChannel::crd();
    print!("{}", serde_yaml::to_string(&crd)?);
    Ok(())
}
