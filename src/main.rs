use sonotab::core::{Buffer, Extent3, Image, ImageProperties, Message, ProcessingNode};
use sonotab::engine::{spawn_node, BackpressurePolicy};
use sonotab::nodes::{ConvertTransform, SradNode};
use sonotab::observability::{MetricsCollector, PipelineMonitor};
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = serde_json::json!({
        "numberIterations": 50,
        "lambda": 0.8,
        "outputType": "uint8"
    });

    let node = Arc::new(SradNode::from_json(
        "srad",
        BackpressurePolicy::Queueing,
        ConvertTransform,
        &config,
    )?);
    log::info!("Built node '{}' with {:?}", node.id(), node.config());

    let mut collector = MetricsCollector::new();
    collector.register(node.metrics());

    let (in_tx, in_rx) = mpsc::channel(8);
    let (out_tx, mut out_rx) = mpsc::channel(8);
    let driver = spawn_node(node.clone(), in_rx, out_tx);

    let extent = Extent3::plane(64, 48);
    let samples_per_frame = extent.element_count().unwrap_or_default();
    let properties = Arc::new(ImageProperties::default().with_entry("transducer", "linear"));
    for frame in 0..5u32 {
        let samples = (0..samples_per_frame)
            .map(|i| ((i as u32 + frame) % 4096) as i16)
            .collect();
        let timestamp = f64::from(frame) / 30.0;
        let image = Image::new(extent, Buffer::new::<i16>(samples), properties.clone(), timestamp, timestamp);
        in_tx.send(Message::from(image)).await?;
    }
    drop(in_tx);

    while let Some(message) = out_rx.recv().await {
        if let Some(image) = message.as_image() {
            log::info!(
                "Frame @ {:.3}s: {}x{}x{} {}",
                image.sync_timestamp(),
                image.extent().x,
                image.extent().y,
                image.extent().z,
                image.element_type()
            );
        }
    }
    driver.await??;

    println!("{}", PipelineMonitor::new(collector).generate_report());
    Ok(())
}
