use crate::core::{Message, ProcessingNode};
use crate::engine::BackpressurePolicy;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

/// Feeds `node` from `rx` and forwards its outputs to `tx`.
///
/// `submit` blocks, so every call runs on tokio's blocking pool. A queueing
/// node sees one message at a time in channel order. A discarding node gets
/// each message as soon as it arrives, and drops the ones that find it busy.
/// The task finishes once `rx` is closed or `tx` has no receiver left, after
/// all in-flight calls are done.
pub fn spawn_node(
    node: Arc<dyn ProcessingNode>,
    mut rx: mpsc::Receiver<Message>,
    tx: mpsc::Sender<Message>,
) -> JoinHandle<Result<()>> {
    tokio::spawn(async move {
        let mut in_flight: JoinSet<Result<bool>> = JoinSet::new();
        let mut downstream_open = true;

        while let Some(message) = rx.recv().await {
            if tx.is_closed() {
                downstream_open = false;
                break;
            }

            match node.policy() {
                BackpressurePolicy::Queueing => {
                    let output = submit_blocking(Arc::clone(&node), message).await?;
                    downstream_open = forward(&tx, output).await;
                }
                BackpressurePolicy::Discarding => {
                    let node = Arc::clone(&node);
                    let tx = tx.clone();
                    in_flight.spawn(async move {
                        let output = submit_blocking(node, message).await?;
                        Ok(forward(&tx, output).await)
                    });

                    while let Some(done) = in_flight.try_join_next() {
                        downstream_open &= done??;
                    }
                }
            }

            if !downstream_open {
                break;
            }
        }

        while let Some(done) = in_flight.join_next().await {
            downstream_open &= done??;
        }
        if downstream_open {
            log::debug!("{}: input closed, driver stopped", node.node_id());
        } else {
            log::debug!("{}: downstream closed, driver stopped", node.node_id());
        }
        Ok(())
    })
}

async fn submit_blocking(node: Arc<dyn ProcessingNode>, message: Message) -> Result<Option<Message>> {
    Ok(tokio::task::spawn_blocking(move || node.submit(Some(message))).await?)
}

/// False once downstream has gone away
async fn forward(tx: &mpsc::Sender<Message>, output: Option<Message>) -> bool {
    match output {
        Some(message) => tx.send(message).await.is_ok(),
        None => true,
    }
}
