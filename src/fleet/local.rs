use super::transport::Endpoint;
use super::types::{Frame, Rank};

use anyhow::{Context, Result};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Channel-backed endpoint for a fleet hosted in a single process.
///
/// Each rank owns one endpoint; frames travel over unbounded `mpsc` channels,
/// so sends never block and receives block until a frame arrives — the same
/// observable contract as the TCP mesh. Used by the `--local` harness and by
/// tests.
pub struct LocalEndpoint {
    rank: Rank,
    peers: Vec<Sender<Frame>>,
    inbox: Receiver<Frame>,
}

/// Builds a fully connected fleet of `size` endpoints, one per rank, ready to
/// be moved onto their worker threads.
pub fn local_endpoints(size: usize) -> Vec<LocalEndpoint> {
    let mut senders = Vec::with_capacity(size);
    let mut inboxes = Vec::with_capacity(size);
    for _ in 0..size {
        let (tx, rx) = channel();
        senders.push(tx);
        inboxes.push(rx);
    }

    inboxes
        .into_iter()
        .enumerate()
        .map(|(rank, inbox)| LocalEndpoint {
            rank,
            peers: senders.clone(),
            inbox,
        })
        .collect()
}

impl Endpoint for LocalEndpoint {
    fn rank(&self) -> Rank {
        self.rank
    }

    fn size(&self) -> usize {
        self.peers.len()
    }

    fn send(&mut self, dest: Rank, frame: Frame) -> Result<()> {
        let peer = self
            .peers
            .get(dest)
            .with_context(|| format!("rank {} is outside the fleet", dest))?;
        peer.send(frame)
            .with_context(|| format!("rank {} has left the fleet", dest))
    }

    fn recv(&mut self) -> Result<Frame> {
        self.inbox
            .recv()
            .context("every peer endpoint has been dropped")
    }
}
