use super::types::{Frame, Rank, Tag};

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::VecDeque;

/// Raw rank-addressed frame delivery.
///
/// An endpoint belongs to exactly one rank and is driven by a single logical
/// thread of control. `recv` blocks until any frame arrives; ordering between
/// a fixed pair of ranks is FIFO.
pub trait Endpoint {
    fn rank(&self) -> Rank;

    fn size(&self) -> usize;

    fn send(&mut self, dest: Rank, frame: Frame) -> Result<()>;

    fn recv(&mut self) -> Result<Frame>;
}

/// Tagged messaging over an [`Endpoint`].
///
/// Adds the bincode payload codec, `(source, tag)` matching with a deferred
/// queue for out-of-order frames, one-to-all broadcast and a two-phase
/// barrier. All operations block until the transport completes.
pub struct Fleet<E: Endpoint> {
    endpoint: E,
    deferred: VecDeque<Frame>,
}

impl<E: Endpoint> Fleet<E> {
    pub fn new(endpoint: E) -> Self {
        Self {
            endpoint,
            deferred: VecDeque::new(),
        }
    }

    pub fn rank(&self) -> Rank {
        self.endpoint.rank()
    }

    pub fn size(&self) -> usize {
        self.endpoint.size()
    }

    /// Sends `value` to `dest`, tagged with `tag`. Blocking, point-to-point.
    pub fn send<T: Serialize>(&mut self, dest: Rank, tag: Tag, value: &T) -> Result<()> {
        let frame = Frame {
            src: self.endpoint.rank(),
            tag,
            payload: bincode::serialize(value)?,
        };
        self.endpoint.send(dest, frame)
    }

    /// Receives the next `(src, tag)` message, blocking until it arrives.
    ///
    /// Frames from other sources or phases are deferred, not dropped, so
    /// interleaved traffic cannot be mis-matched.
    pub fn recv<T: DeserializeOwned>(&mut self, src: Rank, tag: Tag) -> Result<T> {
        let deferred_pos = self
            .deferred
            .iter()
            .position(|frame| frame.src == src && frame.tag == tag);
        if let Some(frame) = deferred_pos.and_then(|pos| self.deferred.remove(pos)) {
            return Ok(bincode::deserialize(&frame.payload)?);
        }

        loop {
            let frame = self.endpoint.recv()?;
            if frame.src == src && frame.tag == tag {
                return Ok(bincode::deserialize(&frame.payload)?);
            }
            self.deferred.push_back(frame);
        }
    }

    /// One-to-all broadcast: the root passes `Some(value)` and every other
    /// rank passes `None`; all ranks return the root's value. Blocks until the
    /// value has been delivered to this rank, so every rank observes a
    /// verdict before proceeding.
    pub fn broadcast<T>(&mut self, root: Rank, tag: Tag, value: Option<T>) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        if self.rank() == root {
            let value = value
                .ok_or_else(|| anyhow::anyhow!("broadcast root rank {} passed no value", root))?;
            for dest in 0..self.size() {
                if dest != root {
                    self.send(dest, tag, &value)?;
                }
            }
            Ok(value)
        } else {
            self.recv(root, tag)
        }
    }

    /// Blocks until every rank has arrived: gather-to-rank-0, then release.
    pub fn barrier(&mut self) -> Result<()> {
        const HUB: Rank = 0;
        let token = 0u8;

        if self.rank() == HUB {
            for rank in 1..self.size() {
                let _: u8 = self.recv(rank, Tag::Barrier)?;
            }
            for rank in 1..self.size() {
                self.send(rank, Tag::Barrier, &token)?;
            }
        } else {
            self.send(HUB, Tag::Barrier, &token)?;
            let _: u8 = self.recv(HUB, Tag::Barrier)?;
        }
        Ok(())
    }
}
