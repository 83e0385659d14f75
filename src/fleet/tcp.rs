use super::transport::Endpoint;
use super::types::{Frame, Rank, Tag};

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Duration;

const DIAL_ATTEMPTS: usize = 40;
const DIAL_BASE_DELAY_MS: u64 = 150;
const DIAL_MAX_DELAY_MS: u64 = 1200;

/// A listener bound to this rank's address, before the mesh is established.
///
/// Binding and establishing are split so a caller can bind every rank first
/// (ephemeral ports included) and only then dial out.
pub struct TcpBinding {
    listener: TcpListener,
}

/// Blocking TCP mesh endpoint for a multi-process fleet.
///
/// Every pair of ranks shares one stream: the higher rank dials the lower one
/// and identifies itself with a hello frame. A reader thread per peer decodes
/// incoming frames into a single inbox channel; writes go directly to the
/// peer's stream from the owning thread.
pub struct TcpEndpoint {
    rank: Rank,
    writers: Vec<Option<TcpStream>>,
    loopback: Sender<Frame>,
    inbox: Receiver<Frame>,
}

impl TcpEndpoint {
    /// Binds this rank's listener. `establish` completes the mesh.
    pub fn bind(addr: SocketAddr) -> Result<TcpBinding> {
        let listener =
            TcpListener::bind(addr).with_context(|| format!("failed to bind {}", addr))?;
        Ok(TcpBinding { listener })
    }
}

impl TcpBinding {
    /// The bound address, needed when binding with an ephemeral port.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Connects the full mesh: dials every lower rank (with retry, since
    /// peers may still be binding), then accepts every higher rank and learns
    /// its identity from the hello frame. Blocks until all `size - 1` streams
    /// exist.
    pub fn establish(self, rank: Rank, addrs: &[SocketAddr]) -> Result<TcpEndpoint> {
        let size = addrs.len();
        anyhow::ensure!(rank < size, "rank {} outside fleet of {}", rank, size);

        let (tx, rx) = channel();
        let mut writers: Vec<Option<TcpStream>> = (0..size).map(|_| None).collect();

        for peer in 0..rank {
            let mut stream = dial_with_retry(addrs[peer])?;
            stream.set_nodelay(true)?;
            write_frame(
                &mut stream,
                &Frame {
                    src: rank,
                    tag: Tag::Hello,
                    payload: Vec::new(),
                },
            )?;
            spawn_reader(peer, stream.try_clone()?, tx.clone());
            writers[peer] = Some(stream);
            tracing::debug!("Rank {} connected to rank {}", rank, peer);
        }

        for _ in rank + 1..size {
            let (mut stream, addr) = self.listener.accept()?;
            stream.set_nodelay(true)?;
            let hello = read_frame(&mut stream)?;
            anyhow::ensure!(
                hello.tag == Tag::Hello && hello.src > rank && hello.src < size,
                "unexpected handshake from {}",
                addr
            );
            spawn_reader(hello.src, stream.try_clone()?, tx.clone());
            writers[hello.src] = Some(stream);
            tracing::debug!("Rank {} accepted rank {} from {}", rank, hello.src, addr);
        }

        tracing::info!("Rank {} joined a fleet of {}", rank, size);
        Ok(TcpEndpoint {
            rank,
            writers,
            loopback: tx,
            inbox: rx,
        })
    }
}

impl Endpoint for TcpEndpoint {
    fn rank(&self) -> Rank {
        self.rank
    }

    fn size(&self) -> usize {
        self.writers.len()
    }

    fn send(&mut self, dest: Rank, frame: Frame) -> Result<()> {
        if dest == self.rank {
            return self
                .loopback
                .send(frame)
                .context("own inbox is gone");
        }
        let stream = self
            .writers
            .get_mut(dest)
            .and_then(|slot| slot.as_mut())
            .with_context(|| format!("no stream for rank {}", dest))?;
        write_frame(stream, &frame)
    }

    fn recv(&mut self) -> Result<Frame> {
        self.inbox.recv().context("all peer readers have stopped")
    }
}

/// Dials `addr` with exponential backoff, mirroring the retry discipline used
/// for any inter-node call: peers may not have bound their listeners yet.
fn dial_with_retry(addr: SocketAddr) -> Result<TcpStream> {
    let mut delay_ms = DIAL_BASE_DELAY_MS;

    for attempt in 0..DIAL_ATTEMPTS {
        match TcpStream::connect(addr) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                if attempt + 1 == DIAL_ATTEMPTS {
                    return Err(e).with_context(|| format!("failed to dial {}", addr));
                }
                tracing::warn!("Dial {} failed ({}), retrying", addr, e);
                thread::sleep(Duration::from_millis(delay_ms));
                delay_ms = (delay_ms * 2).min(DIAL_MAX_DELAY_MS);
            }
        }
    }

    unreachable!("dial loop returns on the last attempt")
}

fn spawn_reader(peer: Rank, mut stream: TcpStream, inbox: Sender<Frame>) {
    thread::spawn(move || loop {
        match read_frame(&mut stream) {
            Ok(frame) => {
                if inbox.send(frame).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::debug!("Reader for rank {} stopped: {}", peer, e);
                break;
            }
        }
    });
}

/// Length-prefixed bincode framing: `u32` big-endian byte count, then the
/// encoded frame.
fn write_frame(stream: &mut TcpStream, frame: &Frame) -> Result<()> {
    let bytes = bincode::serialize(frame)?;
    let len = u32::try_from(bytes.len()).context("frame exceeds u32 length")?;
    stream.write_all(&len.to_be_bytes())?;
    stream.write_all(&bytes)?;
    Ok(())
}

fn read_frame(stream: &mut TcpStream) -> Result<Frame> {
    let mut len_bytes = [0u8; 4];
    stream.read_exact(&mut len_bytes)?;
    let len = u32::from_be_bytes(len_bytes) as usize;

    let mut bytes = vec![0u8; len];
    stream.read_exact(&mut bytes)?;
    Ok(bincode::deserialize(&bytes)?)
}
