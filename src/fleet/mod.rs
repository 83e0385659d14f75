//! Message-Passing Fleet Module
//!
//! The coordination layer of the solver: a fixed-size fleet of cooperating
//! ranks with no shared memory, exchanging tagged messages over two blocking
//! primitives.
//!
//! ## Architecture Overview
//! 1. **Endpoints**: An [`Endpoint`] delivers raw [`Frame`]s between ranks.
//!    Two implementations exist — in-process channels (`LocalEndpoint`, one
//!    per rank, used by the thread harness and tests) and a full TCP mesh
//!    (`TcpEndpoint`, one per process).
//! 2. **Fleet**: Wraps an endpoint with the bincode payload codec, tag/source
//!    matching (frames that do not match a pending receive are deferred, never
//!    dropped), one-to-all `broadcast` and a two-phase `barrier`.
//! 3. **Blocking model**: Every primitive blocks the calling rank until the
//!    transport completes. There is no timeout or cancellation: a crashed rank
//!    stalls the whole fleet, an accepted limitation.
//!
//! ## Submodules
//! - **`types`**: `Rank`, `Tag` and the `Frame` wire record.
//! - **`transport`**: The `Endpoint` trait and the `Fleet` wrapper.
//! - **`local`**: Channel-backed endpoints for a single-process fleet.
//! - **`tcp`**: Blocking TCP mesh endpoints for a multi-process fleet.

pub mod local;
pub mod tcp;
pub mod transport;
pub mod types;


pub use local::{local_endpoints, LocalEndpoint};
pub use tcp::TcpEndpoint;
pub use transport::{Endpoint, Fleet};
pub use types::{Frame, Rank, Tag};
