//! Port implementations.
//!
//! `live` talks to the real backend, `memory` keeps everything in process,
//! `recording` wraps another adapter and logs calls to cassettes, and
//! `replaying` serves those cassettes back.

pub mod live;
pub mod memory;
pub mod recording;
pub mod replaying;
