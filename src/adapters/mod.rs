//! Adapter implementations of the port traits.
//!
//! - [`live`]: the real git executable, process environment and clock
//! - [`recording`]: wrap another adapter and capture every interaction
//! - [`replaying`]: serve interactions captured in a cassette

pub mod live;
pub mod recording;
pub mod replaying;
