//! Platform capture seam
//!
//! This module defines the boundary to the platform's screen/audio capture
//! and encoding capability. Real backends live in embedding applications;
//! this crate only consumes them.

pub mod encoder;
pub mod traits;

pub use encoder::{Encoder, EncoderControl, EncoderEvent, CONTAINER_EXT, CONTAINER_MIME};
pub use traits::{CapturePlatform, MediaStream, MediaTrack, TrackKind};
