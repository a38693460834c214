//! Recording session system
//!
//! The single-session lifecycle: explicit Idle/Active state, the 1-second
//! elapsed counter with its 180-second hard cap, and the controller that
//! drives a capture from stream acquisition through upload hand-off.

pub mod controller;
pub mod state;

pub use controller::{SessionController, SessionEvent};
pub use state::{format_elapsed, RecorderState, SessionConfig, MAX_DURATION_SECS};
