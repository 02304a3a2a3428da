//! Scratch-to-reveal discount widget.
//!
//! [`surface`] holds the pure mask state machine; [`card`] is the canvas
//! component that drives it from pointer input.

pub mod surface;

mod card;
pub use card::ScratchCard;
pub use surface::{Revealed, ScratchSurface, BRUSH_WIDTH, REVEAL_THRESHOLD};
