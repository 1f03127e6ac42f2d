//! Output converters.
//!
//! The packer's output is a list of placement commands consumed by an
//! external document serializer (for example a PPTX writer). This module
//! defines those commands and the emitter that produces them from placed
//! groups.

pub mod placement;

// Re-export main types
pub use placement::{
    ImageBox, PlacementCommand, PlacementEmitter, RunBlock, TextBox, TextRun,
};
