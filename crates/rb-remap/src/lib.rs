//! Coordinate-field resampling (remap) for interleaved `u8` images.
//!
//! ## Mapping Fields
//! A mapping field is a 2-channel `f32` image with the destination's extent.
//! Channel 0 holds the source x and channel 1 the source y to sample for
//! that destination pixel.
//!
//! ## Partition Invariance
//! Each output pixel is a pure function of its map value, the source image,
//! the kernel and the border mode. Remapping non-overlapping destination
//! views that partition the full extent therefore reproduces, bit for bit,
//! a single full-extent call.
//!
//! ## Sampling Coordinates
//! Pixel-center coordinates: integer coordinates refer to pixel centers.
//! Nearest-neighbor rounds to the nearest integer indices; bilinear uses the
//! floor-based 2x2 neighborhood; Lanczos4 uses the floor-based 8x8
//! neighborhood with per-axis normalized weights.

mod border;
mod kernel;
mod remap;

pub use border::BorderMode;
pub use kernel::Interpolation;
pub use remap::{remap, remap_into};
