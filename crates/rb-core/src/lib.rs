//! Image containers and borrowed views for the remap benchmark.
//!
//! ## Interleaved Channels
//! Pixels store their channels interleaved in row-major order, so a row of a
//! `width x height` image with `channels` components occupies
//! `width * channels` consecutive elements.
//!
//! ## Views and Stride
//! Views use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than
//! `width * channels`. This allows borrowed views over padded buffers and
//! subviews, including the row-band and rectangle views the partitioning
//! strategies are built on.

mod error;
mod image;
mod rect;

pub use error::Error;
pub use image::{Image, ImageView, ImageViewMut};
pub use rect::Rect;
