//! Software renderer for the NORAD display.
//!
//! A 0RGB frame buffer, scan conversion, the layered additive glow used by
//! every drawable, the pre-rendered map layer and the CRT post-processing
//! pipeline.

pub mod frame;
pub mod glow;
pub mod layer;
pub mod map_layer;
pub mod post;
pub mod raster;

pub use frame::{BlendMode, Frame};
pub use glow::{draw_glow_line, draw_glow_point, draw_glow_ring, draw_glow_trail, GlowRing, GlowStroke};
pub use layer::{Canvas, GlowLayer};
pub use map_layer::StaticMapLayer;
pub use post::{PostPipeline, PostStage};
