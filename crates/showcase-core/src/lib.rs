//! Showcase Core Types and Definitions
//!
//! This crate provides the foundational types used by showcase overlays:
//!
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Geometry**: Points, sizes, rectangles and insets ([`geometry`] module)
//! - **Draw**: Layered SVG output, strokes, text measurement and the
//!   highlight strategies that paint the spotlight around a target ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
