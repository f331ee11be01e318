//! Bouncing point sources, an inverse-distance field sampled on a coarse grid,
//! and nearest-neighbour magnification of the result to display resolution.
//!
//! The per-frame pipeline lives in [`frame::Engine`]; [`app::App`] drives it
//! from a winit event loop and presents through wgpu.

pub mod app;
pub mod buffer;
pub mod color_math;
pub mod config;
pub mod error;
pub mod field;
pub mod frame;
pub mod gpu;
pub mod simulation;
pub mod upscale;
