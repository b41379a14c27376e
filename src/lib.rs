//! # Particle Engine
//!
//! A 2D particle emitter and simulation engine built with Rust.
//!
//! ## Features
//!
//! - **Emitters**: rectangular spawn regions with rate-based or burst emission
//! - **Particles**: linear color/opacity interpolation over a millisecond lifetime,
//!   constant acceleration or focus-seeking (homing) motion
//! - **ECS Integration**: emitters are `bevy_ecs` components driven by update/draw systems
//! - **Rendering Abstraction**: particles draw through a small `Surface` trait;
//!   `CommandSurface` records draw commands for headless runs
//! - **Configuration**: TOML/JSON emitter configs, presets, validation
//!
//! ## Frame model
//!
//! One tick is one `update(delta)` followed by one `draw(surface)`:
//! spawn → age every live particle → compact dead particles → draw.
//!
//! ### Example
//!
//! ```
//! use particle_engine::render::{CommandSurface, ParticlePreset};
//!
//! let mut emitter = ParticlePreset::Fire.spawn(320.0, 400.0);
//! let mut surface = CommandSurface::new();
//! for _ in 0..60 {
//!     emitter.update(16.0);
//! }
//! emitter.draw(&mut surface, 16.0);
//! assert!(surface.circle_count() > 0);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Error types, random sampling, headless simulation driver
//! - [`ecs`]: Host entity composition (`Bounds`, `Actor`, `Time`)
//! - [`render`]: Colors, surfaces, sprites and the particle system
//! - [`config`]: Configuration loading and validation

/// Core functionality: errors, random sampling and the headless simulation driver
pub mod core;
/// Host entity composition and frame time
pub mod ecs;
/// Rendering primitives and the particle system
pub mod render;
/// Configuration system
pub mod config;
