pub mod color;
pub mod particles;
pub mod surface;

pub use color::Color;
pub use surface::{CommandSurface, DrawCommand, Sprite, Surface, TextureSprite};

// Re-export particle system components
pub use particles::{
    Particle, ParticleBuilder, ParticleEmitter, ParticleEmitterStats, ParticlePreset,
    SpawnRounding,
};
