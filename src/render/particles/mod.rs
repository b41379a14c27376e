//! 2D 粒子系统模块
//!
//! 发射器在矩形区域内按速率生成粒子，粒子在寿命内演化位置、速度、
//! 不透明度和颜色，死亡后在同一帧内被压缩移除。
//!
//! ## 使用示例
//!
//! ```
//! use particle_engine::render::particles::ParticleEmitter;
//! use particle_engine::render::{Color, CommandSurface};
//!
//! let mut emitter = ParticleEmitter::new(100.0, 100.0, 20.0, 5.0)
//!     .with_emit_rate(30.0)
//!     .with_life(1200.0)
//!     .with_velocity(20.0, 60.0)
//!     .with_angle(-2.0, -1.2)
//!     .with_colors(Color::YELLOW, Color::RED)
//!     .with_fade(true);
//!
//! let mut surface = CommandSurface::new();
//! emitter.update(16.0);
//! emitter.draw(&mut surface, 16.0);
//! assert_eq!(surface.circle_count(), emitter.particle_count());
//! ```

pub mod emitter;
pub mod particle;
pub mod presets;
pub mod system;


pub use emitter::{ParticleEmitter, ParticleEmitterStats, SpawnRounding};
pub use particle::{Particle, ParticleBuilder, ParticleId, ParticleState, MIN_OPACITY};
pub use presets::ParticlePreset;
pub use system::{
    particle_emitter_draw_system, particle_emitter_update_system, register_particle_systems,
    ParticleDebug, ParticleSystemStats,
};
