//! 粒子系统 ECS 集成
//!
//! 每帧先更新所有发射器，再把存活粒子绘制到 [`CommandSurface`] 资源。

use super::emitter::{ParticleEmitter, ParticleEmitterStats};
use crate::ecs::Time;
use crate::render::CommandSurface;
use bevy_ecs::prelude::*;

/// 调试绘制开关
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct ParticleDebug {
    pub enabled: bool,
}

/// 所有发射器的汇总统计
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParticleSystemStats {
    pub emitter_count: usize,
    pub alive_count: usize,
    pub frame_emitted: u32,
    pub frame_expired: u32,
    pub total_emitted: u64,
    pub total_expired: u64,
}

impl ParticleSystemStats {
    fn accumulate(&mut self, stats: &ParticleEmitterStats) {
        self.emitter_count += 1;
        self.alive_count += stats.alive_count;
        self.frame_emitted += stats.frame_emitted;
        self.frame_expired += stats.frame_expired;
        self.total_emitted += stats.total_emitted;
        self.total_expired += stats.total_expired;
    }
}

/// 粒子发射器更新系统
pub fn particle_emitter_update_system(
    time: Res<Time>,
    mut stats: ResMut<ParticleSystemStats>,
    mut emitters: Query<&mut ParticleEmitter>,
) {
    let delta = time.delta_ms;
    let mut frame = ParticleSystemStats::default();

    for mut emitter in emitters.iter_mut() {
        emitter.update(delta);
        frame.accumulate(&emitter.stats());
    }

    *stats = frame;
}

/// 粒子绘制系统
pub fn particle_emitter_draw_system(
    time: Res<Time>,
    debug: Option<Res<ParticleDebug>>,
    mut surface: ResMut<CommandSurface>,
    emitters: Query<&ParticleEmitter>,
) {
    surface.clear();
    let debug = debug.map(|d| d.enabled).unwrap_or(false);

    for emitter in emitters.iter() {
        emitter.draw(&mut *surface, time.delta_ms);
        if debug {
            crate::ecs::Actor::debug_draw(emitter, &mut *surface);
        }
    }
}

/// 把粒子系统资源和系统注册到 `World` / `Schedule`
pub fn register_particle_systems(world: &mut World, schedule: &mut Schedule) {
    world.init_resource::<Time>();
    world.init_resource::<CommandSurface>();
    world.init_resource::<ParticleSystemStats>();
    world.init_resource::<ParticleDebug>();
    schedule.add_systems((particle_emitter_update_system, particle_emitter_draw_system).chain());
}
