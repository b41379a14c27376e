//! 无头模拟运行器
//!
//! 定义 `Simulation` 结构：持有 ECS `World` 和帧 `Schedule`，
//! 按固定帧时间驱动所有粒子发射器。

use crate::config::{EmitterConfig, LoggingConfig, SimulationConfig};
use crate::ecs::Time;
use crate::render::particles::{register_particle_systems, ParticleEmitter, ParticleSystemStats};
use crate::render::CommandSurface;
use bevy_ecs::prelude::*;

use super::error::SimulationResult;

/// 无头粒子模拟
///
/// `Simulation` 负责：
/// - 根据配置生成发射器实体
/// - 每帧推进 `Time` 资源并运行更新/绘制系统
/// - 按间隔输出统计日志
///
/// # 示例
///
/// ```
/// use particle_engine::config::{EmitterConfig, SimulationConfig};
/// use particle_engine::core::Simulation;
///
/// let mut config = SimulationConfig::default();
/// config.frame.frames = 10;
/// config.emitters.push(EmitterConfig {
///     emitting: true,
///     emit_rate: 60.0,
///     ..Default::default()
/// });
///
/// let mut sim = Simulation::new(&config).unwrap();
/// let stats = sim.run().unwrap();
/// assert_eq!(stats.emitter_count, 1);
/// ```
pub struct Simulation {
    world: World,
    schedule: Schedule,
    config: SimulationConfig,
}

impl Simulation {
    /// 根据配置创建模拟（会先验证配置）
    pub fn new(config: &SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;

        let mut world = World::new();
        let mut schedule = Schedule::default();
        register_particle_systems(&mut world, &mut schedule);

        let mut sim = Self {
            world,
            schedule,
            config: config.clone(),
        };
        for emitter in &config.emitters {
            sim.spawn_emitter(emitter);
        }
        Ok(sim)
    }

    /// 初始化日志系统
    ///
    /// 配置tracing日志框架。`RUST_LOG` 环境变量优先，未设置时使用配置中的级别。
    pub fn initialize_logging(config: &LoggingConfig) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.level.as_filter()));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        tracing::info!(target: "simulation", "Particle simulation starting");
    }

    /// 生成一个发射器实体
    pub fn spawn_emitter(&mut self, config: &EmitterConfig) -> Entity {
        tracing::debug!(target: "simulation", name = %config.name, "Spawning emitter");
        self.world.spawn(ParticleEmitter::from_config(config)).id()
    }

    /// 生成一个已构建好的发射器实体
    pub fn spawn(&mut self, emitter: ParticleEmitter) -> Entity {
        self.world.spawn(emitter).id()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn emitter(&self, entity: Entity) -> Option<&ParticleEmitter> {
        self.world.get::<ParticleEmitter>(entity)
    }

    pub fn emitter_mut(&mut self, entity: Entity) -> Option<Mut<'_, ParticleEmitter>> {
        self.world.get_mut::<ParticleEmitter>(entity)
    }

    pub fn stats(&self) -> ParticleSystemStats {
        *self.world.resource::<ParticleSystemStats>()
    }

    pub fn surface(&self) -> &CommandSurface {
        self.world.resource::<CommandSurface>()
    }

    pub fn time(&self) -> Time {
        *self.world.resource::<Time>()
    }

    /// 推进一帧
    pub fn step(&mut self, delta_ms: f32) -> ParticleSystemStats {
        self.world.resource_mut::<Time>().advance(delta_ms);
        self.schedule.run(&mut self.world);
        self.stats()
    }

    /// 按配置的帧数和帧时间运行，返回最后一帧的统计
    pub fn run(&mut self) -> SimulationResult<ParticleSystemStats> {
        let frames = self.config.frame.frames;
        let delta = self.config.frame.delta_ms;
        let interval = self.config.frame.report_interval;

        tracing::info!(target: "simulation", frames, delta, "Running simulation");

        let mut stats = self.stats();
        for frame in 1..=frames {
            stats = self.step(delta);
            if interval > 0 && frame % interval == 0 {
                tracing::info!(
                    target: "simulation",
                    frame,
                    emitters = stats.emitter_count,
                    alive = stats.alive_count,
                    emitted = stats.total_emitted,
                    expired = stats.total_expired,
                    "Frame stats"
                );
            }
        }

        tracing::info!(
            target: "simulation",
            alive = stats.alive_count,
            emitted = stats.total_emitted,
            expired = stats.total_expired,
            "Simulation finished"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = SimulationConfig::default();
        config.emitters.push(EmitterConfig {
            min_vel: 5.0,
            max_vel: 1.0,
            ..Default::default()
        });
        assert!(Simulation::new(&config).is_err());
    }

    #[test]
    fn test_step_advances_time() {
        let mut sim = Simulation::new(&SimulationConfig::default()).unwrap();
        sim.step(16.0);
        sim.step(16.0);
        let time = sim.time();
        assert_eq!(time.frame, 2);
        assert_eq!(time.delta_ms, 16.0);
    }

    #[test]
    fn test_emitter_can_be_reconfigured_at_runtime() {
        let mut sim = Simulation::new(&SimulationConfig::default()).unwrap();
        let entity = sim.spawn(ParticleEmitter::new(0.0, 0.0, 10.0, 10.0));

        sim.step(100.0);
        assert_eq!(sim.stats().alive_count, 0);

        if let Some(mut emitter) = sim.emitter_mut(entity) {
            emitter.emit_rate = 20.0;
            emitter.is_emitting = true;
        }
        sim.step(100.0);
        assert_eq!(sim.emitter(entity).map(|e| e.particle_count()), Some(2));
    }
}
