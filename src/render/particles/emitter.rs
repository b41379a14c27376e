//! 粒子发射器组件
//!
//! 发射器是一个矩形发射区域加一组粒子模板参数。每帧：
//!
//! ```text
//! update(delta)
//!   1. 发射：spawn_count(delta) 个新粒子（如果 is_emitting）
//!   2. 老化：所有存活粒子 update(delta)，死亡的记入待移除集合
//!   3. 压缩：按 id 从存活集合移除待移除粒子
//!   4. 清空待移除集合
//! draw(surface)
//!   按存活集合顺序绘制每个粒子
//! ```

use super::particle::{Particle, ParticleBuilder, ParticleId, ParticleState};
use crate::config::{ConfigError, ConfigResult};
use crate::core::random::{RandomSampler, RangeSampler};
use crate::ecs::{draw_bounds_outline, Actor, Bounds, Time};
use crate::render::{Color, Sprite, Surface};
use bevy_ecs::prelude::*;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

// ============================================================================
// 发射计数策略
// ============================================================================

/// 每帧发射数量的取整方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnRounding {
    /// `ceil(rate * delta / 1000)`：只要在发射，每帧至少一个粒子。
    /// 高帧率下实际速率会超过 `emit_rate`。
    #[default]
    Ceil,
    /// 累积小数部分，每帧发射整数部分，长期速率精确等于 `emit_rate`
    Accumulate,
}

// ============================================================================
// 统计
// ============================================================================

/// 发射器统计
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParticleEmitterStats {
    /// 当前存活粒子数
    pub alive_count: usize,
    /// 总发射数
    pub total_emitted: u64,
    /// 总死亡数
    pub total_expired: u64,
    /// 本帧发射数
    pub frame_emitted: u32,
    /// 本帧移除数
    pub frame_expired: u32,
}

// ============================================================================
// 粒子发射器
// ============================================================================

/// 粒子发射器组件
///
/// 所有模板参数都是公开字段，可随时修改；修改只影响之后创建的粒子。
#[derive(Component)]
pub struct ParticleEmitter {
    /// 发射区域
    pub bounds: Bounds,
    /// 是否发射
    pub is_emitting: bool,
    /// 每秒发射数量
    pub emit_rate: f32,
    pub spawn_rounding: SpawnRounding,

    pub min_vel: f32,
    pub max_vel: f32,
    /// 发射角度范围（弧度）
    pub min_angle: f32,
    pub max_angle: f32,
    pub acceleration: Vec2,

    /// 粒子寿命（毫秒）
    pub particle_life: f32,
    pub opacity: f32,
    pub fade: bool,

    /// 聚焦点（相对于发射器位置）
    pub focus: Option<Vec2>,
    pub focus_accel: f32,

    pub min_size: f32,
    pub max_size: f32,

    pub begin_color: Color,
    pub end_color: Color,

    pub particle_sprite: Option<Arc<dyn Sprite>>,

    particles: Vec<Particle>,
    dead_particles: Vec<ParticleId>,
    next_id: u64,
    emission_accumulator: f32,
    stats: ParticleEmitterStats,
    sampler: Box<dyn RangeSampler>,
}

impl Default for ParticleEmitter {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            is_emitting: false,
            emit_rate: 1.0,
            spawn_rounding: SpawnRounding::Ceil,
            min_vel: 0.0,
            max_vel: 0.0,
            min_angle: 0.0,
            max_angle: 0.0,
            acceleration: Vec2::ZERO,
            particle_life: 2000.0,
            opacity: 1.0,
            fade: false,
            focus: None,
            focus_accel: 1.0,
            min_size: 5.0,
            max_size: 5.0,
            begin_color: Color::WHITE,
            end_color: Color::WHITE,
            particle_sprite: None,
            particles: Vec::new(),
            dead_particles: Vec::new(),
            next_id: 0,
            emission_accumulator: 0.0,
            stats: ParticleEmitterStats::default(),
            sampler: Box::new(RandomSampler::new()),
        }
    }
}

impl ParticleEmitter {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            bounds: Bounds::new(x, y, width, height),
            ..Default::default()
        }
    }

    /// 开启发射并设置速率
    pub fn with_emit_rate(mut self, rate: f32) -> Self {
        self.emit_rate = rate;
        self.is_emitting = true;
        self
    }

    pub fn with_spawn_rounding(mut self, rounding: SpawnRounding) -> Self {
        self.spawn_rounding = rounding;
        self
    }

    /// 设置寿命（毫秒）
    pub fn with_life(mut self, life: f32) -> Self {
        self.particle_life = life;
        self
    }

    pub fn with_velocity(mut self, min: f32, max: f32) -> Self {
        self.min_vel = min;
        self.max_vel = max;
        self
    }

    /// 设置角度范围（弧度）
    pub fn with_angle(mut self, min: f32, max: f32) -> Self {
        self.min_angle = min;
        self.max_angle = max;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vec2) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_colors(mut self, begin: Color, end: Color) -> Self {
        self.begin_color = begin;
        self.end_color = end;
        self
    }

    pub fn with_size(mut self, min: f32, max: f32) -> Self {
        self.min_size = min;
        self.max_size = max;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_fade(mut self, fade: bool) -> Self {
        self.fade = fade;
        self
    }

    /// 设置聚焦点（相对发射器位置）
    pub fn with_focus(mut self, focus: Vec2, focus_accel: f32) -> Self {
        self.focus = Some(focus);
        self.focus_accel = focus_accel;
        self
    }

    pub fn with_sprite(mut self, sprite: Arc<dyn Sprite>) -> Self {
        self.particle_sprite = Some(sprite);
        self
    }

    pub fn with_sampler(mut self, sampler: impl RangeSampler + 'static) -> Self {
        self.sampler = Box::new(sampler);
        self
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// 待移除集合（只在 `update` 的老化与压缩之间非空）
    pub fn dead_particles(&self) -> &[ParticleId] {
        &self.dead_particles
    }

    pub fn stats(&self) -> ParticleEmitterStats {
        self.stats
    }

    /// 发射 `count` 个粒子
    pub fn emit(&mut self, count: u32) {
        self.particles.reserve(count as usize);
        for _ in 0..count {
            let particle = self.create_particle();
            self.particles.push(particle);
        }
        self.stats.total_emitted += count as u64;
        self.stats.alive_count = self.particles.len();
    }

    /// 立即清空所有存活粒子
    pub fn clear_particles(&mut self) {
        tracing::debug!(target: "particles", count = self.particles.len(), "Clearing particles");
        self.particles.clear();
        self.stats.alive_count = 0;
    }

    /// 请求移除粒子，压缩在本帧老化结束后进行
    pub fn remove_particle(&mut self, id: ParticleId) {
        self.dead_particles.push(id);
    }

    /// 按发射器的约束创建一个粒子
    pub fn create_particle(&mut self) -> Particle {
        let Bounds { pos, width, height } = self.bounds;
        let x = self.sampler.sample(pos.x, pos.x + width);
        let y = self.sampler.sample(pos.y, pos.y + height);

        let angle = self.sampler.sample(self.min_angle, self.max_angle);
        let vel = self.sampler.sample(self.min_vel, self.max_vel);
        let size = self.sampler.sample(self.min_size, self.max_size);
        let velocity = Vec2::new(vel * angle.cos(), vel * angle.sin());

        let id = ParticleId(self.next_id);
        self.next_id += 1;

        let mut builder = ParticleBuilder::from_emitter(self)
            .id(id)
            .position(Vec2::new(x, y))
            .velocity(velocity)
            .size(size);
        if let Some(focus) = self.focus {
            builder = builder.focus(focus + pos, self.focus_accel);
        }
        builder.build()
    }

    /// 计算本帧应发射的粒子数
    pub fn spawn_count(&mut self, delta: f32) -> u32 {
        let exact = self.emit_rate * delta / 1000.0;
        match self.spawn_rounding {
            SpawnRounding::Ceil => exact.ceil().max(0.0) as u32,
            SpawnRounding::Accumulate => {
                self.emission_accumulator += exact.max(0.0);
                let count = self.emission_accumulator.floor();
                self.emission_accumulator -= count;
                count as u32
            }
        }
    }

    /// 推进一帧，`delta` 单位为毫秒
    pub fn update(&mut self, delta: f32) {
        self.stats.frame_emitted = 0;
        self.stats.frame_expired = 0;

        if self.is_emitting {
            let count = self.spawn_count(delta);
            tracing::trace!(target: "particles", count, delta, "Emitting particles");
            self.emit(count);
            self.stats.frame_emitted = count;
        }

        for particle in &mut self.particles {
            if particle.update(delta) == ParticleState::Dead {
                self.dead_particles.push(particle.id());
            }
        }

        let removed = if self.dead_particles.is_empty() {
            0
        } else {
            // 单次压缩；不在存活集合中的 id 直接忽略
            let pending: HashSet<ParticleId> = self.dead_particles.drain(..).collect();
            let before = self.particles.len();
            self.particles.retain(|p| !pending.contains(&p.id()));
            (before - self.particles.len()) as u32
        };
        if removed > 0 {
            tracing::trace!(target: "particles", removed, alive = self.particles.len(), "Compacted dead particles");
        }

        self.stats.frame_expired = removed;
        self.stats.total_expired += removed as u64;
        self.stats.alive_count = self.particles.len();
    }

    /// 按存活集合顺序绘制所有粒子
    pub fn draw(&self, surface: &mut dyn Surface, _delta: f32) {
        for particle in &self.particles {
            particle.draw(surface);
        }
    }

    /// 调试叠加层：粒子计数和聚焦点标记（不含包围盒轮廓）
    pub fn draw_debug_overlay(&self, surface: &mut dyn Surface) {
        let pos = self.bounds.pos;
        surface.set_fill_style(Color::YELLOW);
        surface.fill_text(
            &format!("Particles: {}", self.particles.len()),
            Vec2::new(pos.x, pos.y + 20.0),
        );

        if let Some(focus) = self.focus {
            let world_focus = focus + pos;
            surface.fill_rect(world_focus, Vec2::splat(3.0));
            surface.stroke_line(world_focus, self.bounds.center(), Color::YELLOW);
            surface.fill_text("Focus", world_focus);
        }
    }

    /// 配置期的范围检查（可选，模拟本身不依赖它）
    pub fn validate(&self) -> ConfigResult<()> {
        validate_template(&TemplateRanges {
            width: self.bounds.width,
            height: self.bounds.height,
            emit_rate: self.emit_rate,
            min_vel: self.min_vel,
            max_vel: self.max_vel,
            min_angle: self.min_angle,
            max_angle: self.max_angle,
            min_size: self.min_size,
            max_size: self.max_size,
            particle_life: self.particle_life,
            opacity: self.opacity,
        })
    }
}

impl std::fmt::Debug for ParticleEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleEmitter")
            .field("bounds", &self.bounds)
            .field("is_emitting", &self.is_emitting)
            .field("emit_rate", &self.emit_rate)
            .field("spawn_rounding", &self.spawn_rounding)
            .field("particle_life", &self.particle_life)
            .field("focus", &self.focus)
            .field("particles", &self.particles.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Actor for ParticleEmitter {
    fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    fn update(&mut self, _time: &Time, delta: f32) {
        ParticleEmitter::update(self, delta);
    }

    fn draw(&self, surface: &mut dyn Surface, delta: f32) {
        ParticleEmitter::draw(self, surface, delta);
    }

    fn debug_draw(&self, surface: &mut dyn Surface) {
        draw_bounds_outline(&self.bounds, surface);
        self.draw_debug_overlay(surface);
    }
}

// ============================================================================
// 范围检查
// ============================================================================

pub(crate) struct TemplateRanges {
    pub width: f32,
    pub height: f32,
    pub emit_rate: f32,
    pub min_vel: f32,
    pub max_vel: f32,
    pub min_angle: f32,
    pub max_angle: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub particle_life: f32,
    pub opacity: f32,
}

pub(crate) fn validate_template(t: &TemplateRanges) -> ConfigResult<()> {
    let values = [
        t.width,
        t.height,
        t.emit_rate,
        t.min_vel,
        t.max_vel,
        t.min_angle,
        t.max_angle,
        t.min_size,
        t.max_size,
        t.particle_life,
        t.opacity,
    ];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ConfigError::ValidationError(
            "Emitter parameters must be finite".to_string(),
        ));
    }
    if t.width < 0.0 || t.height < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "Invalid emitter extents: {}x{}",
            t.width, t.height
        )));
    }
    if t.emit_rate < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "Invalid emit rate: {}",
            t.emit_rate
        )));
    }
    if t.min_vel > t.max_vel {
        return Err(ConfigError::ValidationError(format!(
            "min_vel ({}) > max_vel ({})",
            t.min_vel, t.max_vel
        )));
    }
    if t.min_angle > t.max_angle {
        return Err(ConfigError::ValidationError(format!(
            "min_angle ({}) > max_angle ({})",
            t.min_angle, t.max_angle
        )));
    }
    if t.min_size > t.max_size {
        return Err(ConfigError::ValidationError(format!(
            "min_size ({}) > max_size ({})",
            t.min_size, t.max_size
        )));
    }
    if t.particle_life <= 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "Invalid particle life: {}",
            t.particle_life
        )));
    }
    if !(0.0..=1.0).contains(&t.opacity) {
        return Err(ConfigError::ValidationError(format!(
            "Invalid opacity: {}",
            t.opacity
        )));
    }
    Ok(())
}

// ============================================================================
// 测试
// ============================================================================
