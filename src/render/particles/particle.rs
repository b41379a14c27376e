//! 单个粒子
//!
//! 粒子按毫秒计寿命，颜色和不透明度在寿命内线性插值，
//! 插值速率在构造时一次性计算，之后不再重算。

use super::emitter::ParticleEmitter;
use crate::render::{Color, Sprite, Surface};
use glam::Vec2;
use std::sync::Arc;

/// 不透明度和 alpha 的下限
pub const MIN_OPACITY: f32 = 0.0001;

const DEFAULT_LIFE_MS: f32 = 300.0;
const DEFAULT_PARTICLE_SIZE: f32 = 5.0;

/// 粒子在发射器内的标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

/// 一次更新后的粒子状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleState {
    Alive,
    Dead,
}

/// 粒子
#[derive(Clone)]
pub struct Particle {
    id: ParticleId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// 恒定加速度（设置了聚焦点时忽略）
    pub acceleration: Vec2,
    /// 聚焦点（世界坐标）
    pub focus: Option<Vec2>,
    pub focus_accel: f32,
    pub opacity: f32,
    pub begin_color: Color,
    pub end_color: Color,
    /// 剩余寿命（毫秒）
    pub life: f32,
    pub fade: bool,
    pub particle_size: f32,
    pub particle_sprite: Option<Arc<dyn Sprite>>,

    r_rate: f32,
    g_rate: f32,
    b_rate: f32,
    a_rate: f32,
    current_color: Color,
    dead: bool,
}

impl Particle {
    pub fn builder() -> ParticleBuilder {
        ParticleBuilder::new()
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn current_color(&self) -> Color {
        self.current_color
    }

    /// 每毫秒的 RGB 插值速率
    pub fn color_rates(&self) -> [f32; 3] {
        [self.r_rate, self.g_rate, self.b_rate]
    }

    /// 每毫秒的不透明度速率
    pub fn opacity_rate(&self) -> f32 {
        self.a_rate
    }

    /// 推进 `delta` 毫秒
    ///
    /// 寿命变为负数的那一帧仍然完成全部积分，并返回 [`ParticleState::Dead`]。
    /// 已死亡的粒子不再更新。
    pub fn update(&mut self, delta: f32) -> ParticleState {
        if self.dead {
            return ParticleState::Dead;
        }

        self.life -= delta;
        if self.life < 0.0 {
            self.dead = true;
        }

        if self.fade {
            self.opacity = (self.a_rate * self.life).clamp(MIN_OPACITY, 1.0);
        }

        self.current_color.r = (self.current_color.r + self.r_rate * delta).clamp(0.0, 255.0);
        self.current_color.g = (self.current_color.g + self.g_rate * delta).clamp(0.0, 255.0);
        self.current_color.b = (self.current_color.b + self.b_rate * delta).clamp(0.0, 255.0);
        self.current_color.a = self.opacity.clamp(MIN_OPACITY, 1.0);

        let dt = delta / 1000.0;
        match self.focus {
            Some(focus) => {
                // 方向恒为单位向量，与距离无关
                let accel = (focus - self.position).normalize_or_zero() * self.focus_accel * dt;
                self.velocity += accel;
            }
            None => {
                self.velocity += self.acceleration * dt;
            }
        }
        self.position += self.velocity * dt;

        if self.dead {
            ParticleState::Dead
        } else {
            ParticleState::Alive
        }
    }

    /// 绘制粒子
    ///
    /// 精灵粒子直接委托给精灵绘制，不应用插值颜色和淡出。
    pub fn draw(&self, surface: &mut dyn Surface) {
        if let Some(sprite) = &self.particle_sprite {
            sprite.draw(surface, self.position.x, self.position.y);
            return;
        }

        let mut color = self.current_color;
        color.a = self.opacity.clamp(MIN_OPACITY, 1.0);
        surface.set_fill_style(color);
        surface.fill_circle(self.position, self.particle_size);
    }
}

impl std::fmt::Debug for Particle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Particle")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("life", &self.life)
            .field("opacity", &self.opacity)
            .field("current_color", &self.current_color)
            .field("has_sprite", &self.particle_sprite.is_some())
            .field("dead", &self.dead)
            .finish()
    }
}

/// 粒子构造器
///
/// 所有字段都有默认值；[`ParticleBuilder::from_emitter`] 以发射器的模板参数为默认值。
#[derive(Clone)]
pub struct ParticleBuilder {
    id: ParticleId,
    life: f32,
    opacity: f32,
    begin_color: Color,
    end_color: Color,
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    focus: Option<Vec2>,
    focus_accel: f32,
    fade: bool,
    particle_size: f32,
    particle_sprite: Option<Arc<dyn Sprite>>,
}

impl ParticleBuilder {
    pub fn new() -> Self {
        Self {
            id: ParticleId(0),
            life: DEFAULT_LIFE_MS,
            opacity: 1.0,
            begin_color: Color::WHITE,
            end_color: Color::WHITE,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            focus: None,
            focus_accel: 0.0,
            fade: false,
            particle_size: DEFAULT_PARTICLE_SIZE,
            particle_sprite: None,
        }
    }

    /// 以发射器的寿命、不透明度、颜色和加速度为默认值
    ///
    /// 位置、速度、大小、聚焦点仍由调用者（通常是发射器的采样逻辑）设置。
    pub fn from_emitter(emitter: &ParticleEmitter) -> Self {
        Self {
            life: emitter.particle_life,
            opacity: emitter.opacity,
            begin_color: emitter.begin_color,
            end_color: emitter.end_color,
            acceleration: emitter.acceleration,
            fade: emitter.fade,
            particle_sprite: emitter.particle_sprite.clone(),
            ..Self::new()
        }
    }

    pub fn id(mut self, id: ParticleId) -> Self {
        self.id = id;
        self
    }

    pub fn life(mut self, life: f32) -> Self {
        self.life = life;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn colors(mut self, begin: Color, end: Color) -> Self {
        self.begin_color = begin;
        self.end_color = end;
        self
    }

    pub fn position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn acceleration(mut self, acceleration: Vec2) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn focus(mut self, focus: Vec2, focus_accel: f32) -> Self {
        self.focus = Some(focus);
        self.focus_accel = focus_accel;
        self
    }

    pub fn fade(mut self, fade: bool) -> Self {
        self.fade = fade;
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.particle_size = size;
        self
    }

    pub fn sprite(mut self, sprite: Option<Arc<dyn Sprite>>) -> Self {
        self.particle_sprite = sprite;
        self
    }

    pub fn build(self) -> Particle {
        // 寿命为 0 视为未指定
        let life = if self.life == 0.0 {
            DEFAULT_LIFE_MS
        } else {
            self.life
        };

        Particle {
            id: self.id,
            position: self.position,
            velocity: self.velocity,
            acceleration: self.acceleration,
            focus: self.focus,
            focus_accel: self.focus_accel,
            opacity: self.opacity,
            begin_color: self.begin_color,
            end_color: self.end_color,
            life,
            fade: self.fade,
            particle_size: self.particle_size,
            particle_sprite: self.particle_sprite,
            r_rate: (self.end_color.r - self.begin_color.r) / life,
            g_rate: (self.end_color.g - self.begin_color.g) / life,
            b_rate: (self.end_color.b - self.begin_color.b) / life,
            a_rate: self.opacity / life,
            current_color: self.begin_color,
            dead: false,
        }
    }
}

impl Default for ParticleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CommandSurface, DrawCommand, TextureSprite};

    fn approx(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn test_builder_defaults() {
        let p = Particle::builder().build();
        assert_eq!(p.life, 300.0);
        assert_eq!(p.opacity, 1.0);
        assert_eq!(p.particle_size, 5.0);
        assert_eq!(p.current_color(), Color::WHITE);
        assert_eq!(p.color_rates(), [0.0, 0.0, 0.0]);
        assert!(approx(p.opacity_rate(), 1.0 / 300.0, 1e-9));
    }

    #[test]
    fn test_zero_life_falls_back_to_default() {
        let p = Particle::builder().life(0.0).build();
        assert_eq!(p.life, 300.0);
        assert!(p.opacity_rate().is_finite());
    }

    #[test]
    fn test_life_decreases_by_delta() {
        let mut p = Particle::builder().life(1000.0).build();
        assert_eq!(p.update(250.0), ParticleState::Alive);
        assert_eq!(p.life, 750.0);
    }

    #[test]
    fn test_reaching_zero_is_not_death() {
        let mut p = Particle::builder().life(100.0).build();
        assert_eq!(p.update(100.0), ParticleState::Alive);
        assert_eq!(p.life, 0.0);
        assert_eq!(p.update(1.0), ParticleState::Dead);
        assert!(p.is_dead());
    }

    #[test]
    fn test_dead_particle_is_not_updated_again() {
        let mut p = Particle::builder()
            .life(10.0)
            .velocity(Vec2::new(1000.0, 0.0))
            .build();
        assert_eq!(p.update(20.0), ParticleState::Dead);
        let pos = p.position;
        let life = p.life;
        assert_eq!(p.update(20.0), ParticleState::Dead);
        assert_eq!(p.position, pos);
        assert_eq!(p.life, life);
    }

    #[test]
    fn test_color_reaches_end_at_zero_life() {
        let mut p = Particle::builder()
            .life(1000.0)
            .colors(Color::rgba(0.0, 0.0, 0.0, 1.0), Color::rgba(255.0, 255.0, 255.0, 1.0))
            .build();

        for _ in 0..10 {
            assert_eq!(p.update(100.0), ParticleState::Alive);
        }

        assert!(approx(p.life, 0.0, 1e-3));
        let c = p.current_color();
        assert!(approx(c.r, 255.0, 1e-2));
        assert!(approx(c.g, 255.0, 1e-2));
        assert!(approx(c.b, 255.0, 1e-2));
        assert_eq!(p.position, Vec2::ZERO);
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_color_channels_are_clamped() {
        let mut p = Particle::builder()
            .life(100.0)
            .colors(Color::rgb(200.0, 50.0, 0.0), Color::rgb(255.0, 0.0, 0.0))
            .build();
        // 超出寿命的大步长会导致插值越界
        p.update(1000.0);
        let c = p.current_color();
        assert_eq!(c.r, 255.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn test_fade_is_monotonic_and_clamped() {
        let mut p = Particle::builder().life(500.0).fade(true).build();
        let mut last = p.opacity;
        for _ in 0..6 {
            p.update(100.0);
            assert!(p.opacity <= last);
            assert!(p.opacity >= MIN_OPACITY && p.opacity <= 1.0);
            last = p.opacity;
        }
        // 死亡帧上寿命为负，不透明度截断到下限
        assert!(p.is_dead());
        assert_eq!(p.opacity, MIN_OPACITY);
        assert_eq!(p.current_color().a, MIN_OPACITY);
    }

    #[test]
    fn test_constant_acceleration() {
        let mut p = Particle::builder()
            .life(5000.0)
            .acceleration(Vec2::new(0.0, 100.0))
            .build();
        p.update(1000.0);
        assert!(approx(p.velocity.y, 100.0, 1e-4));
        // 半隐式欧拉：先更新速度再更新位置
        assert!(approx(p.position.y, 100.0, 1e-4));
    }

    #[test]
    fn test_focus_overrides_acceleration() {
        let mut p = Particle::builder()
            .life(5000.0)
            .position(Vec2::new(0.0, 0.0))
            .acceleration(Vec2::new(0.0, 1000.0))
            .focus(Vec2::new(300.0, 400.0), 50.0)
            .build();
        p.update(100.0);

        let dir = p.velocity.normalize();
        assert!(approx(dir.x, 0.6, 1e-5));
        assert!(approx(dir.y, 0.8, 1e-5));
        // |accel| = focus_accel * dt，与距离无关
        assert!(approx(p.velocity.length(), 5.0, 1e-4));
    }

    #[test]
    fn test_focus_magnitude_independent_of_distance() {
        let mut near = Particle::builder()
            .life(5000.0)
            .focus(Vec2::new(1.0, 0.0), 10.0)
            .build();
        let mut far = Particle::builder()
            .life(5000.0)
            .focus(Vec2::new(10_000.0, 0.0), 10.0)
            .build();
        near.update(100.0);
        far.update(100.0);
        assert!(approx(near.velocity.length(), far.velocity.length(), 1e-6));
    }

    #[test]
    fn test_particle_on_focus_point_stays_finite() {
        let mut p = Particle::builder()
            .life(5000.0)
            .position(Vec2::new(5.0, 5.0))
            .focus(Vec2::new(5.0, 5.0), 10.0)
            .build();
        p.update(16.0);
        assert!(p.velocity.is_finite());
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_draw_fills_disc_with_current_color() {
        let p = Particle::builder()
            .position(Vec2::new(3.0, 4.0))
            .size(7.0)
            .colors(Color::RED, Color::RED)
            .opacity(0.5)
            .build();
        let mut surface = CommandSurface::new();
        p.draw(&mut surface);

        assert_eq!(
            surface.commands,
            vec![DrawCommand::Circle {
                center: Vec2::new(3.0, 4.0),
                radius: 7.0,
                color: Color::rgba(255.0, 0.0, 0.0, 0.5),
            }]
        );
    }

    #[test]
    fn test_sprite_draw_ignores_color_state() {
        let sprite: Arc<dyn Sprite> = Arc::new(TextureSprite::new(9, 4.0, 4.0));
        let p = Particle::builder()
            .position(Vec2::new(1.0, 1.0))
            .fade(true)
            .sprite(Some(sprite))
            .build();
        let mut surface = CommandSurface::new();
        p.draw(&mut surface);

        assert_eq!(surface.circle_count(), 0);
        assert_eq!(surface.image_count(), 1);
        assert_eq!(surface.fill_style(), Color::default());
    }
}
