//! 发射器配置
//!
//! 发射器的全部模板参数的可序列化形式，缺省字段取发射器默认值。

use super::ConfigResult;
use crate::render::particles::emitter::{validate_template, TemplateRanges};
use crate::render::particles::{ParticleEmitter, SpawnRounding};
use crate::render::{Color, Sprite, TextureSprite};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 精灵配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteConfig {
    pub texture_id: u32,
    pub width: f32,
    pub height: f32,
}

/// 发射器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// 名称（仅用于日志）
    pub name: String,

    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,

    /// 是否发射
    pub emitting: bool,
    /// 每秒发射数量
    pub emit_rate: f32,
    pub spawn_rounding: SpawnRounding,

    pub min_vel: f32,
    pub max_vel: f32,
    /// 角度（弧度）
    pub min_angle: f32,
    pub max_angle: f32,
    pub acceleration: Vec2,

    /// 粒子寿命（毫秒）
    pub particle_life: f32,
    pub opacity: f32,
    pub fade: bool,

    /// 相对发射器位置的聚焦点
    pub focus: Option<Vec2>,
    pub focus_accel: f32,

    pub min_size: f32,
    pub max_size: f32,

    pub begin_color: Color,
    pub end_color: Color,

    pub sprite: Option<SpriteConfig>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        ParticleEmitter::default().to_config()
    }
}

impl EmitterConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        validate_template(&TemplateRanges {
            width: self.width,
            height: self.height,
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

    /// 构建发射器
    pub fn build(&self) -> ParticleEmitter {
        ParticleEmitter::from_config(self)
    }
}

impl ParticleEmitter {
    pub fn from_config(config: &EmitterConfig) -> Self {
        let mut emitter = Self::default();
        emitter.apply_config(config);
        emitter
    }

    /// 应用配置，只影响之后创建的粒子
    pub fn apply_config(&mut self, config: &EmitterConfig) {
        self.bounds.pos = Vec2::new(config.x, config.y);
        self.bounds.width = config.width;
        self.bounds.height = config.height;
        self.is_emitting = config.emitting;
        self.emit_rate = config.emit_rate;
        self.spawn_rounding = config.spawn_rounding;
        self.min_vel = config.min_vel;
        self.max_vel = config.max_vel;
        self.min_angle = config.min_angle;
        self.max_angle = config.max_angle;
        self.acceleration = config.acceleration;
        self.particle_life = config.particle_life;
        self.opacity = config.opacity;
        self.fade = config.fade;
        self.focus = config.focus;
        self.focus_accel = config.focus_accel;
        self.min_size = config.min_size;
        self.max_size = config.max_size;
        self.begin_color = config.begin_color;
        self.end_color = config.end_color;
        self.particle_sprite = config.sprite.map(|s| {
            Arc::new(TextureSprite::new(s.texture_id, s.width, s.height)) as Arc<dyn Sprite>
        });
        tracing::debug!(target: "config", name = %config.name, "Applied emitter config");
    }

    /// 导出当前模板参数（精灵无法导出，置为 None）
    pub fn to_config(&self) -> EmitterConfig {
        EmitterConfig {
            name: String::new(),
            x: self.bounds.pos.x,
            y: self.bounds.pos.y,
            width: self.bounds.width,
            height: self.bounds.height,
            emitting: self.is_emitting,
            emit_rate: self.emit_rate,
            spawn_rounding: self.spawn_rounding,
            min_vel: self.min_vel,
            max_vel: self.max_vel,
            min_angle: self.min_angle,
            max_angle: self.max_angle,
            acceleration: self.acceleration,
            particle_life: self.particle_life,
            opacity: self.opacity,
            fade: self.fade,
            focus: self.focus,
            focus_accel: self.focus_accel,
            min_size: self.min_size,
            max_size: self.max_size,
            begin_color: self.begin_color,
            end_color: self.end_color,
            sprite: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_emitter_defaults() {
        let config = EmitterConfig::default();
        assert_eq!(config.emit_rate, 1.0);
        assert_eq!(config.particle_life, 2000.0);
        assert!(!config.emitting);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EmitterConfig = toml::from_str(
            r#"
            name = "sparks"
            width = 20.0
            height = 5.0
            emitting = true
            emit_rate = 40.0
            spawn_rounding = "accumulate"
            focus = [0.0, -100.0]

            [begin_color]
            r = 255.0
            g = 200.0
            b = 0.0
            a = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "sparks");
        assert_eq!(config.emit_rate, 40.0);
        assert_eq!(config.spawn_rounding, SpawnRounding::Accumulate);
        assert_eq!(config.focus, Some(Vec2::new(0.0, -100.0)));
        assert_eq!(config.begin_color, Color::rgb(255.0, 200.0, 0.0));
        assert_eq!(config.end_color, Color::WHITE);
        assert_eq!(config.particle_life, 2000.0);
    }

    #[test]
    fn test_build_applies_every_field() {
        let config = EmitterConfig {
            x: 5.0,
            y: 6.0,
            width: 7.0,
            height: 8.0,
            emitting: true,
            emit_rate: 30.0,
            fade: true,
            focus: Some(Vec2::new(1.0, 2.0)),
            focus_accel: 9.0,
            sprite: Some(SpriteConfig {
                texture_id: 3,
                width: 4.0,
                height: 4.0,
            }),
            ..Default::default()
        };
        let emitter = config.build();

        assert_eq!(emitter.bounds.pos, Vec2::new(5.0, 6.0));
        assert_eq!(emitter.bounds.width, 7.0);
        assert!(emitter.is_emitting);
        assert_eq!(emitter.emit_rate, 30.0);
        assert!(emitter.fade);
        assert_eq!(emitter.focus, Some(Vec2::new(1.0, 2.0)));
        assert!(emitter.particle_sprite.is_some());

        let exported = emitter.to_config();
        assert_eq!(exported.focus_accel, 9.0);
        assert!(exported.sprite.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let config = EmitterConfig {
            min_angle: 2.0,
            max_angle: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EmitterConfig {
            particle_life: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EmitterConfig {
            width: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
