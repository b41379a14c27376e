use super::emitter::{ParticleEmitter, SpawnRounding};
use crate::config::EmitterConfig;
use crate::render::Color;
use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

/// 粒子效果预设
///
/// 屏幕坐标系，y 轴向下；角度为弧度，-PI/2 指向上方。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticlePreset {
    Fire,
    Smoke,
    Explosion,
    Rain,
    Snow,
    Magic,
}

impl ParticlePreset {
    pub const ALL: [ParticlePreset; 6] = [
        ParticlePreset::Fire,
        ParticlePreset::Smoke,
        ParticlePreset::Explosion,
        ParticlePreset::Rain,
        ParticlePreset::Snow,
        ParticlePreset::Magic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ParticlePreset::Fire => "Fire",
            ParticlePreset::Smoke => "Smoke",
            ParticlePreset::Explosion => "Explosion",
            ParticlePreset::Rain => "Rain",
            ParticlePreset::Snow => "Snow",
            ParticlePreset::Magic => "Magic",
        }
    }

    /// 一次性爆发的粒子数（持续发射的预设返回 None）
    pub fn burst_count(&self) -> Option<u32> {
        match self {
            ParticlePreset::Explosion => Some(200),
            _ => None,
        }
    }

    pub fn to_config(&self) -> EmitterConfig {
        let base = EmitterConfig {
            name: self.name().to_string(),
            ..Default::default()
        };
        match self {
            ParticlePreset::Fire => EmitterConfig {
                width: 30.0,
                height: 5.0,
                emitting: true,
                emit_rate: 50.0,
                min_vel: 40.0,
                max_vel: 90.0,
                min_angle: -FRAC_PI_2 - 0.3,
                max_angle: -FRAC_PI_2 + 0.3,
                acceleration: Vec2::new(0.0, -20.0),
                particle_life: 1000.0,
                fade: true,
                min_size: 2.0,
                max_size: 5.0,
                begin_color: Color::rgb(255.0, 128.0, 0.0),
                end_color: Color::rgb(255.0, 0.0, 0.0),
                ..base
            },
            ParticlePreset::Smoke => EmitterConfig {
                width: 20.0,
                height: 5.0,
                emitting: true,
                emit_rate: 20.0,
                min_vel: 10.0,
                max_vel: 30.0,
                min_angle: -FRAC_PI_2 - 0.2,
                max_angle: -FRAC_PI_2 + 0.2,
                acceleration: Vec2::new(0.0, -5.0),
                particle_life: 3000.0,
                opacity: 0.8,
                fade: true,
                min_size: 4.0,
                max_size: 10.0,
                begin_color: Color::rgb(128.0, 128.0, 128.0),
                end_color: Color::rgb(77.0, 77.0, 77.0),
                ..base
            },
            ParticlePreset::Explosion => EmitterConfig {
                width: 4.0,
                height: 4.0,
                emitting: false,
                emit_rate: 200.0,
                min_vel: 50.0,
                max_vel: 250.0,
                min_angle: 0.0,
                max_angle: 2.0 * PI,
                acceleration: Vec2::new(0.0, 50.0),
                particle_life: 500.0,
                fade: true,
                min_size: 1.0,
                max_size: 4.0,
                begin_color: Color::rgb(255.0, 204.0, 0.0),
                end_color: Color::rgb(128.0, 0.0, 0.0),
                ..base
            },
            ParticlePreset::Rain => EmitterConfig {
                width: 800.0,
                height: 1.0,
                emitting: true,
                emit_rate: 100.0,
                spawn_rounding: SpawnRounding::Accumulate,
                min_vel: 300.0,
                max_vel: 400.0,
                min_angle: FRAC_PI_2,
                max_angle: FRAC_PI_2,
                acceleration: Vec2::new(0.0, 98.1),
                particle_life: 2000.0,
                opacity: 0.8,
                min_size: 1.0,
                max_size: 2.0,
                begin_color: Color::rgb(128.0, 128.0, 255.0),
                end_color: Color::rgb(128.0, 128.0, 255.0),
                ..base
            },
            ParticlePreset::Snow => EmitterConfig {
                width: 800.0,
                height: 1.0,
                emitting: true,
                emit_rate: 50.0,
                spawn_rounding: SpawnRounding::Accumulate,
                min_vel: 10.0,
                max_vel: 30.0,
                min_angle: FRAC_PI_2 - 0.4,
                max_angle: FRAC_PI_2 + 0.4,
                acceleration: Vec2::new(0.0, 5.0),
                particle_life: 5000.0,
                min_size: 2.0,
                max_size: 3.0,
                ..base
            },
            ParticlePreset::Magic => EmitterConfig {
                width: 10.0,
                height: 10.0,
                emitting: true,
                emit_rate: 30.0,
                min_vel: 20.0,
                max_vel: 60.0,
                min_angle: 0.0,
                max_angle: 2.0 * PI,
                particle_life: 1500.0,
                fade: true,
                focus: Some(Vec2::new(5.0, -80.0)),
                focus_accel: 120.0,
                min_size: 1.0,
                max_size: 3.0,
                begin_color: Color::rgb(128.0, 0.0, 255.0),
                end_color: Color::rgb(0.0, 255.0, 255.0),
                ..base
            },
        }
    }

    /// 在 `(x, y)` 处创建发射器；爆发型预设会立即发射
    pub fn spawn(&self, x: f32, y: f32) -> ParticleEmitter {
        let mut config = self.to_config();
        config.x = x;
        config.y = y;
        let mut emitter = config.build();
        if let Some(count) = self.burst_count() {
            emitter.emit(count);
        }
        emitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for preset in ParticlePreset::ALL {
            let config = preset.to_config();
            assert!(config.validate().is_ok(), "{} is invalid", preset.name());
            assert_eq!(config.name, preset.name());
        }
    }

    #[test]
    fn test_explosion_bursts_once() {
        let mut emitter = ParticlePreset::Explosion.spawn(100.0, 100.0);
        assert_eq!(emitter.particle_count(), 200);
        assert!(!emitter.is_emitting);

        for _ in 0..40 {
            emitter.update(16.0);
        }
        assert_eq!(emitter.particle_count(), 0);
    }

    #[test]
    fn test_fire_emits_continuously() {
        let mut emitter = ParticlePreset::Fire.spawn(0.0, 0.0);
        emitter.update(100.0);
        assert_eq!(emitter.particle_count(), 5);
    }
}
