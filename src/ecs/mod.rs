//! 宿主实体组合
//!
//! 发射器不继承宿主实体，而是持有 [`Bounds`] 并实现 [`Actor`] 能力契约。

use crate::render::{Color, Surface};
use bevy_ecs::prelude::*;
use glam::Vec2;

/// 实体的空间范围（左上角位置 + 宽高）
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Bounds {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
            height,
        }
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn y(&self) -> f32 {
        self.pos.y
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size() * 0.5
    }
}

/// 帧时间资源（毫秒）
#[derive(Resource, Clone, Copy, Debug)]
pub struct Time {
    pub delta_ms: f32,
    pub elapsed_ms: f64,
    pub frame: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self {
            delta_ms: 0.0,
            elapsed_ms: 0.0,
            frame: 0,
        }
    }
}

impl Time {
    /// 推进一帧
    pub fn advance(&mut self, delta_ms: f32) {
        self.delta_ms = delta_ms;
        self.elapsed_ms += delta_ms as f64;
        self.frame += 1;
    }
}

/// 可更新、可绘制实体的能力契约
pub trait Actor {
    fn bounds(&self) -> &Bounds;

    /// 每帧更新，`delta` 单位为毫秒
    fn update(&mut self, time: &Time, delta: f32);

    fn draw(&self, surface: &mut dyn Surface, delta: f32);

    /// 调试绘制：默认画出包围盒轮廓
    fn debug_draw(&self, surface: &mut dyn Surface) {
        draw_bounds_outline(self.bounds(), surface);
    }
}

/// 用白色线段画出包围盒轮廓
pub fn draw_bounds_outline(bounds: &Bounds, surface: &mut dyn Surface) {
    let tl = bounds.pos;
    let tr = bounds.pos + Vec2::new(bounds.width, 0.0);
    let br = bounds.pos + bounds.size();
    let bl = bounds.pos + Vec2::new(0.0, bounds.height);
    surface.stroke_line(tl, tr, Color::WHITE);
    surface.stroke_line(tr, br, Color::WHITE);
    surface.stroke_line(br, bl, Color::WHITE);
    surface.stroke_line(bl, tl, Color::WHITE);
}
