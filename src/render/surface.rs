//! 渲染表面抽象
//!
//! 粒子只需要一小组 2D 绘制原语：设置填充颜色、填充圆盘、填充矩形、
//! 画线和调试文字。具体后端（canvas、wgpu 批处理等）实现 [`Surface`]。

use super::color::Color;
use bevy_ecs::prelude::*;
use glam::Vec2;

/// 2D 渲染表面
pub trait Surface {
    /// 设置后续填充操作使用的颜色
    fn set_fill_style(&mut self, color: Color);

    /// 以当前填充颜色填充圆盘
    fn fill_circle(&mut self, center: Vec2, radius: f32);

    /// 以当前填充颜色填充矩形
    fn fill_rect(&mut self, origin: Vec2, size: Vec2);

    /// 画线
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color);

    /// 以当前填充颜色绘制文字（仅调试使用）
    fn fill_text(&mut self, text: &str, position: Vec2);

    /// 绘制纹理图像（精灵使用）
    fn draw_image(&mut self, texture_id: u32, position: Vec2, size: Vec2);
}

/// 精灵图元
pub trait Sprite: Send + Sync {
    /// 在 `(x, y)` 处绘制
    fn draw(&self, surface: &mut dyn Surface, x: f32, y: f32);
}

/// 基于纹理的简单精灵
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSprite {
    pub texture_id: u32,
    pub width: f32,
    pub height: f32,
}

impl TextureSprite {
    pub fn new(texture_id: u32, width: f32, height: f32) -> Self {
        Self {
            texture_id,
            width,
            height,
        }
    }
}

impl Sprite for TextureSprite {
    fn draw(&self, surface: &mut dyn Surface, x: f32, y: f32) {
        surface.draw_image(
            self.texture_id,
            Vec2::new(x, y),
            Vec2::new(self.width, self.height),
        );
    }
}

/// 低级绘制命令
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Rect {
        origin: Vec2,
        size: Vec2,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    Text {
        text: String,
        position: Vec2,
        color: Color,
    },
    Image {
        texture_id: u32,
        position: Vec2,
        size: Vec2,
    },
}

/// 记录绘制命令的表面
///
/// 无头运行和测试使用；真正的后端可以在帧末回放 `commands`。
#[derive(Resource, Debug, Default, Clone)]
pub struct CommandSurface {
    fill_style: Color,
    pub commands: Vec<DrawCommand>,
}

impl CommandSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill_style(&self) -> Color {
        self.fill_style
    }

    /// 清空已记录的命令（每帧开始时调用）
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn image_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { .. }))
            .count()
    }
}

impl Surface for CommandSurface {
    fn set_fill_style(&mut self, color: Color) {
        self.fill_style = color;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: self.fill_style,
        });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::Rect {
            origin,
            size,
            color: self.fill_style,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn fill_text(&mut self, text: &str, position: Vec2) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            color: self.fill_style,
        });
    }

    fn draw_image(&mut self, texture_id: u32, position: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::Image {
            texture_id,
            position,
            size,
        });
    }
}
