//! 颜色值对象
//!
//! RGB 通道范围为 `[0, 255]`，alpha 范围为 `[0, 1]`。
//! `Color` 是 `Copy` 类型，传给粒子时总是按值复制。

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA 颜色
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255.0, 255.0, 255.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const RED: Color = Color::rgba(255.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::rgba(0.0, 255.0, 0.0, 1.0);
    pub const BLUE: Color = Color::rgba(0.0, 0.0, 255.0, 1.0);
    pub const YELLOW: Color = Color::rgba(255.0, 255.0, 0.0, 1.0);
    pub const ORANGE: Color = Color::rgba(255.0, 165.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// CSS 风格的序列化形式：`rgba(r, g, b, a)`，RGB 取整
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.r.round(),
            self.g.round(),
            self.b.round(),
            self.a
        )
    }
}
