/// 统一配置系统
///
/// 提供TOML/JSON配置文件、环境变量覆盖和验证
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod emitter;

pub use emitter::{EmitterConfig, SpriteConfig};

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 模拟主配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimulationConfig {
    /// 帧配置
    #[serde(default)]
    pub frame: FrameConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,

    /// 发射器列表
    #[serde(default)]
    pub emitters: Vec<EmitterConfig>,
}

impl SimulationConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 按扩展名加载（`.json` 走JSON，其余走TOML）
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("PARTICLES_FRAME_DELTA_MS") {
            if let Ok(delta) = val.parse() {
                self.frame.delta_ms = delta;
            }
        }
        if let Ok(val) = env::var("PARTICLES_FRAME_COUNT") {
            if let Ok(frames) = val.parse() {
                self.frame.frames = frames;
            }
        }
        if let Ok(val) = env::var("PARTICLES_LOG_LEVEL") {
            if let Some(level) = LogLevel::parse(&val) {
                self.logging.level = level;
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.frame.validate()?;
        for (i, emitter) in self.emitters.iter().enumerate() {
            emitter.validate().map_err(|e| match e {
                ConfigError::ValidationError(msg) => {
                    ConfigError::ValidationError(format!("emitter[{}] {}: {}", i, emitter.name, msg))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./particles.toml
    /// 2. ./particles.json
    /// 3. ~/.config/particle_engine/particles.toml
    /// 4. 使用默认配置
    ///
    /// 返回配置及其来源路径（默认配置时为 `None`）。此时日志系统通常尚未初始化，
    /// 由调用方在初始化之后记录来源。
    pub fn load_or_default() -> (Self, Option<PathBuf>) {
        let mut candidates = vec![PathBuf::from("particles.toml"), PathBuf::from("particles.json")];
        if let Some(home) = env::var_os("HOME") {
            candidates.push(
                PathBuf::from(home)
                    .join(".config")
                    .join("particle_engine")
                    .join("particles.toml"),
            );
        }
        Self::load_first(&candidates)
    }

    /// 依次尝试候选路径，返回第一个能成功加载的配置
    pub fn load_first(candidates: &[PathBuf]) -> (Self, Option<PathBuf>) {
        for path in candidates {
            if let Ok(config) = Self::from_file(path) {
                return (config, Some(path.clone()));
            }
        }
        (Self::default(), None)
    }
}

/// 帧配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    /// 每帧时间（毫秒）
    pub delta_ms: f32,
    /// 无头运行的帧数
    pub frames: u32,
    /// 每隔多少帧输出一次统计（0 表示不输出）
    #[serde(default)]
    pub report_interval: u32,
}

use crate::impl_default;

impl_default!(FrameConfig {
    delta_ms: 16.0,
    frames: 600,
    report_interval: 60,
});

impl FrameConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.delta_ms.is_finite() || self.delta_ms < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "Invalid frame delta: {}",
                self.delta_ms
            )));
        }
        Ok(())
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别（`RUST_LOG` 优先）
    pub level: LogLevel,
}

impl_default!(LoggingConfig {
    level: LogLevel::Info,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl LogLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// EnvFilter 指令字符串
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.frame.delta_ms, 16.0);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = SimulationConfig::default();
        config.emitters.push(EmitterConfig {
            name: "smoke".to_string(),
            emitting: true,
            emit_rate: 12.0,
            ..Default::default()
        });
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: SimulationConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_json_serialization() {
        let config = SimulationConfig::default();
        let json_str = serde_json::to_string(&config).unwrap();
        let parsed = SimulationConfig::from_json_str(&json_str).unwrap();
        assert_eq!(config.frame, parsed.frame);
    }

    #[test]
    fn test_parse_error() {
        let err = SimulationConfig::from_toml_str("frame = 3").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validate_reports_emitter_index() {
        let mut config = SimulationConfig::default();
        config.emitters.push(EmitterConfig {
            name: "bad".to_string(),
            min_size: 10.0,
            max_size: 1.0,
            ..Default::default()
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("emitter[0] bad"));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("particles.toml");
        let config = SimulationConfig::default();
        config.save_toml(&path).unwrap();
        let loaded = SimulationConfig::from_file(&path).unwrap();
        assert_eq!(config, loaded);

        let json_path = dir.path().join("particles.json");
        config.save_json(&json_path).unwrap();
        let loaded = SimulationConfig::from_file(&json_path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_first_reports_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("particles.toml");
        let json_path = dir.path().join("particles.json");

        let mut config = SimulationConfig::default();
        config.frame.frames = 7;
        config.save_json(&json_path).unwrap();

        let (loaded, source) =
            SimulationConfig::load_first(&[missing.clone(), json_path.clone()]);
        assert_eq!(loaded.frame.frames, 7);
        assert_eq!(source, Some(json_path));

        let (fallback, source) = SimulationConfig::load_first(&[missing]);
        assert_eq!(fallback, SimulationConfig::default());
        assert!(source.is_none());
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("verbose"), None);
        assert_eq!(LogLevel::Warn.as_filter(), "warn");
    }
}
