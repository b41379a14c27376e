//! 统一错误处理模块
//!
//! 粒子模拟本身不产生错误：数值边界通过截断处理，生命值为负即死亡信号。
//! 这里的错误类型只覆盖外围设施（配置加载、无头运行器）。

use crate::config::ConfigError;
use thiserror::Error;

/// 模拟运行错误类型
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// 模拟结果类型别名
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let config_err = ConfigError::ValidationError("min_vel > max_vel".to_string());
        let err: SimulationError = config_err.into();
        assert!(matches!(err, SimulationError::Config(_)));
        assert!(err.to_string().contains("min_vel > max_vel"));
    }
}
