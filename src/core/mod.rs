//! 核心模块
//!
//! 包含模拟的核心设施：
//! - `engine` - 无头模拟运行器和日志初始化
//! - `error` - 错误类型定义
//! - `random` - 均匀区间随机采样
//! - `macros` - 通用宏

pub mod engine;
pub mod error;
pub mod random;
#[macro_use]
pub mod macros;

// 重新导出错误类型
pub use error::{SimulationError, SimulationResult};

// 重新导出主要类型
pub use engine::Simulation;
pub use random::{FixedSampler, RandomSampler, RangeSampler};
