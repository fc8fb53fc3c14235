//! # 被俘获依赖校验实现
//!
//! 提供依赖关系图构建、违规扫描和顶层校验入口的具体实现。
//!
//! ## 校验流程
//!
//! 1. [`DependencyMapBuilder`] 消费容器内省输出，构建依赖关系图
//! 2. [`ViolationScanner`] 对每条 (服务, 依赖) 边应用兼容规则
//! 3. [`CaptiveDependencyValidator`] 聚合结果：无违规静默成功，
//!    否则以单个错误携带完整违规列表失败

pub mod graph;
pub mod scanner;
pub mod validator;

pub use graph::*;
pub use scanner::*;
pub use validator::*;
