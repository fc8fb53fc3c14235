//! # Audit Common
//!
//! 这个 crate 提供了 Lorn ScopeAudit 的公共数据模型和错误类型。
//!
//! ## 核心类型
//!
//! - [`ServiceType`] - 已注册服务契约的类型标识
//! - [`ScopeToken`] - 不透明的作用域标记
//! - [`Violation`] - 单条作用域违规记录
//! - [`AuditError`] - 审计失败的统一错误类型
//!
//! ## 设计原则
//!
//! - 作用域仅作为不透明标记比较，语义完全由调用方规则定义
//! - 违规以聚合方式一次性上报，不做局部恢复
//! - 所有数据在单次校验调用内构建并随结果丢弃

pub mod errors;
pub mod metadata;
pub mod scope;

pub use errors::*;
pub use metadata::*;
pub use scope::*;
