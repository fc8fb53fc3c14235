//! 本容器的作用域分类
//!
//! 这是注册表容器自身定义的作用域标记集合。审计核心不感知
//! 这些语义，判定完全由调用方的兼容规则完成；瞬时（transient）
//! 没有标记，以作用域缺失表示

use audit_common::ScopeToken;

/// 单例作用域：整个容器生命周期内只创建一个实例
pub fn singleton() -> ScopeToken {
    ScopeToken::new("singleton")
}

/// 请求作用域：同一工作单元内共享实例
pub fn request() -> ScopeToken {
    ScopeToken::new("request")
}
