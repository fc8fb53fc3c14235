//! 作用域兼容规则抽象接口
//!
//! 提供判定作用域组合是否构成被俘获依赖的能力

use audit_common::ScopeToken;

/// 作用域兼容规则 trait
///
/// 由调用方提供："无效"的含义完全取决于宿主容器的作用域分类，
/// 核心没有任何内建的"谁活得更久"概念。`None` 表示一方没有
/// 显式作用域
pub trait ScopeCompatibilityRule: Send + Sync {
    /// 判断该作用域组合是否构成被俘获依赖
    fn is_captive(
        &self,
        service_scope: Option<&ScopeToken>,
        dependency_scope: Option<&ScopeToken>,
    ) -> bool;
}

impl<F> ScopeCompatibilityRule for F
where
    F: Fn(Option<&ScopeToken>, Option<&ScopeToken>) -> bool + Send + Sync,
{
    fn is_captive(
        &self,
        service_scope: Option<&ScopeToken>,
        dependency_scope: Option<&ScopeToken>,
    ) -> bool {
        self(service_scope, dependency_scope)
    }
}
