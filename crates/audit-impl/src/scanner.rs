//! 违规扫描
//!
//! 对依赖关系图的每条 (服务, 依赖) 边应用作用域兼容规则

use crate::graph::DependencyMap;
use audit_abstractions::ScopeCompatibilityRule;
use audit_common::{ScopeToken, Violation};
use tracing::debug;

/// 违规扫描器
///
/// 只检查直接构造依赖这一跳，不做传递闭包，也不处理环。
/// 扫描不修改依赖关系图
pub struct ViolationScanner<'a, R> {
    rule: &'a R,
}

impl<'a, R: ScopeCompatibilityRule> ViolationScanner<'a, R> {
    /// 创建新的扫描器
    pub fn new(rule: &'a R) -> Self {
        Self { rule }
    }

    /// 扫描依赖关系图，收集全部违规
    ///
    /// 依赖类型未在图中注册时，其作用域取自默认作用域解析器。
    /// 违规按图迭代顺序、依赖集合迭代顺序产出，无二次排序
    pub fn scan<F>(&self, map: &DependencyMap, default_scope: F) -> Vec<Violation>
    where
        F: Fn() -> Option<ScopeToken>,
    {
        let mut violations = Vec::new();
        for (service_type, service) in map.iter() {
            for dependency_type in service.dependencies() {
                let resolved;
                let dependency_scope = match map.get(dependency_type) {
                    Some(dependency) => dependency.scope(),
                    None => {
                        resolved = default_scope();
                        resolved.as_ref()
                    }
                };

                if self.rule.is_captive(service.scope(), dependency_scope) {
                    debug!("发现被俘获依赖: {service_type} -> {dependency_type}");
                    violations.push(Violation {
                        service_type: service_type.clone(),
                        dependency_type: dependency_type.clone(),
                        service_scope: service.scope().cloned(),
                        dependency_scope: dependency_scope.cloned(),
                    });
                }
            }
        }
        violations
    }
}
