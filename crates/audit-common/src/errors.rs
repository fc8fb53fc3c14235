//! 错误类型定义

use crate::metadata::ServiceType;
use crate::scope::{scope_label, ScopeToken};
use thiserror::Error;

/// 内省错误类型
///
/// 容器内省无法为某个已注册且未被过滤的类型产出元数据时的
/// 致命错误，立即终止本次校验，不重试
#[derive(Error, Debug)]
pub enum IntrospectionError {
    #[error("无法获取构造计划: {type_name}, 原因: {message}")]
    PlanUnavailable { type_name: String, message: String },

    #[error("作用域解析失败: {type_name}, 原因: {message}")]
    ScopeResolutionFailed { type_name: String, message: String },

    #[error("注册信息枚举失败: {message}")]
    EnumerationFailed { message: String },

    #[error("解析上下文不可用: {message}")]
    ContextUnavailable { message: String },
}

impl IntrospectionError {
    /// 创建构造计划缺失错误
    pub fn plan_unavailable(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PlanUnavailable {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// 创建作用域解析失败错误
    pub fn scope_resolution_failed(
        type_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ScopeResolutionFailed {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// 创建枚举失败错误
    pub fn enumeration_failed(message: impl Into<String>) -> Self {
        Self::EnumerationFailed {
            message: message.into(),
        }
    }

    /// 创建上下文不可用错误
    pub fn context_unavailable(message: impl Into<String>) -> Self {
        Self::ContextUnavailable {
            message: message.into(),
        }
    }
}

/// 单条作用域违规记录
///
/// 记录一条 (服务, 依赖) 边以及双方的作用域
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// 持有依赖的服务类型
    pub service_type: ServiceType,
    /// 被持有的依赖类型
    pub dependency_type: ServiceType,
    /// 服务声明的作用域
    pub service_scope: Option<ScopeToken>,
    /// 依赖声明的作用域
    pub dependency_scope: Option<ScopeToken>,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Service {} with scope {} depends on {} with scope {}",
            self.service_type,
            scope_label(self.service_scope.as_ref()),
            self.dependency_type,
            scope_label(self.dependency_scope.as_ref()),
        )
    }
}

/// 作用域违规汇总错误
///
/// 一次校验中发现的全部违规以单个错误聚合上报，
/// 调用方既可读取多行消息也可遍历结构化的违规列表
#[derive(Debug)]
pub struct ScopeViolationError {
    violations: Vec<Violation>,
}

impl ScopeViolationError {
    /// 创建新的违规汇总错误
    ///
    /// 违规列表保持扫描产出的顺序
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// 获取全部违规记录
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// 获取违规数量
    pub fn count(&self) -> usize {
        self.violations.len()
    }
}

impl std::fmt::Display for ScopeViolationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scope validation failed: {} captive dependency violation(s)",
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "\n{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ScopeViolationError {}

/// 审计错误类型
///
/// `validate()` 的统一失败面：要么是聚合的作用域违规，
/// 要么是致命的内省错误
#[derive(Error, Debug)]
pub enum AuditError {
    #[error(transparent)]
    ScopeViolation(#[from] ScopeViolationError),

    #[error(transparent)]
    Introspection(#[from] IntrospectionError),
}

impl AuditError {
    /// 获取违规记录（仅当失败原因是作用域违规时）
    pub fn violations(&self) -> Option<&[Violation]> {
        match self {
            Self::ScopeViolation(err) => Some(err.violations()),
            Self::Introspection(_) => None,
        }
    }
}

/// 结果类型别名
pub type AuditResult<T> = Result<T, AuditError>;
pub type IntrospectionResult<T> = Result<T, IntrospectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    struct ServiceA;
    struct ServiceB;

    fn violation() -> Violation {
        Violation {
            service_type: ServiceType::of::<ServiceA>(),
            dependency_type: ServiceType::of::<ServiceB>(),
            service_scope: Some(ScopeToken::new("singleton")),
            dependency_scope: None,
        }
    }

    #[test]
    fn test_violation_message_uses_transient_label() {
        let message = violation().to_string();
        assert!(message.starts_with("Service "));
        assert!(message.contains("with scope singleton"));
        assert!(message.ends_with("with scope transient"));
    }

    #[test]
    fn test_aggregate_message_lists_every_violation() {
        let err = ScopeViolationError::new(vec![violation(), violation()]);
        let message = err.to_string();
        assert!(message.starts_with("scope validation failed: 2 captive dependency violation(s)"));
        assert_eq!(message.lines().count(), 3);
    }

    #[test]
    fn test_audit_error_exposes_structured_violations() {
        let err = AuditError::from(ScopeViolationError::new(vec![violation()]));
        assert_eq!(err.violations().map(<[Violation]>::len), Some(1));

        let err = AuditError::from(IntrospectionError::enumeration_failed("boom"));
        assert!(err.violations().is_none());
    }
}
