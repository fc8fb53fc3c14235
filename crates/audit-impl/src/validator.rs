//! 顶层校验入口
//!
//! 组合图构建与违规扫描，聚合输出校验结果

use crate::graph::DependencyMapBuilder;
use crate::scanner::ViolationScanner;
use audit_abstractions::{ContainerIntrospection, ScopeCompatibilityRule};
use audit_common::{AuditResult, ScopeViolationError};
use tracing::{error, info};

/// 被俘获依赖校验器
///
/// 在所有注册完成之后、容器对外提供服务之前调用一次。
/// 整个校验是一次同步阻塞调用，全部状态在调用内构建并随结果丢弃
pub struct CaptiveDependencyValidator<P, R> {
    /// 容器内省提供者
    provider: P,
    /// 作用域兼容规则
    rule: R,
}

impl<P, R> CaptiveDependencyValidator<P, R>
where
    P: ContainerIntrospection,
    R: ScopeCompatibilityRule,
{
    /// 创建新的校验器
    pub fn new(provider: P, rule: R) -> Self {
        Self { provider, rule }
    }

    /// 执行一次完整校验
    ///
    /// 无违规时静默成功；否则以单个 [`ScopeViolationError`] 携带
    /// 完整的有序违规列表失败。内省失败立即终止并原样上抛
    pub fn validate(&self) -> AuditResult<()> {
        info!("开始容器作用域配置校验");

        let context = self.provider.resolution_context()?;
        let map = DependencyMapBuilder::new(&self.provider).build(&context)?;
        info!(
            "依赖关系图构建完成: {} 个服务, {} 个被过滤的伪类型",
            map.len(),
            map.ignored().len()
        );

        let scanner = ViolationScanner::new(&self.rule);
        let violations = scanner.scan(&map, || self.provider.default_scope(&context));

        if violations.is_empty() {
            info!("作用域配置校验通过");
            Ok(())
        } else {
            error!("作用域配置校验失败: {} 条违规", violations.len());
            Err(ScopeViolationError::new(violations).into())
        }
    }
}
