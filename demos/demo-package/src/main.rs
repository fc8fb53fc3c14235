//! # 被俘获依赖审计演示
//!
//! 演示完整的审计流程，包括：
//! - 配置一个带有被俘获依赖的注册表容器
//! - 提供调用方自定义的作用域兼容规则
//! - 运行校验并输出聚合的违规报告

use audit_common::ScopeToken;
use audit_impl::CaptiveDependencyValidator;
use container_registry::{scopes, Registration, RegistryContainer, RegistryIntrospection};
use tracing::{info, warn};

// ========== 示例服务 ==========

/// 配置仓储（单例）
struct ConfigStore;

/// 请求处理器（单例，持有一个瞬时依赖 —— 有意配置错误）
struct RequestHandler;

/// 审计日志（瞬时）
struct AuditLog;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("=== 被俘获依赖审计演示 ===");

    let container = RegistryContainer::new();
    container.register(Registration::for_type::<ConfigStore>().with_scope(scopes::singleton()));
    container.register(
        Registration::for_type::<RequestHandler>()
            .with_scope(scopes::singleton())
            .depends_on::<ConfigStore>()
            .depends_on::<AuditLog>(),
    );
    container.register(Registration::for_type::<AuditLog>());

    // 调用方规则：单例持有无作用域依赖即视为被俘获
    let singleton = scopes::singleton();
    let rule = move |service: Option<&ScopeToken>, dependency: Option<&ScopeToken>| {
        service == Some(&singleton) && dependency.is_none()
    };

    let validator = CaptiveDependencyValidator::new(RegistryIntrospection::new(&container), rule);
    match validator.validate() {
        Ok(()) => info!("容器作用域配置无违规"),
        Err(err) => {
            warn!("审计发现配置错误:");
            for line in err.to_string().lines() {
                warn!("  {line}");
            }
        }
    }

    Ok(())
}
