//! Centralized integration tests for the captive dependency audit
use audit_common::{AuditError, IntrospectionError, ScopeToken, ServiceType};
use audit_impl::CaptiveDependencyValidator;
use container_registry::{
    scopes, Deferred, Registration, RegistryContainer, RegistryIntrospection,
};

/// 测试服务
struct ConfigStore;
struct RequestHandler;
struct AuditLog;
struct SessionCache;
struct Renderer;

/// 单例持有无作用域依赖即违规
fn captive_rule(service: Option<&ScopeToken>, dependency: Option<&ScopeToken>) -> bool {
    service == Some(&scopes::singleton()) && dependency.is_none()
}

fn validator(
    container: &RegistryContainer,
) -> CaptiveDependencyValidator<RegistryIntrospection<'_>, fn(Option<&ScopeToken>, Option<&ScopeToken>) -> bool> {
    CaptiveDependencyValidator::new(RegistryIntrospection::new(container), captive_rule)
}

#[test]
fn test_clean_container_validates() {
    let container = RegistryContainer::new();
    container.register(Registration::for_type::<ConfigStore>().with_scope(scopes::singleton()));
    container.register(
        Registration::for_type::<RequestHandler>()
            .with_scope(scopes::singleton())
            .depends_on::<ConfigStore>(),
    );

    assert!(validator(&container).validate().is_ok());
}

#[test]
fn test_singleton_over_transient_fails_with_one_violation() {
    let container = RegistryContainer::new();
    container.register(
        Registration::for_type::<RequestHandler>()
            .with_scope(scopes::singleton())
            .depends_on::<AuditLog>(),
    );
    container.register(Registration::for_type::<AuditLog>());

    let err = validator(&container).validate().unwrap_err();
    let violations = err.violations().expect("应为作用域违规");
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].service_type,
        ServiceType::of::<RequestHandler>()
    );
    assert_eq!(violations[0].dependency_type, ServiceType::of::<AuditLog>());
    assert_eq!(violations[0].service_scope, Some(scopes::singleton()));
    assert_eq!(violations[0].dependency_scope, None);
}

#[test]
fn test_failure_message_enumerates_every_violation() {
    let container = RegistryContainer::new();
    container.register(
        Registration::for_type::<RequestHandler>()
            .with_scope(scopes::singleton())
            .depends_on::<AuditLog>()
            .depends_on::<SessionCache>(),
    );
    container.register(Registration::for_type::<AuditLog>());
    container.register(Registration::for_type::<SessionCache>());

    let err = validator(&container).validate().unwrap_err();
    let message = err.to_string();
    let mut lines = message.lines();

    let summary = lines.next().expect("缺少汇总行");
    assert!(summary.contains("2 captive dependency violation(s)"));
    for line in lines {
        assert!(line.starts_with("Service "));
        assert!(line.contains("with scope singleton depends on "));
        assert!(line.ends_with("with scope transient"));
    }
}

#[test]
fn test_unregistered_dependency_scored_by_default_scope() {
    let container = RegistryContainer::new();
    container.register(
        Registration::for_type::<Renderer>()
            .with_scope(scopes::singleton())
            .depends_on::<SessionCache>(),
    );
    // SessionCache 从未注册，默认作用域为空：按无作用域参与判定
    let err = validator(&container).validate().unwrap_err();
    let violations = err.violations().expect("应为作用域违规");
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].dependency_type,
        ServiceType::of::<SessionCache>()
    );

    // 容器定义默认作用域后，未注册依赖不再按无作用域判定
    container.set_default_scope(Some(scopes::request()));
    assert!(validator(&container).validate().is_ok());
}

#[test]
fn test_violation_count_matches_flagged_edges() {
    let container = RegistryContainer::new();
    container.register(
        Registration::for_type::<RequestHandler>()
            .with_scope(scopes::singleton())
            .depends_on::<AuditLog>()
            .depends_on::<ConfigStore>(),
    );
    container.register(
        Registration::for_type::<Renderer>()
            .with_scope(scopes::singleton())
            .depends_on::<AuditLog>(),
    );
    container.register(Registration::for_type::<AuditLog>());
    container.register(Registration::for_type::<ConfigStore>().with_scope(scopes::singleton()));

    let err = validator(&container).validate().unwrap_err();
    // 两条被标记的边：RequestHandler -> AuditLog 与 Renderer -> AuditLog
    assert_eq!(err.violations().map(<[_]>::len), Some(2));
}

#[test]
fn test_deferred_factory_pseudo_types_are_filtered() {
    let container = RegistryContainer::new();
    // 合成的 Deferred<ConfigStore> 伪绑定没有构造计划：
    // 若未被过滤，图构建会以内省失败终止
    container.register(
        Registration::for_type::<ConfigStore>()
            .with_scope(scopes::singleton())
            .with_deferred_factory(),
    );

    assert!(validator(&container).validate().is_ok());
}

#[test]
fn test_pseudo_type_may_appear_as_dependency_of_real_service() {
    let container = RegistryContainer::new();
    container.register(Registration::for_type::<ConfigStore>().with_deferred_factory());
    container.register(
        Registration::for_type::<RequestHandler>()
            .with_scope(scopes::singleton())
            .depends_on::<Deferred<ConfigStore>>(),
    );

    // 伪类型自身不是图的键，但可以作为真实服务的依赖出现：
    // 未注册键按默认作用域（空）判定，本规则下构成违规
    let err = validator(&container).validate().unwrap_err();
    let violations = err.violations().expect("应为作用域违规");
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].dependency_type,
        ServiceType::of::<Deferred<ConfigStore>>()
    );
}

#[test]
fn test_plan_failure_aborts_validation() {
    let container = RegistryContainer::new();
    container.register(Registration::for_type::<ConfigStore>().externally_constructed());

    let result = validator(&container).validate();
    assert!(matches!(
        result,
        Err(AuditError::Introspection(
            IntrospectionError::PlanUnavailable { .. }
        ))
    ));
}

#[test]
fn test_validation_is_deterministic() {
    let container = RegistryContainer::new();
    container.register(
        Registration::for_type::<RequestHandler>()
            .with_scope(scopes::singleton())
            .depends_on::<AuditLog>()
            .depends_on::<SessionCache>(),
    );
    container.register(Registration::for_type::<AuditLog>());
    container.register(Registration::for_type::<SessionCache>());

    let first = validator(&container).validate().unwrap_err();
    let second = validator(&container).validate().unwrap_err();
    assert_eq!(first.violations(), second.violations());
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn test_no_observer_left_installed_after_validation() {
    let container = RegistryContainer::new();
    container.register(
        Registration::for_type::<RequestHandler>()
            .with_scope(scopes::singleton())
            .depends_on::<AuditLog>(),
    );
    container.register(Registration::for_type::<AuditLog>());

    // 失败路径同样不得遗留临时钩子
    assert!(validator(&container).validate().is_err());
    assert_eq!(container.observer_count(), 0);

    container.register(Registration::for_type::<AuditLog>().with_scope(scopes::singleton()));
    assert!(validator(&container).validate().is_ok());
    assert_eq!(container.observer_count(), 0);
}

#[test]
fn test_last_binding_wins_for_duplicate_registrations() {
    let container = RegistryContainer::new();
    container.register(
        Registration::for_type::<RequestHandler>()
            .with_scope(scopes::singleton())
            .depends_on::<AuditLog>(),
    );
    // 同一类型的第二条绑定生效：AuditLog 最终为单例
    container.register(Registration::for_type::<AuditLog>());
    container.register(Registration::for_type::<AuditLog>().with_scope(scopes::singleton()));

    assert!(validator(&container).validate().is_ok());
}
