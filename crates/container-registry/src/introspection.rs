//! 容器内省适配器
//!
//! 通过临时激活观察者枚举容器的全部绑定，包括公开 API
//! 不展示的内部合成绑定

use crate::container::{BindingRecord, RegistryContainer};
use crate::observer::ActivationObserver;
use audit_abstractions::ContainerIntrospection;
use audit_common::{IntrospectionError, IntrospectionResult, ScopeToken, ServiceType};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// 作用域解析上下文
///
/// 容器作用域配置在校验开始时的一次性快照
#[derive(Debug, Clone)]
pub struct RegistryContext {
    /// 快照时的默认作用域
    default_scope: Option<ScopeToken>,
    /// 快照时间
    captured_at: DateTime<Utc>,
}

impl RegistryContext {
    /// 获取快照时间
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

/// 把激活记录写入本地缓冲区的探测观察者
///
/// 缓冲区在构造时传入，捕获结果不经过任何进程级共享状态
struct CapturingObserver {
    output: Arc<Mutex<Vec<BindingRecord>>>,
}

impl ActivationObserver for CapturingObserver {
    fn on_activation(&self, record: &BindingRecord) {
        self.output.lock().push(record.clone());
    }
}

/// 注册表容器的内省适配器
pub struct RegistryIntrospection<'a> {
    container: &'a RegistryContainer,
}

impl<'a> RegistryIntrospection<'a> {
    /// 为容器创建内省适配器
    pub fn new(container: &'a RegistryContainer) -> Self {
        Self { container }
    }
}

impl ContainerIntrospection for RegistryIntrospection<'_> {
    type Binding = BindingRecord;
    type Context = RegistryContext;

    /// 枚举全部绑定
    ///
    /// 安装临时观察者并执行一次探测解析；观察者守卫保证钩子
    /// 在枚举结束或中途失败时都被卸载
    fn enumerate_registrations(
        &self,
    ) -> IntrospectionResult<Vec<(ServiceType, Self::Binding)>> {
        let captured = Arc::new(Mutex::new(Vec::new()));
        {
            let _guard = self.container.install_observer(Arc::new(CapturingObserver {
                output: Arc::clone(&captured),
            }));
            self.container.probe_activations();
        }

        let records = std::mem::take(&mut *captured.lock());
        debug!("内省枚举到 {} 条绑定", records.len());
        Ok(records
            .into_iter()
            .map(|record| (record.service_type().clone(), record))
            .collect())
    }

    fn resolution_context(&self) -> IntrospectionResult<Self::Context> {
        Ok(RegistryContext {
            default_scope: self.container.default_scope(),
            captured_at: Utc::now(),
        })
    }

    fn resolve_scope(
        &self,
        binding: &Self::Binding,
        _context: &Self::Context,
    ) -> IntrospectionResult<Option<ScopeToken>> {
        // 本容器的绑定作用域在注册时即固定，无需额外上下文
        Ok(binding.scope().cloned())
    }

    fn constructor_dependencies(
        &self,
        service: &ServiceType,
    ) -> IntrospectionResult<BTreeSet<ServiceType>> {
        let record = self.container.record_for(service).ok_or_else(|| {
            IntrospectionError::plan_unavailable(service.name(), "类型未注册")
        })?;
        record
            .plan()
            .map(|plan| plan.iter().cloned().collect())
            .ok_or_else(|| {
                IntrospectionError::plan_unavailable(
                    service.name(),
                    "构造由外部系统管理，没有可解析的构造计划",
                )
            })
    }

    fn default_scope(&self, context: &Self::Context) -> Option<ScopeToken> {
        context.default_scope.clone()
    }

    /// 基于绑定记录的结构化能力标记判断，而非类型名前缀
    fn is_deferred_factory(&self, service: &ServiceType) -> bool {
        self.container
            .record_for(service)
            .is_some_and(|record| record.is_deferred_factory())
    }
}
