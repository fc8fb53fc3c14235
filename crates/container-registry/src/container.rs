//! 注册表容器实现
//!
//! 提供绑定注册、延迟工厂合成和探测解析能力

use crate::observer::{ActivationObserver, ObserverGuard};
use audit_common::{ScopeToken, ServiceType};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// 延迟工厂伪类型包装
///
/// 表示"按需产出一个 T"而非"T 本身"。注册延迟工厂时容器会
/// 合成一个以此类型为键的内部伪绑定
pub struct Deferred<T: ?Sized> {
    _marker: PhantomData<T>,
}

/// 绑定记录
///
/// 容器对"如何构造一个服务类型"的完整描述
#[derive(Debug, Clone)]
pub struct BindingRecord {
    /// 绑定ID
    id: Uuid,
    /// 服务类型
    service_type: ServiceType,
    /// 声明的作用域
    scope: Option<ScopeToken>,
    /// 构造注入计划（`None` 表示构造由外部系统管理，规划器无法解析）
    plan: Option<Vec<ServiceType>>,
    /// 是否为延迟工厂伪绑定
    deferred_factory: bool,
    /// 是否为内部合成绑定（公开列表不展示）
    internal: bool,
    /// 注册时间
    registered_at: DateTime<Utc>,
    /// 自定义属性
    properties: HashMap<String, String>,
}

impl BindingRecord {
    /// 获取绑定ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 获取服务类型
    pub fn service_type(&self) -> &ServiceType {
        &self.service_type
    }

    /// 获取声明的作用域
    pub fn scope(&self) -> Option<&ScopeToken> {
        self.scope.as_ref()
    }

    /// 获取构造注入计划
    pub fn plan(&self) -> Option<&[ServiceType]> {
        self.plan.as_deref()
    }

    /// 是否为延迟工厂伪绑定
    pub fn is_deferred_factory(&self) -> bool {
        self.deferred_factory
    }

    /// 是否为内部合成绑定
    pub fn is_internal(&self) -> bool {
        self.internal
    }

    /// 获取注册时间
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// 获取自定义属性
    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }
}

/// 注册描述
///
/// 使用建造者模式描述一条待注册的绑定
pub struct Registration {
    service_type: ServiceType,
    deferred_type: ServiceType,
    scope: Option<ScopeToken>,
    plan: Option<Vec<ServiceType>>,
    offer_deferred: bool,
    properties: HashMap<String, String>,
}

impl Registration {
    /// 为指定类型创建注册描述
    ///
    /// 默认无作用域、空构造计划、不提供延迟工厂
    pub fn for_type<T: 'static>() -> Self {
        Self {
            service_type: ServiceType::of::<T>(),
            deferred_type: ServiceType::of::<Deferred<T>>(),
            scope: None,
            plan: Some(Vec::new()),
            offer_deferred: false,
            properties: HashMap::new(),
        }
    }

    /// 设置作用域
    pub fn with_scope(mut self, scope: ScopeToken) -> Self {
        self.scope = Some(scope);
        self
    }

    /// 声明一个构造依赖
    pub fn depends_on<D: 'static>(mut self) -> Self {
        if let Some(plan) = self.plan.as_mut() {
            plan.push(ServiceType::of::<D>());
        }
        self
    }

    /// 标记构造由外部系统管理
    ///
    /// 此类绑定没有可解析的构造计划，内省查询其计划会失败
    pub fn externally_constructed(mut self) -> Self {
        self.plan = None;
        self
    }

    /// 同时提供延迟工厂
    ///
    /// 容器将额外合成一个内部 `Deferred<T>` 伪绑定
    pub fn with_deferred_factory(mut self) -> Self {
        self.offer_deferred = true;
        self
    }

    /// 添加自定义属性
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// 容器内部状态
#[derive(Debug, Default)]
struct RegistryState {
    /// 全部绑定记录，保持注册顺序
    records: Vec<BindingRecord>,
    /// 未显式注册类型的默认作用域
    default_scope: Option<ScopeToken>,
}

/// 注册表容器
///
/// 同步的参考容器实现。绑定一经注册即不可变；校验运行期间
/// 不得并发修改容器配置
pub struct RegistryContainer {
    /// 注册状态
    state: RwLock<RegistryState>,
    /// 已安装的激活观察者
    observers: DashMap<Uuid, Arc<dyn ActivationObserver>>,
}

impl RegistryContainer {
    /// 创建新的容器
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            observers: DashMap::new(),
        }
    }

    /// 设置未显式注册类型的默认作用域
    pub fn set_default_scope(&self, scope: Option<ScopeToken>) {
        self.state.write().default_scope = scope;
    }

    /// 获取默认作用域
    pub fn default_scope(&self) -> Option<ScopeToken> {
        self.state.read().default_scope.clone()
    }

    /// 注册一条绑定
    ///
    /// 同一服务类型允许注册多条绑定，全部保留。
    /// 返回新绑定的ID
    pub fn register(&self, registration: Registration) -> Uuid {
        let record = BindingRecord {
            id: Uuid::new_v4(),
            service_type: registration.service_type,
            scope: registration.scope,
            plan: registration.plan,
            deferred_factory: false,
            internal: false,
            registered_at: Utc::now(),
            properties: registration.properties,
        };
        let id = record.id;
        info!("注册绑定: {}", record.service_type);

        let mut state = self.state.write();
        if registration.offer_deferred {
            let deferred = BindingRecord {
                id: Uuid::new_v4(),
                service_type: registration.deferred_type,
                scope: None,
                plan: None,
                deferred_factory: true,
                internal: true,
                registered_at: record.registered_at,
                properties: HashMap::new(),
            };
            debug!("合成内部延迟工厂绑定: {}", deferred.service_type);
            state.records.push(deferred);
        }
        state.records.push(record);
        id
    }

    /// 获取公开绑定列表
    ///
    /// 不包含内部合成绑定
    pub fn bindings(&self) -> Vec<BindingRecord> {
        self.state
            .read()
            .records
            .iter()
            .filter(|record| !record.internal)
            .cloned()
            .collect()
    }

    /// 查找服务类型的当前生效绑定（最后注册的一条）
    pub fn record_for(&self, service: &ServiceType) -> Option<BindingRecord> {
        self.state
            .read()
            .records
            .iter()
            .rev()
            .find(|record| record.service_type() == service)
            .cloned()
    }

    /// 安装激活观察者
    ///
    /// 返回的守卫在丢弃时卸载观察者，保证临时钩子在所有
    /// 退出路径上被移除
    pub fn install_observer(&self, observer: Arc<dyn ActivationObserver>) -> ObserverGuard<'_> {
        let id = Uuid::new_v4();
        self.observers.insert(id, observer);
        debug!("安装激活观察者: {id}");
        ObserverGuard::new(self, id)
    }

    /// 卸载激活观察者
    pub(crate) fn uninstall_observer(&self, id: Uuid) {
        self.observers.remove(&id);
        debug!("卸载激活观察者: {id}");
    }

    /// 当前安装的观察者数量
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// 执行一次探测解析
    ///
    /// 按注册顺序把每条绑定（包括内部合成绑定）报告给全部
    /// 已安装的观察者，不构造任何实例
    pub fn probe_activations(&self) {
        let records = self.state.read().records.clone();
        debug!("探测解析: {} 条绑定", records.len());
        for record in &records {
            for observer in self.observers.iter() {
                observer.value().on_activation(record);
            }
        }
    }
}

impl Default for RegistryContainer {
    fn default() -> Self {
        Self::new()
    }
}
