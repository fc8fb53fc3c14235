//! 依赖关系图构建
//!
//! 将容器内省输出转换为服务类型到 (作用域, 依赖集合) 的映射

use audit_abstractions::ContainerIntrospection;
use audit_common::{IntrospectionResult, ScopeToken, ServiceType};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

/// 已注册服务的图节点
///
/// 构建阶段产出后不再变更
#[derive(Debug, Clone)]
pub struct RegisteredService {
    /// 声明的作用域
    scope: Option<ScopeToken>,
    /// 构造依赖类型集合
    dependencies: BTreeSet<ServiceType>,
}

impl RegisteredService {
    /// 创建新的图节点
    pub fn new(scope: Option<ScopeToken>, dependencies: BTreeSet<ServiceType>) -> Self {
        Self {
            scope,
            dependencies,
        }
    }

    /// 获取声明的作用域
    pub fn scope(&self) -> Option<&ScopeToken> {
        self.scope.as_ref()
    }

    /// 获取构造依赖类型集合
    pub fn dependencies(&self) -> &BTreeSet<ServiceType> {
        &self.dependencies
    }
}

/// 依赖关系图
///
/// 迭代顺序保持内省枚举的到达顺序。同一服务类型出现多个绑定时
/// 取值覆盖（最后写入生效），位置保持首次出现处
#[derive(Debug, Default)]
pub struct DependencyMap {
    /// 键的到达顺序
    order: Vec<ServiceType>,
    /// 服务节点
    services: HashMap<ServiceType, RegisteredService>,
    /// 被延迟工厂过滤排除的类型
    ignored: Vec<ServiceType>,
}

impl DependencyMap {
    /// 插入或覆盖服务节点
    ///
    /// 返回是否覆盖了已有节点
    pub fn insert(&mut self, service_type: ServiceType, service: RegisteredService) -> bool {
        let replaced = self.services.insert(service_type.clone(), service).is_some();
        if !replaced {
            self.order.push(service_type);
        }
        replaced
    }

    /// 查找服务节点
    pub fn get(&self, service_type: &ServiceType) -> Option<&RegisteredService> {
        self.services.get(service_type)
    }

    /// 按到达顺序迭代全部服务节点
    pub fn iter(&self) -> impl Iterator<Item = (&ServiceType, &RegisteredService)> {
        self.order
            .iter()
            .filter_map(|service_type| {
                self.services
                    .get(service_type)
                    .map(|service| (service_type, service))
            })
    }

    /// 获取服务数量
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// 记录被过滤排除的类型
    pub fn mark_ignored(&mut self, service_type: ServiceType) {
        if !self.ignored.contains(&service_type) {
            self.ignored.push(service_type);
        }
    }

    /// 获取被过滤排除的类型
    pub fn ignored(&self) -> &[ServiceType] {
        &self.ignored
    }
}

/// 依赖关系图构建器
///
/// 消费容器内省输出，产出 [`DependencyMap`]
pub struct DependencyMapBuilder<'a, P> {
    provider: &'a P,
}

impl<'a, P: ContainerIntrospection> DependencyMapBuilder<'a, P> {
    /// 创建新的构建器
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// 构建依赖关系图
    ///
    /// 延迟工厂伪类型整体跳过：既不成为键，也不查询其构造计划。
    /// 其余类型的作用域解析或构造计划获取失败会立即终止构建
    pub fn build(&self, context: &P::Context) -> IntrospectionResult<DependencyMap> {
        let registrations = self.provider.enumerate_registrations()?;
        debug!("枚举到 {} 条注册", registrations.len());

        let mut map = DependencyMap::default();
        for (service_type, binding) in registrations {
            if self.provider.is_deferred_factory(&service_type) {
                debug!("跳过延迟工厂伪类型: {service_type}");
                map.mark_ignored(service_type);
                continue;
            }

            let scope = self.provider.resolve_scope(&binding, context)?;
            let dependencies = self.provider.constructor_dependencies(&service_type)?;
            debug!(
                "服务 {service_type} 作用域 {:?}，依赖 {} 个类型",
                scope,
                dependencies.len()
            );

            if map.insert(service_type.clone(), RegisteredService::new(scope, dependencies)) {
                warn!("服务类型存在多个绑定，后注册的绑定生效: {service_type}");
            }
        }

        Ok(map)
    }
}
