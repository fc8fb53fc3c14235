//! 容器内省抽象接口
//!
//! 提供读取容器全部绑定、作用域和构造依赖的能力

use audit_common::{IntrospectionResult, ScopeToken, ServiceType};
use std::collections::BTreeSet;

/// 延迟工厂伪类型的命名约定前缀
///
/// [`ContainerIntrospection::is_deferred_factory`] 的默认实现按此前缀
/// 匹配简短类型名。仅作为回退手段保留，适配器应当基于绑定的结构化
/// 能力信息覆盖该方法
pub const DEFERRED_FACTORY_PREFIX: &str = "Deferred<";

/// 容器内省提供者 trait
///
/// 每种目标容器实现一个适配器。校验核心只通过此接口读取容器，
/// 对具体容器的注册 API 一无所知
pub trait ContainerIntrospection: Send + Sync {
    /// 绑定记录类型
    type Binding;

    /// 作用域解析上下文类型
    type Context;

    /// 枚举全部已注册的服务类型及其绑定
    ///
    /// 必须包含容器公开 API 不展示的绑定（例如内部合成绑定）。
    /// 若容器的枚举需要临时安装内省钩子，适配器必须保证钩子在
    /// 所有退出路径上被移除
    fn enumerate_registrations(&self) -> IntrospectionResult<Vec<(ServiceType, Self::Binding)>>;

    /// 构建可直接查询的作用域解析上下文
    ///
    /// 作用域解析可能依赖容器的上下文状态，上下文在每次校验
    /// 开始时构建一次
    fn resolution_context(&self) -> IntrospectionResult<Self::Context>;

    /// 解析绑定声明的作用域
    ///
    /// 返回 `None` 表示该绑定没有显式作用域
    fn resolve_scope(
        &self,
        binding: &Self::Binding,
        context: &Self::Context,
    ) -> IntrospectionResult<Option<ScopeToken>>;

    /// 获取类型的构造注入计划
    ///
    /// 返回构造一个实例所需的全部参数类型，重复类型合并。
    /// 类型没有可解析的构造计划时返回错误
    fn constructor_dependencies(
        &self,
        service: &ServiceType,
    ) -> IntrospectionResult<BTreeSet<ServiceType>>;

    /// 获取未显式注册类型的默认作用域
    ///
    /// 容器未定义默认作用域时返回 `None`
    fn default_scope(&self, context: &Self::Context) -> Option<ScopeToken>;

    /// 判断类型是否为延迟工厂伪类型
    ///
    /// 此类伪绑定表示"按需产出 X 的工厂"而非"X 本身"，其作用域
    /// 语义对本分析无意义，且查询其构造计划可能直接失败，
    /// 因此在图构建阶段整体跳过
    fn is_deferred_factory(&self, service: &ServiceType) -> bool {
        service.short_name().starts_with(DEFERRED_FACTORY_PREFIX)
    }
}
