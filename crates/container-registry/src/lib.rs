//! # 参考注册表容器
//!
//! 提供一个可被完整内省的参考 DI 注册表容器，以及它的
//! [`ContainerIntrospection`](audit_abstractions::ContainerIntrospection)
//! 适配器实现。
//!
//! ## 核心类型
//!
//! - [`RegistryContainer`] - 注册表容器
//! - [`Registration`] - 注册描述构建器
//! - [`ActivationObserver`] - 激活观察者钩子
//! - [`RegistryIntrospection`] - 容器内省适配器
//!
//! ## 内省方式
//!
//! 容器的公开绑定列表不展示内部合成绑定。适配器通过临时安装
//! 激活观察者并执行一次探测解析来枚举全部绑定，观察者守卫保证
//! 钩子在所有退出路径上被卸载

pub mod container;
pub mod introspection;
pub mod observer;
pub mod scopes;

pub use container::*;
pub use introspection::*;
pub use observer::*;
