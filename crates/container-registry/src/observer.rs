//! 激活观察者钩子
//!
//! 提供临时内省钩子的受限安装与保证卸载

use crate::container::{BindingRecord, RegistryContainer};
use uuid::Uuid;

/// 激活观察者 trait
///
/// 探测解析期间，每条被激活的绑定都会回调一次。
/// 观察者应当把捕获结果写入构造时传入的本地缓冲区，
/// 而不是任何进程级共享状态
pub trait ActivationObserver: Send + Sync {
    /// 单条绑定被激活时回调
    fn on_activation(&self, record: &BindingRecord);
}

/// 观察者守卫
///
/// 丢弃时从容器卸载对应的观察者，保证临时钩子在所有退出
/// 路径上（包括内省中途失败）被移除
pub struct ObserverGuard<'a> {
    container: &'a RegistryContainer,
    id: Uuid,
}

impl<'a> ObserverGuard<'a> {
    /// 创建新的观察者守卫
    pub(crate) fn new(container: &'a RegistryContainer, id: Uuid) -> Self {
        Self { container, id }
    }

    /// 获取观察者ID
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Drop for ObserverGuard<'_> {
    fn drop(&mut self) {
        self.container.uninstall_observer(self.id);
    }
}
