//! 服务类型标识
//!
//! 提供已注册服务契约的类型元数据

use std::any::TypeId;

/// 服务类型标识
///
/// 作为依赖关系图的键使用，相等性遵循类型同一性
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceType {
    /// 完整类型名称
    name: String,
    /// 类型ID
    id: TypeId,
}

impl ServiceType {
    /// 从类型获取服务类型标识
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            name: std::any::type_name::<T>().to_string(),
            id: TypeId::of::<T>(),
        }
    }

    /// 获取完整类型名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 获取类型ID
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// 获取简短类型名称（不包含模块路径，保留泛型参数）
    pub fn short_name(&self) -> &str {
        let head = self.name.split('<').next().unwrap_or(&self.name);
        let start = head.rfind("::").map_or(0, |idx| idx + 2);
        &self.name[start..]
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
