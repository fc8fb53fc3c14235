//! 作用域标记
//!
//! 提供不透明的生命周期策略标记

/// 无作用域时的展示标签
///
/// 仅用于消息呈现，不是数据模型中的作用域值
pub const TRANSIENT_LABEL: &str = "transient";

/// 作用域标记
///
/// 标识一种生命周期策略（例如单例、每请求一次）。
/// 核心不对具体标记赋予任何语义，比较仅发生在相等性判断
/// 和调用方提供的兼容规则中
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeToken {
    /// 作用域名称
    name: String,
}

impl ScopeToken {
    /// 创建新的作用域标记
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// 获取作用域名称
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for ScopeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// 获取作用域的展示标签
///
/// 缺失的作用域显示为 [`TRANSIENT_LABEL`]
pub fn scope_label(scope: Option<&ScopeToken>) -> &str {
    scope.map_or(TRANSIENT_LABEL, ScopeToken::name)
}
