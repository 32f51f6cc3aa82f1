//! 组件基础接口定义
//!
//! 提供所有流水线组件必须实现的基础 trait

use std::fmt::Debug;

/// 组件基础 trait
///
/// 所有流水线组件都必须实现此 trait
pub trait Component: Send + Sync + Debug + 'static {
    /// 组件名称
    fn name(&self) -> &'static str;
}
