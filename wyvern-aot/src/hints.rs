//! 运行期提示（runtime hints）侧信道
//!
//! 生成的代码在执行期仍然需要某些反射式访问时（例如按类型路径定位
//! 创建入口），生成过程会向调用方提供的提示注册表追加条目。注册表
//! 由外部拥有，这里只负责追加和去重。

use wyvern_core::TypePath;

/// 提示类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintCategory {
    /// 需要在执行期实例化该类型
    Instantiate,
    /// 需要调用该类型上的函数
    Invoke,
    /// 只需要读取类型信息
    Inspect,
}

/// 单条类型提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHint {
    type_path: TypePath,
    category: HintCategory,
}

impl TypeHint {
    pub fn type_path(&self) -> &TypePath {
        &self.type_path
    }

    pub fn category(&self) -> HintCategory {
        self.category
    }
}

/// 反射提示注册表（保留注册顺序，重复条目跳过）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReflectionHints {
    entries: Vec<TypeHint>,
}

impl ReflectionHints {
    pub fn register_type(&mut self, type_path: impl Into<TypePath>, category: HintCategory) {
        let hint = TypeHint {
            type_path: type_path.into(),
            category,
        };
        if !self.entries.contains(&hint) {
            tracing::trace!(
                "Registering reflection hint: {} ({:?})",
                hint.type_path,
                hint.category
            );
            self.entries.push(hint);
        }
    }

    pub fn entries(&self) -> &[TypeHint] {
        &self.entries
    }

    pub fn contains(&self, type_path: &TypePath, category: HintCategory) -> bool {
        self.entries
            .iter()
            .any(|hint| hint.type_path() == type_path && hint.category() == category)
    }
}

/// 生成过程的全部运行期提示
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuntimeHints {
    reflection: ReflectionHints,
}

impl RuntimeHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reflection(&self) -> &ReflectionHints {
        &self.reflection
    }

    pub fn reflection_mut(&mut self) -> &mut ReflectionHints {
        &mut self.reflection
    }
}
