//! 类型描述符
//!
//! 生成器不做任何反射，Bean 的类型信息以完全限定的 Rust 路径字符串形式
//! 在元数据中流转。`TypePath` 描述一个具体类型，`ResolvableType` 在其上
//! 附加泛型参数，类似 Spring 的 ResolvableType。

use std::fmt;

/// 完全限定的 Rust 类型路径，例如 `"std::string::String"`。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypePath(String);

impl TypePath {
    /// 从路径字符串创建
    pub fn of(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 路径的最后一段，例如 `"std::string::String"` -> `"String"`
    pub fn simple_name(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or(&self.0)
    }

    /// 去掉最后一段之后的模块路径，没有模块前缀时返回 `None`
    pub fn module_path(&self) -> Option<&str> {
        self.0.rsplit_once("::").map(|(module, _)| module)
    }

    /// 路径的第一段（crate 名或 `crate` 关键字）
    pub fn crate_name(&self) -> &str {
        self.0.split("::").next().unwrap_or(&self.0)
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypePath {
    fn from(path: &str) -> Self {
        Self::of(path)
    }
}

impl From<String> for TypePath {
    fn from(path: String) -> Self {
        Self::of(path)
    }
}

/// 可解析的泛型类型描述符
///
/// `NONE` 哨兵表示"无类型信息"；其余情况由类型路径加零个或多个泛型参数组成。
/// 与 Spring 的 ResolvableType 一样，只承载声明信息，不参与类型检查。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvableType {
    type_path: Option<TypePath>,
    generics: Vec<ResolvableType>,
}

impl ResolvableType {
    /// "无类型"哨兵
    pub const NONE: ResolvableType = ResolvableType {
        type_path: None,
        generics: Vec::new(),
    };

    /// 不带泛型的类型
    pub fn for_class(path: impl Into<TypePath>) -> Self {
        Self {
            type_path: Some(path.into()),
            generics: Vec::new(),
        }
    }

    /// 带泛型参数的类型
    pub fn for_class_with_generics(
        path: impl Into<TypePath>,
        generics: impl IntoIterator<Item = ResolvableType>,
    ) -> Self {
        Self {
            type_path: Some(path.into()),
            generics: generics.into_iter().collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.type_path.is_none()
    }

    pub fn type_path(&self) -> Option<&TypePath> {
        self.type_path.as_ref()
    }

    pub fn generics(&self) -> &[ResolvableType] {
        &self.generics
    }

    pub fn has_generics(&self) -> bool {
        !self.generics.is_empty()
    }

    /// 本类型及所有泛型参数是否都已解析（递归，`NONE` 视为未解析）
    pub fn is_fully_resolved(&self) -> bool {
        self.type_path.is_some() && self.generics.iter().all(ResolvableType::is_fully_resolved)
    }

    /// 第 `index` 个泛型参数，缺失时返回 `NONE`
    pub fn generic(&self, index: usize) -> ResolvableType {
        self.generics.get(index).cloned().unwrap_or(ResolvableType::NONE)
    }
}

impl From<&str> for ResolvableType {
    fn from(path: &str) -> Self {
        Self::for_class(path)
    }
}

impl From<TypePath> for ResolvableType {
    fn from(path: TypePath) -> Self {
        Self::for_class(path)
    }
}

impl fmt::Display for ResolvableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_path {
            None => f.write_str("<none>"),
            Some(path) => {
                f.write_str(path.as_str())?;
                if !self.generics.is_empty() {
                    f.write_str("<")?;
                    for (i, generic) in self.generics.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", generic)?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_path_segments() {
        let path = TypePath::of("std::string::String");
        assert_eq!(path.simple_name(), "String");
        assert_eq!(path.module_path(), Some("std::string"));
        assert_eq!(path.crate_name(), "std");

        let bare = TypePath::of("i32");
        assert_eq!(bare.simple_name(), "i32");
        assert_eq!(bare.module_path(), None);
    }

    #[test]
    fn test_none_sentinel() {
        assert!(ResolvableType::NONE.is_none());
        assert!(!ResolvableType::NONE.is_fully_resolved());
        assert_eq!(ResolvableType::NONE.to_string(), "<none>");
    }

    #[test]
    fn test_fully_resolved_requires_all_generics() {
        let map = ResolvableType::for_class_with_generics(
            "std::collections::HashMap",
            ["std::string::String".into(), ResolvableType::NONE],
        );
        assert!(map.has_generics());
        assert!(!map.is_fully_resolved());

        let list = ResolvableType::for_class_with_generics("Vec", ["i32".into()]);
        assert!(list.is_fully_resolved());
        assert_eq!(list.to_string(), "Vec<i32>");
    }

    #[test]
    fn test_generic_falls_back_to_none() {
        let list = ResolvableType::for_class_with_generics("Vec", ["i32".into()]);
        assert_eq!(list.generic(0), ResolvableType::for_class("i32"));
        assert_eq!(list.generic(1), ResolvableType::NONE);
    }
}
