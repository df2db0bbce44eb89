//! Bean 元数据中的值模型
//!
//! 从构造参数槽和属性槽可达的所有运行期值都用 `BeanValue` 表示，
//! 包括递归的内嵌 Bean 定义和受管集合。生成器按值的类别选择发射策略，
//! 生成出来的代码再通过这里的构造函数把同样的值重建出来。
//!
//! 无序集合（`set` / `map`）在构造时就按自然顺序归一化，
//! 这样结构相等和代码生成都是确定性的。

use std::cmp::Ordering;

use crate::definition::BeanDefinition;
use crate::resolvable::{ResolvableType, TypePath};

/// 限定的枚举成员引用，例如 `demo::Color::Red`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumRef {
    type_path: TypePath,
    variant: String,
}

impl EnumRef {
    pub fn of(type_path: impl Into<TypePath>, variant: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
            variant: variant.into(),
        }
    }

    pub fn type_path(&self) -> &TypePath {
        &self.type_path
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }
}

/// Bean 定义中可出现的运行期值
#[derive(Debug, Clone, PartialEq)]
pub enum BeanValue {
    Null,
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    String(String),
    Enum(EnumRef),
    Type(TypePath),
    Resolvable(ResolvableType),
    /// 定长数组，元素类型显式记录
    Array {
        element: TypePath,
        values: Vec<BeanValue>,
    },
    /// 有序列表（插入顺序）
    List(Vec<BeanValue>),
    /// `ordered=true` 保留插入顺序（LinkedHashSet 语义），
    /// `ordered=false` 在构造时已按自然顺序排序
    Set {
        ordered: bool,
        values: Vec<BeanValue>,
    },
    /// 与 `Set` 相同的有序/无序划分
    Map {
        ordered: bool,
        entries: Vec<(BeanValue, BeanValue)>,
    },
    /// 内嵌 Bean 定义
    Definition(Box<BeanDefinition>),
}

impl BeanValue {
    /// 值类别的名称，用于错误信息
    pub fn kind(&self) -> &'static str {
        match self {
            BeanValue::Null => "null",
            BeanValue::Bool(_) => "bool",
            BeanValue::Char(_) => "char",
            BeanValue::I8(_) => "i8",
            BeanValue::I16(_) => "i16",
            BeanValue::I32(_) => "i32",
            BeanValue::I64(_) => "i64",
            BeanValue::F32(_) => "f32",
            BeanValue::F64(_) => "f64",
            BeanValue::String(_) => "string",
            BeanValue::Enum(_) => "enum",
            BeanValue::Type(_) => "type",
            BeanValue::Resolvable(_) => "resolvable-type",
            BeanValue::Array { .. } => "array",
            BeanValue::List(_) => "list",
            BeanValue::Set { .. } => "set",
            BeanValue::Map { .. } => "map",
            BeanValue::Definition(_) => "bean-definition",
        }
    }

    /// 有序列表
    pub fn list(values: impl IntoIterator<Item = BeanValue>) -> Self {
        BeanValue::List(values.into_iter().collect())
    }

    pub fn empty_list() -> Self {
        BeanValue::List(Vec::new())
    }

    /// 无序集合，构造时按自然顺序归一化
    pub fn set(values: impl IntoIterator<Item = BeanValue>) -> Self {
        let mut values: Vec<BeanValue> = values.into_iter().collect();
        values.sort_by(BeanValue::natural_cmp);
        BeanValue::Set {
            ordered: false,
            values,
        }
    }

    /// 保留插入顺序的集合，包装一个已生成的有序列表
    pub fn linked_set(list: BeanValue) -> Self {
        let values = match list {
            BeanValue::List(values) => values,
            other => vec![other],
        };
        BeanValue::Set {
            ordered: true,
            values,
        }
    }

    pub fn empty_set() -> Self {
        BeanValue::Set {
            ordered: false,
            values: Vec::new(),
        }
    }

    /// 无序映射，构造时按键的自然顺序归一化
    pub fn map(entries: impl IntoIterator<Item = (BeanValue, BeanValue)>) -> Self {
        let mut entries: Vec<(BeanValue, BeanValue)> = entries.into_iter().collect();
        entries.sort_by(|(a, _), (b, _)| BeanValue::natural_cmp(a, b));
        BeanValue::Map {
            ordered: false,
            entries,
        }
    }

    /// 与 [`BeanValue::map`] 等价的逐条目形式，供生成代码在条目较多时使用
    pub fn map_of_entries(entries: impl IntoIterator<Item = (BeanValue, BeanValue)>) -> Self {
        BeanValue::map(entries)
    }

    /// 保留插入顺序的映射（LinkedHashMap 语义）
    pub fn ordered_map(entries: Vec<(BeanValue, BeanValue)>) -> Self {
        BeanValue::Map {
            ordered: true,
            entries,
        }
    }

    pub fn empty_map() -> Self {
        BeanValue::Map {
            ordered: false,
            entries: Vec::new(),
        }
    }

    /// 指定元素类型的数组，接受一个已生成的有序列表
    pub fn array_of(element: impl Into<TypePath>, list: BeanValue) -> Self {
        let values = match list {
            BeanValue::List(values) => values,
            other => vec![other],
        };
        BeanValue::Array {
            element: element.into(),
            values,
        }
    }

    pub fn empty_array(element: impl Into<TypePath>) -> Self {
        BeanValue::Array {
            element: element.into(),
            values: Vec::new(),
        }
    }

    pub fn definition(definition: BeanDefinition) -> Self {
        BeanValue::Definition(Box::new(definition))
    }

    /// 自然全序
    ///
    /// 用于稳定无序集合：同类值按其本身比较，不同类值按类别的固定次序比较。
    /// 浮点用 `total_cmp`，保证任何输入下都是全序。
    pub fn natural_cmp(&self, other: &BeanValue) -> Ordering {
        use BeanValue::*;

        fn rank(value: &BeanValue) -> u8 {
            match value {
                Null => 0,
                Bool(_) => 1,
                Char(_) => 2,
                I8(_) => 3,
                I16(_) => 4,
                I32(_) => 5,
                I64(_) => 6,
                F32(_) => 7,
                F64(_) => 8,
                String(_) => 9,
                Enum(_) => 10,
                Type(_) => 11,
                Resolvable(_) => 12,
                Array { .. } => 13,
                List(_) => 14,
                Set { .. } => 15,
                Map { .. } => 16,
                Definition(_) => 17,
            }
        }

        fn cmp_seq(a: &[BeanValue], b: &[BeanValue]) -> Ordering {
            for (x, y) in a.iter().zip(b.iter()) {
                let ordering = x.natural_cmp(y);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            a.len().cmp(&b.len())
        }

        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Char(a), Char(b)) => a.cmp(b),
            (I8(a), I8(b)) => a.cmp(b),
            (I16(a), I16(b)) => a.cmp(b),
            (I32(a), I32(b)) => a.cmp(b),
            (I64(a), I64(b)) => a.cmp(b),
            (F32(a), F32(b)) => a.total_cmp(b),
            (F64(a), F64(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            (Enum(a), Enum(b)) => (a.type_path(), a.variant()).cmp(&(b.type_path(), b.variant())),
            (Type(a), Type(b)) => a.cmp(b),
            (Resolvable(a), Resolvable(b)) => a.to_string().cmp(&b.to_string()),
            (Array { values: a, .. }, Array { values: b, .. }) => cmp_seq(a, b),
            (List(a), List(b)) => cmp_seq(a, b),
            (Set { values: a, .. }, Set { values: b, .. }) => cmp_seq(a, b),
            (Map { entries: a, .. }, Map { entries: b, .. }) => {
                for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
                    let ordering = ka.natural_cmp(kb).then_with(|| va.natural_cmp(vb));
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                a.len().cmp(&b.len())
            }
            (Definition(a), Definition(b)) => {
                let a = a.resolvable().to_string();
                let b = b.resolvable().to_string();
                a.cmp(&b)
            }
            (a, b) => rank(a).cmp(&rank(b)),
        }
    }
}

/// 构造映射条目的便捷函数，生成代码中以 `entry(k, v)` 形式出现
pub fn entry(key: impl Into<BeanValue>, value: impl Into<BeanValue>) -> (BeanValue, BeanValue) {
    (key.into(), value.into())
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for BeanValue {
                fn from(value: $ty) -> Self {
                    BeanValue::$variant(value)
                }
            }
        )+
    };
}

impl_from_scalar! {
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
}

impl From<&str> for BeanValue {
    fn from(value: &str) -> Self {
        BeanValue::String(value.to_string())
    }
}

impl From<String> for BeanValue {
    fn from(value: String) -> Self {
        BeanValue::String(value)
    }
}

impl From<EnumRef> for BeanValue {
    fn from(value: EnumRef) -> Self {
        BeanValue::Enum(value)
    }
}

impl From<TypePath> for BeanValue {
    fn from(value: TypePath) -> Self {
        BeanValue::Type(value)
    }
}

impl From<ResolvableType> for BeanValue {
    fn from(value: ResolvableType) -> Self {
        BeanValue::Resolvable(value)
    }
}

impl From<BeanDefinition> for BeanValue {
    fn from(value: BeanDefinition) -> Self {
        BeanValue::definition(value)
    }
}

/// 受管有序列表的字面量形式，供生成代码使用
#[macro_export]
macro_rules! managed_list {
    () => {
        $crate::value::BeanValue::empty_list()
    };
    ($($element:expr),+ $(,)?) => {
        $crate::value::BeanValue::list([$($crate::value::BeanValue::from($element)),+])
    };
}

/// 受管无序集合的字面量形式（构造时按自然顺序归一化）
#[macro_export]
macro_rules! managed_set {
    () => {
        $crate::value::BeanValue::empty_set()
    };
    ($($element:expr),+ $(,)?) => {
        $crate::value::BeanValue::set([$($crate::value::BeanValue::from($element)),+])
    };
}

/// 受管无序映射的字面量形式（构造时按键排序）
#[macro_export]
macro_rules! managed_map {
    () => {
        $crate::value::BeanValue::empty_map()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::value::BeanValue::map([
            $(($crate::value::BeanValue::from($key), $crate::value::BeanValue::from($value))),+
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    mod normalization_tests {
        use super::*;

        #[test]
        fn test_unordered_set_is_sorted_at_construction() {
            let set = BeanValue::set([2i64.into(), 1i64.into()]);
            match &set {
                BeanValue::Set { ordered, values } => {
                    assert!(!ordered);
                    assert_eq!(values, &[BeanValue::I64(1), BeanValue::I64(2)]);
                }
                other => panic!("unexpected value: {:?}", other),
            }
        }

        #[test]
        fn test_linked_set_preserves_insertion_order() {
            let set = BeanValue::linked_set(BeanValue::list([2i64.into(), 1i64.into()]));
            match &set {
                BeanValue::Set { ordered, values } => {
                    assert!(ordered);
                    assert_eq!(values, &[BeanValue::I64(2), BeanValue::I64(1)]);
                }
                other => panic!("unexpected value: {:?}", other),
            }
        }

        #[test]
        fn test_unordered_map_is_sorted_by_key() {
            let map = BeanValue::map([entry("b", 2i64), entry("a", 1i64)]);
            match &map {
                BeanValue::Map { ordered, entries } => {
                    assert!(!ordered);
                    assert_eq!(entries[0].0, BeanValue::from("a"));
                    assert_eq!(entries[1].0, BeanValue::from("b"));
                }
                other => panic!("unexpected value: {:?}", other),
            }
        }

        #[test]
        fn test_ordered_map_keeps_given_order() {
            let map = BeanValue::ordered_map(vec![entry("b", 2i64), entry("a", 1i64)]);
            match &map {
                BeanValue::Map { ordered, entries } => {
                    assert!(ordered);
                    assert_eq!(entries[0].0, BeanValue::from("b"));
                }
                other => panic!("unexpected value: {:?}", other),
            }
        }

        #[test]
        fn test_construction_order_does_not_affect_equality() {
            let a = BeanValue::map([entry("b", 2i64), entry("a", 1i64)]);
            let b = BeanValue::map([entry("a", 1i64), entry("b", 2i64)]);
            assert_eq!(a, b);
        }
    }

    mod macro_tests {
        use crate::value::BeanValue;

        #[test]
        fn test_managed_list_macro() {
            assert_eq!(managed_list![], BeanValue::empty_list());
            assert_eq!(
                managed_list![1i64, 2i64],
                BeanValue::list([1i64.into(), 2i64.into()])
            );
        }

        #[test]
        fn test_managed_macros_accept_mixed_element_types() {
            let list = managed_list!["a", 1i64, true];
            match list {
                BeanValue::List(values) => assert_eq!(values.len(), 3),
                other => panic!("unexpected value: {:?}", other),
            }
        }

        #[test]
        fn test_managed_map_macro_sorts_keys() {
            let map = managed_map! { "b" => 2i64, "a" => 1i64 };
            assert_eq!(
                map,
                BeanValue::map([("a".into(), 1i64.into()), ("b".into(), 2i64.into())])
            );
        }

        #[test]
        fn test_nested_managed_lists() {
            let nested = managed_list![managed_list![1i64], managed_list![2i64]];
            match nested {
                BeanValue::List(values) => {
                    assert_eq!(values[0], managed_list![1i64]);
                }
                other => panic!("unexpected value: {:?}", other),
            }
        }
    }

    mod ordering_tests {
        use super::*;
        use std::cmp::Ordering;

        #[test]
        fn test_natural_cmp_on_strings() {
            assert_eq!(
                BeanValue::from("a").natural_cmp(&BeanValue::from("b")),
                Ordering::Less
            );
        }

        #[test]
        fn test_natural_cmp_is_total_for_floats() {
            let nan = BeanValue::F64(f64::NAN);
            assert_eq!(nan.natural_cmp(&nan), Ordering::Equal);
        }

        #[test]
        fn test_natural_cmp_across_kinds_uses_rank() {
            assert_eq!(
                BeanValue::Null.natural_cmp(&BeanValue::from(false)),
                Ordering::Less
            );
        }
    }
}
