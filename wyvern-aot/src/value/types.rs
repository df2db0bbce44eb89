//! 类型描述值的发射器

use wyvern_core::{BeanValue, ResolvableType};

use crate::error::AotResult;
use crate::generated::GenerationContext;
use crate::value::scalar::quote_string;
use crate::value::{ValueEmitter, ValueEmitterChain};

/// 枚举成员引用
pub struct EnumEmitter;

impl ValueEmitter for EnumEmitter {
    fn emit(
        &self,
        value: &BeanValue,
        _declared: &ResolvableType,
        _chain: &ValueEmitterChain,
        _ctx: &mut GenerationContext<'_>,
    ) -> Option<AotResult<String>> {
        match value {
            BeanValue::Enum(enum_ref) => Some(Ok(format!(
                "EnumRef::of({}, {})",
                quote_string(enum_ref.type_path().as_str()),
                quote_string(enum_ref.variant())
            ))),
            _ => None,
        }
    }
}

/// 裸类型路径
pub struct TypePathEmitter;

impl ValueEmitter for TypePathEmitter {
    fn emit(
        &self,
        value: &BeanValue,
        _declared: &ResolvableType,
        _chain: &ValueEmitterChain,
        _ctx: &mut GenerationContext<'_>,
    ) -> Option<AotResult<String>> {
        match value {
            BeanValue::Type(path) => Some(Ok(format!(
                "TypePath::of({})",
                quote_string(path.as_str())
            ))),
            _ => None,
        }
    }
}

/// 可解析类型描述符
///
/// 泛型参数都是简单类型时用 `"path".into()` 的紧凑列表；任何参数
/// 自身还带泛型就整体切换到递归的完整形式，不混用两种写法。
pub struct ResolvableTypeEmitter;

impl ValueEmitter for ResolvableTypeEmitter {
    fn emit(
        &self,
        value: &BeanValue,
        _declared: &ResolvableType,
        _chain: &ValueEmitterChain,
        _ctx: &mut GenerationContext<'_>,
    ) -> Option<AotResult<String>> {
        match value {
            BeanValue::Resolvable(resolvable) => Some(Ok(render_resolvable(resolvable))),
            _ => None,
        }
    }
}

pub(crate) fn render_resolvable(resolvable: &ResolvableType) -> String {
    let Some(path) = resolvable.type_path() else {
        return "ResolvableType::NONE".to_string();
    };
    if !resolvable.has_generics() {
        return format!("ResolvableType::for_class({})", quote_string(path.as_str()));
    }

    let nested = resolvable
        .generics()
        .iter()
        .any(ResolvableType::has_generics);
    let generics = resolvable
        .generics()
        .iter()
        .map(|generic| {
            if nested {
                render_resolvable(generic)
            } else {
                match generic.type_path() {
                    Some(path) => format!("{}.into()", quote_string(path.as_str())),
                    None => "ResolvableType::NONE".to_string(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "ResolvableType::for_class_with_generics({}, [{}])",
        quote_string(path.as_str()),
        generics
    )
}
