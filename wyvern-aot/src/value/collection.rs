//! 受管集合与内嵌定义的发射器
//!
//! 集合发射器把每个元素重新送回链的头部渲染，再套上对应的受管
//! 集合构造形式。无序集合在元数据构造时已经归一化，这里按既有
//! 顺序原样输出即可。

use wyvern_core::{BeanValue, ResolvableType, TypePath};

use crate::code::CodeBlock;
use crate::error::{AotError, AotResult};
use crate::generated::{GeneratedFunction, GenerationContext};
use crate::value::scalar::quote_string;
use crate::value::{ValueEmitter, ValueEmitterChain};

/// 无序映射从字面量宏切换到逐条目形式的默认条目数上限
pub const DEFAULT_MAP_ENTRY_THRESHOLD: usize = 10;

fn emit_elements(
    values: &[BeanValue],
    declared: &ResolvableType,
    chain: &ValueEmitterChain,
    ctx: &mut GenerationContext<'_>,
) -> AotResult<Vec<String>> {
    values
        .iter()
        .map(|element| chain.try_emit(element, declared, ctx))
        .collect()
}

fn render_list(
    values: &[BeanValue],
    element_declared: &ResolvableType,
    chain: &ValueEmitterChain,
    ctx: &mut GenerationContext<'_>,
) -> AotResult<String> {
    if values.is_empty() {
        return Ok("BeanValue::empty_list()".to_string());
    }
    let elements = emit_elements(values, element_declared, chain, ctx)?;
    Ok(format!("managed_list![{}]", elements.join(", ")))
}

/// 有序列表
pub struct ListEmitter;

impl ValueEmitter for ListEmitter {
    fn emit(
        &self,
        value: &BeanValue,
        declared: &ResolvableType,
        chain: &ValueEmitterChain,
        ctx: &mut GenerationContext<'_>,
    ) -> Option<AotResult<String>> {
        match value {
            BeanValue::List(values) => {
                Some(render_list(values, &declared.generic(0), chain, ctx))
            }
            _ => None,
        }
    }
}

/// 定长数组，元素类型随表达式一起写出
pub struct ArrayEmitter;

impl ValueEmitter for ArrayEmitter {
    fn emit(
        &self,
        value: &BeanValue,
        declared: &ResolvableType,
        chain: &ValueEmitterChain,
        ctx: &mut GenerationContext<'_>,
    ) -> Option<AotResult<String>> {
        let BeanValue::Array { element, values } = value else {
            return None;
        };
        Some(render_array(element, values, declared, chain, ctx))
    }
}

fn render_array(
    element: &TypePath,
    values: &[BeanValue],
    _declared: &ResolvableType,
    chain: &ValueEmitterChain,
    ctx: &mut GenerationContext<'_>,
) -> AotResult<String> {
    let element_path = quote_string(element.as_str());
    if values.is_empty() {
        return Ok(format!("BeanValue::empty_array(TypePath::of({}))", element_path));
    }
    let element_declared = ResolvableType::for_class(element.clone());
    let list = render_list(values, &element_declared, chain, ctx)?;
    Ok(format!(
        "BeanValue::array_of(TypePath::of({}), {})",
        element_path, list
    ))
}

/// 集合：无序用 `managed_set!`，保序包装一个有序列表
pub struct SetEmitter;

impl ValueEmitter for SetEmitter {
    fn emit(
        &self,
        value: &BeanValue,
        declared: &ResolvableType,
        chain: &ValueEmitterChain,
        ctx: &mut GenerationContext<'_>,
    ) -> Option<AotResult<String>> {
        let BeanValue::Set { ordered, values } = value else {
            return None;
        };
        if *ordered {
            let list = match render_list(values, &declared.generic(0), chain, ctx) {
                Ok(list) => list,
                Err(error) => return Some(Err(error)),
            };
            return Some(Ok(format!("BeanValue::linked_set({})", list)));
        }
        if values.is_empty() {
            return Some(Ok("BeanValue::empty_set()".to_string()));
        }
        let elements = match emit_elements(values, &declared.generic(0), chain, ctx) {
            Ok(elements) => elements,
            Err(error) => return Some(Err(error)),
        };
        Some(Ok(format!("managed_set![{}]", elements.join(", "))))
    }
}

/// 映射发射器
///
/// 无序映射在条目不超过 `entry_threshold` 时用 `managed_map!` 字面量，
/// 超过后切换到逐条目的 `map_of_entries` 形式。保序映射优先生成辅助
/// 函数（大字面量塞在一个表达式里不可读），上下文不支持时退回内联的
/// `ordered_map` 形式。
pub struct MapEmitter {
    entry_threshold: usize,
}

impl MapEmitter {
    pub fn new() -> Self {
        Self {
            entry_threshold: DEFAULT_MAP_ENTRY_THRESHOLD,
        }
    }

    pub fn with_threshold(entry_threshold: usize) -> Self {
        Self { entry_threshold }
    }
}

impl Default for MapEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueEmitter for MapEmitter {
    fn emit(
        &self,
        value: &BeanValue,
        declared: &ResolvableType,
        chain: &ValueEmitterChain,
        ctx: &mut GenerationContext<'_>,
    ) -> Option<AotResult<String>> {
        let BeanValue::Map { ordered, entries } = value else {
            return None;
        };
        Some(self.render_map(*ordered, entries, declared, chain, ctx))
    }
}

impl MapEmitter {
    fn render_map(
        &self,
        ordered: bool,
        entries: &[(BeanValue, BeanValue)],
        declared: &ResolvableType,
        chain: &ValueEmitterChain,
        ctx: &mut GenerationContext<'_>,
    ) -> AotResult<String> {
        if !ordered && entries.is_empty() {
            return Ok("BeanValue::empty_map()".to_string());
        }

        let key_declared = declared.generic(0);
        let value_declared = declared.generic(1);
        let rendered = entries
            .iter()
            .map(|(key, value)| {
                let key = chain.try_emit(key, &key_declared, ctx)?;
                let value = chain.try_emit(value, &value_declared, ctx)?;
                Ok((key, value))
            })
            .collect::<AotResult<Vec<_>>>()?;

        if ordered {
            return Ok(self.render_ordered_map(&rendered, ctx));
        }

        if rendered.len() <= self.entry_threshold {
            let pairs = rendered
                .iter()
                .map(|(key, value)| format!("{} => {}", key, value))
                .collect::<Vec<_>>()
                .join(", ");
            return Ok(format!("managed_map! {{ {} }}", pairs));
        }

        let entries = rendered
            .iter()
            .map(|(key, value)| format!("entry({}, {})", key, value))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("BeanValue::map_of_entries([{}])", entries))
    }

    fn render_ordered_map(
        &self,
        rendered: &[(String, String)],
        ctx: &mut GenerationContext<'_>,
    ) -> String {
        if !rendered.is_empty() && ctx.supports_helper_functions() {
            let mut body = CodeBlock::new();
            body.line("let mut entries = Vec::new();");
            for (key, value) in rendered {
                body.line(format!("entries.push(entry({}, {}));", key, value));
            }
            body.line("BeanValue::ordered_map(entries)");
            if let Some(name) = ctx.add_helper_function("ordered_map", |name| {
                GeneratedFunction::new(name)
                    .with_return_type("BeanValue")
                    .with_body(body)
            }) {
                return format!("{}()", name);
            }
        }
        let entries = rendered
            .iter()
            .map(|(key, value)| format!("entry({}, {})", key, value))
            .collect::<Vec<_>>()
            .join(", ");
        format!("BeanValue::ordered_map(vec![{}])", entries)
    }
}

/// 内嵌 Bean 定义
///
/// 渲染委托给上下文里的内嵌定义写出器；没有配置写出器时立即失败，
/// 这是调用方的装配错误，不是值的问题。
pub struct BeanDefinitionEmitter;

impl ValueEmitter for BeanDefinitionEmitter {
    fn emit(
        &self,
        value: &BeanValue,
        _declared: &ResolvableType,
        _chain: &ValueEmitterChain,
        ctx: &mut GenerationContext<'_>,
    ) -> Option<AotResult<String>> {
        let BeanValue::Definition(definition) = value else {
            return None;
        };
        let Some(writer) = ctx.nested_writer() else {
            return Some(Err(AotError::MissingNestedWriter));
        };
        Some(writer.write_nested(ctx, definition))
    }
}
