//! 标量值的发射器

use wyvern_core::{BeanValue, ResolvableType};

use crate::error::AotResult;
use crate::generated::GenerationContext;
use crate::value::{ValueEmitter, ValueEmitterChain};

/// 数值和布尔字面量
///
/// 数值带类型后缀以消除字面量推断的歧义；`i32` 是默认整型，不加后缀。
/// 浮点保证带小数点，非有限值用常量路径表示。
pub struct PrimitiveEmitter;

impl ValueEmitter for PrimitiveEmitter {
    fn emit(
        &self,
        value: &BeanValue,
        _declared: &ResolvableType,
        _chain: &ValueEmitterChain,
        _ctx: &mut GenerationContext<'_>,
    ) -> Option<AotResult<String>> {
        let rendered = match value {
            BeanValue::Bool(v) => v.to_string(),
            BeanValue::I8(v) => format!("{}i8", v),
            BeanValue::I16(v) => format!("{}i16", v),
            BeanValue::I32(v) => v.to_string(),
            BeanValue::I64(v) => format!("{}i64", v),
            BeanValue::F32(v) => render_float(f64::from(*v), "f32"),
            BeanValue::F64(v) => render_float(*v, "f64"),
            _ => return None,
        };
        Some(Ok(rendered))
    }
}

pub(crate) fn render_float(value: f64, suffix: &str) -> String {
    if value.is_nan() {
        return format!("{}::NAN", suffix);
    }
    if value == f64::INFINITY {
        return format!("{}::INFINITY", suffix);
    }
    if value == f64::NEG_INFINITY {
        return format!("{}::NEG_INFINITY", suffix);
    }
    let mut text = value.to_string();
    if !text.contains('.') && !text.contains('e') && !text.contains('E') {
        text.push_str(".0");
    }
    format!("{}{}", text, suffix)
}

/// 字符字面量，控制字符和引号走转义形式
pub struct CharEmitter;

impl ValueEmitter for CharEmitter {
    fn emit(
        &self,
        value: &BeanValue,
        _declared: &ResolvableType,
        _chain: &ValueEmitterChain,
        _ctx: &mut GenerationContext<'_>,
    ) -> Option<AotResult<String>> {
        match value {
            BeanValue::Char(c) => Some(Ok(escape_char(*c))),
            _ => None,
        }
    }
}

pub(crate) fn escape_char(c: char) -> String {
    let body = match c {
        '\\' => "\\\\".to_string(),
        '\'' => "\\'".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        '\0' => "\\0".to_string(),
        c if c.is_control() => format!("\\u{{{:04x}}}", c as u32),
        c => c.to_string(),
    };
    format!("'{}'", body)
}

/// 字符串字面量
pub struct StringEmitter;

impl ValueEmitter for StringEmitter {
    fn emit(
        &self,
        value: &BeanValue,
        _declared: &ResolvableType,
        _chain: &ValueEmitterChain,
        _ctx: &mut GenerationContext<'_>,
    ) -> Option<AotResult<String>> {
        match value {
            BeanValue::String(text) => Some(Ok(quote_string(text))),
            _ => None,
        }
    }
}

pub(crate) fn quote_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:04x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
