//! 实例供应器的语句发射
//!
//! 为 Bean 定义生成"如何创建实例"的代码：无参创建入口且没有任何
//! 构造后修改时用 `set_instance_supplier_fn(path)` 简写，其余情况
//! 生成完整闭包。创建入口的实参按声明类型渲染为原生 Rust 表达式，
//! 与发射器链输出的"重建元数据"形式不同。

use wyvern_core::{BeanDefinition, BeanValue, Executable, ResolvableType};

use crate::code::CodeBlock;
use crate::error::{AotError, AotResult};
use crate::generated::GenerationContext;
use crate::value::scalar::{escape_char, quote_string, render_float};
use crate::value::types::render_resolvable;

/// 构造后按顺序应用的实例级修改
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceContributor {
    /// 调用一个 setter：`instance.set_x(value);`
    PropertySetter {
        setter: String,
        value: BeanValue,
        declared: ResolvableType,
    },
    /// 调用一个无参初始化方法：`instance.init();`
    InitMethod { method: String },
}

impl InstanceContributor {
    pub fn property_setter(setter: impl Into<String>, value: impl Into<BeanValue>) -> Self {
        InstanceContributor::PropertySetter {
            setter: setter.into(),
            value: value.into(),
            declared: ResolvableType::NONE,
        }
    }

    pub fn typed_property_setter(
        setter: impl Into<String>,
        value: impl Into<BeanValue>,
        declared: impl Into<ResolvableType>,
    ) -> Self {
        InstanceContributor::PropertySetter {
            setter: setter.into(),
            value: value.into(),
            declared: declared.into(),
        }
    }

    pub fn init_method(method: impl Into<String>) -> Self {
        InstanceContributor::InitMethod {
            method: method.into(),
        }
    }
}

/// 实例供应器语句的生成器
#[derive(Debug, Default)]
pub struct InstanceSupplierGenerator;

impl InstanceSupplierGenerator {
    pub fn new() -> Self {
        Self
    }

    /// 为 `definition` 生成安装实例供应器的语句
    ///
    /// 没有创建入口的定义不安装供应器（工厂在创建时报
    /// `MissingInstanceSupplier`，属于运行期决策，不在生成期失败）。
    pub fn generate(
        &self,
        definition: &BeanDefinition,
        contributors: &[InstanceContributor],
        ctx: &mut GenerationContext<'_>,
    ) -> AotResult<CodeBlock> {
        let mut code = CodeBlock::new();
        let Some(executable) = definition.executable() else {
            return Ok(code);
        };
        let var = ctx.local_definition_var();

        if executable.parameters().is_empty() && contributors.is_empty() {
            code.line(format!(
                "{}.set_instance_supplier_fn({});",
                var,
                executable.path()
            ));
            return Ok(code);
        }

        let arguments = self.render_arguments(definition, executable, ctx)?;
        let binding = if contributors.is_empty() {
            "let instance"
        } else {
            "let mut instance"
        };

        let mut body = CodeBlock::new();
        body.line(format!(
            "{} = {}({});",
            binding,
            executable.path(),
            arguments.join(", ")
        ));
        for contributor in contributors {
            match contributor {
                InstanceContributor::PropertySetter {
                    setter,
                    value,
                    declared,
                } => {
                    let argument = render_native_argument(value, declared, 0, ctx)?;
                    body.line(format!("instance.{}({});", setter, argument));
                }
                InstanceContributor::InitMethod { method } => {
                    body.line(format!("instance.{}();", method));
                }
            }
        }
        body.line("Ok(Box::new(instance))");

        code.line(format!("{}.set_instance_supplier(|_factory| {{", var));
        code.block(body);
        code.line("});");
        Ok(code)
    }

    fn render_arguments(
        &self,
        definition: &BeanDefinition,
        executable: &Executable,
        ctx: &mut GenerationContext<'_>,
    ) -> AotResult<Vec<String>> {
        let values = definition.constructor_argument_values();
        executable
            .parameters()
            .iter()
            .enumerate()
            .map(|(index, parameter)| {
                let holder = values.get(index).ok_or_else(|| {
                    AotError::MissingConstructorArgument {
                        index,
                        path: executable.path(),
                    }
                })?;
                let declared = holder.declared().unwrap_or_else(|| parameter.declared());
                render_native_argument(holder.value(), declared, index, ctx)
            })
            .collect()
    }
}

/// 把元数据值渲染为创建入口的原生实参表达式
fn render_native_argument(
    value: &BeanValue,
    declared: &ResolvableType,
    index: usize,
    ctx: &mut GenerationContext<'_>,
) -> AotResult<String> {
    let rendered = match value {
        BeanValue::Bool(v) => v.to_string(),
        BeanValue::Char(v) => escape_char(*v),
        BeanValue::I8(v) => format!("{}i8", v),
        BeanValue::I16(v) => format!("{}i16", v),
        BeanValue::I32(v) => v.to_string(),
        BeanValue::I64(v) => format!("{}i64", v),
        BeanValue::F32(v) => render_float(f64::from(*v), "f32"),
        BeanValue::F64(v) => render_float(*v, "f64"),
        BeanValue::String(text) => format!("{}.to_string()", quote_string(text)),
        BeanValue::Enum(enum_ref) => {
            format!("{}::{}", enum_ref.type_path(), enum_ref.variant())
        }
        BeanValue::Type(path) => format!("TypePath::of({})", quote_string(path.as_str())),
        BeanValue::Resolvable(resolvable) => render_resolvable(resolvable),
        BeanValue::List(values) => {
            let element_declared = declared.generic(0);
            let elements = values
                .iter()
                .map(|element| render_native_argument(element, &element_declared, index, ctx))
                .collect::<AotResult<Vec<_>>>()?;
            format!("vec![{}]", elements.join(", "))
        }
        BeanValue::Definition(definition) => {
            let Some(writer) = ctx.nested_writer() else {
                return Err(AotError::MissingNestedWriter);
            };
            writer.write_nested(ctx, definition)?
        }
        other => {
            return Err(AotError::UnsupportedArgument {
                kind: other.kind().to_string(),
                index,
            })
        }
    };
    Ok(rendered)
}
