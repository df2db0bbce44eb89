//! 单个 Bean 定义的注册函数发射
//!
//! 每个定义做一趟线性发射：类型表达式、实例供应器、customizer 块
//! （只写非默认项）、注册调用。内嵌定义走同一条路径递归，但渲染为
//! "只构建不注册"的块表达式，深度派生的局部变量名避免冲突。

use std::fmt;
use std::sync::Arc;

use wyvern_core::utils::naming::{is_reserved_word, is_valid_identifier, to_snake_case};
use wyvern_core::{BeanDefinition, ExecutableKind, ResolvableType, Role, Scope};

use crate::access::ItemReference;
use crate::code::CodeBlock;
use crate::error::AotResult;
use crate::generated::{GeneratedFunction, GenerationContext, NestedDefinitionWriter};
use crate::hints::HintCategory;
use crate::instance::{InstanceContributor, InstanceSupplierGenerator};
use crate::value::scalar::quote_string;
use crate::value::types::render_resolvable;
use crate::value::{MapEmitter, ValueEmitterChain, DEFAULT_MAP_ENTRY_THRESHOLD};

/// 属性名过滤谓词
pub type AttributeFilter = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// 生成选项
///
/// 默认不透出任何属性（attributes 多为容器内部簿记，生成到源码里
/// 要由调用方显式放行）。
#[derive(Clone)]
pub struct GenerationOptions {
    attribute_filter: AttributeFilter,
    map_entry_threshold: usize,
    file_name: String,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.attribute_filter = Arc::new(filter);
        self
    }

    pub fn with_map_entry_threshold(mut self, threshold: usize) -> Self {
        self.map_entry_threshold = threshold;
        self
    }

    /// 默认注册模块的文件名
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn attribute_filter(&self) -> &AttributeFilter {
        &self.attribute_filter
    }

    pub fn map_entry_threshold(&self) -> usize {
        self.map_entry_threshold
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            attribute_filter: Arc::new(|_| false),
            map_entry_threshold: DEFAULT_MAP_ENTRY_THRESHOLD,
            file_name: "bean_registrations.rs".to_string(),
        }
    }
}

impl fmt::Debug for GenerationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationOptions")
            .field("map_entry_threshold", &self.map_entry_threshold)
            .field("file_name", &self.file_name)
            .finish()
    }
}

/// 一个 Bean 的生成产物：注册函数、随行辅助函数、引用到的条目
#[derive(Debug, Clone)]
pub struct CodeContribution {
    bean_name: String,
    function: GeneratedFunction,
    helpers: Vec<GeneratedFunction>,
    referenced: Vec<ItemReference>,
}

impl CodeContribution {
    pub fn bean_name(&self) -> &str {
        &self.bean_name
    }

    pub fn function(&self) -> &GeneratedFunction {
        &self.function
    }

    pub fn helpers(&self) -> &[GeneratedFunction] {
        &self.helpers
    }

    pub fn referenced(&self) -> &[ItemReference] {
        &self.referenced
    }

    /// 拆解为函数与随行辅助函数，供访问协调器放置
    pub fn into_functions(self) -> (GeneratedFunction, Vec<GeneratedFunction>) {
        (self.function, self.helpers)
    }
}

/// Bean 注册函数生成器
pub struct BeanRegistrationGenerator {
    options: GenerationOptions,
    supplier: InstanceSupplierGenerator,
    chain: ValueEmitterChain,
}

impl BeanRegistrationGenerator {
    pub fn new(options: GenerationOptions) -> Self {
        let mut chain = ValueEmitterChain::standard();
        if options.map_entry_threshold() != DEFAULT_MAP_ENTRY_THRESHOLD {
            chain.add(MapEmitter::with_threshold(options.map_entry_threshold()));
        }
        Self::with_chain(options, chain)
    }

    /// 用定制的发射器链构建（链前端的发射器遮蔽内建发射器）
    pub fn with_chain(options: GenerationOptions, chain: ValueEmitterChain) -> Self {
        Self {
            options,
            supplier: InstanceSupplierGenerator::new(),
            chain,
        }
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// 生成一个 Bean 的注册函数
    pub fn generate(
        &self,
        bean_name: &str,
        definition: &BeanDefinition,
        contributors: &[InstanceContributor],
        ctx: &mut GenerationContext<'_>,
    ) -> AotResult<CodeContribution> {
        let requested = self.requested_function_name(bean_name, definition);
        let function_name = ctx.allocate_function_name(&requested);
        tracing::debug!("Generating registration function '{}' for bean '{}'", function_name, bean_name);

        let mut helpers = Vec::new();
        let mut referenced = Vec::new();
        let body = {
            let mut scoped = ctx
                .scoped(self)
                .with_helpers(&mut helpers)
                .with_referenced(&mut referenced);
            let mut body =
                self.definition_statements(bean_name, definition, contributors, &mut scoped)?;
            body.line(format!(
                "factory.register_bean_definition({}, {})",
                quote_string(bean_name),
                scoped.local_definition_var()
            ));
            body
        };

        let function = GeneratedFunction::new(function_name)
            .with_param("factory", "&mut DefaultListableBeanFactory")
            .with_return_type("ContainerResult<()>")
            .with_body(body);
        Ok(CodeContribution {
            bean_name: bean_name.to_string(),
            function,
            helpers,
            referenced,
        })
    }

    /// 构建定义并配置元数据的语句序列，不含注册调用和尾表达式
    fn definition_statements(
        &self,
        bean_name: &str,
        definition: &BeanDefinition,
        contributors: &[InstanceContributor],
        ctx: &mut GenerationContext<'_>,
    ) -> AotResult<CodeBlock> {
        let var = ctx.local_definition_var();

        if let Some(executable) = definition.executable() {
            ctx.record_reference(ItemReference::new(
                executable.declaring().clone(),
                executable.visibility().clone(),
            ));
        } else if let Some(path) = definition.type_path() {
            // 生成路径给不出创建代码，执行期只能走动态方案
            ctx.hints_mut()
                .reflection_mut()
                .register_type(path.clone(), HintCategory::Instantiate);
            tracing::warn!(
                "Bean '{}' has no resolved creator; registering an instantiation hint for {}",
                bean_name,
                path
            );
        }

        let supplier = self.supplier.generate(definition, contributors, ctx)?;
        let customizer = self.customizer_statements(definition, ctx)?;

        let mut code = CodeBlock::new();
        let binding = if supplier.is_empty() && customizer.is_empty() {
            format!("let {}", var)
        } else {
            format!("let mut {}", var)
        };
        code.line(format!(
            "{} = BeanDefinition::of({});",
            binding,
            bean_type_expression(definition.resolvable())
        ));
        code.extend(supplier);
        code.extend(customizer);
        Ok(code)
    }

    /// customizer 块：逐项与默认值比较，默认值不产生语句
    fn customizer_statements(
        &self,
        definition: &BeanDefinition,
        ctx: &mut GenerationContext<'_>,
    ) -> AotResult<CodeBlock> {
        let var = ctx.local_definition_var();
        let mut code = CodeBlock::new();

        if definition.is_primary() {
            code.line(format!("{}.set_primary(true);", var));
        }
        if definition.scope() != Scope::Singleton {
            code.line(format!("{}.set_scope(Scope::{:?});", var, definition.scope()));
        }
        if !definition.depends_on().is_empty() {
            let names = definition
                .depends_on()
                .iter()
                .map(|name| quote_string(name))
                .collect::<Vec<_>>()
                .join(", ");
            code.line(format!("{}.set_depends_on(&[{}]);", var, names));
        }
        if let Some(lazy) = definition.lazy_init() {
            code.line(format!("{}.set_lazy_init({});", var, lazy));
        }
        if !definition.is_autowire_candidate() {
            code.line(format!("{}.set_autowire_candidate(false);", var));
        }
        if definition.is_synthetic() {
            code.line(format!("{}.set_synthetic(true);", var));
        }
        if definition.role() != Role::Application {
            code.line(format!("{}.set_role(Role::{:?});", var, definition.role()));
        }

        self.constructor_argument_statements(definition, &mut code, ctx)?;
        self.property_value_statements(definition, &mut code, ctx)?;

        for (name, value) in definition.attributes() {
            if !(self.options.attribute_filter())(name) {
                continue;
            }
            let rendered = self.chain.try_emit(value, &ResolvableType::NONE, ctx)?;
            code.line(format!(
                "{}.set_attribute({}, {});",
                var,
                quote_string(name),
                rendered
            ));
        }
        Ok(code)
    }

    /// 单个参数内联，多个参数提升为局部 `ConstructorArgumentValues`
    fn constructor_argument_statements(
        &self,
        definition: &BeanDefinition,
        code: &mut CodeBlock,
        ctx: &mut GenerationContext<'_>,
    ) -> AotResult<()> {
        let arguments = definition.constructor_argument_values();
        if arguments.is_empty() {
            return Ok(());
        }
        let var = ctx.local_definition_var();

        if arguments.len() == 1 {
            for (index, holder) in arguments.iter() {
                let declared = holder.declared().cloned().unwrap_or(ResolvableType::NONE);
                let rendered = self.chain.try_emit(holder.value(), &declared, ctx)?;
                code.line(format!(
                    "{}.add_indexed_argument({}, {});",
                    var, index, rendered
                ));
            }
            return Ok(());
        }

        let local = format!("args{}", "_".repeat(ctx.depth()));
        code.line(format!(
            "let mut {} = ConstructorArgumentValues::new();",
            local
        ));
        for (index, holder) in arguments.iter() {
            let declared = holder.declared().cloned().unwrap_or(ResolvableType::NONE);
            let rendered = self.chain.try_emit(holder.value(), &declared, ctx)?;
            code.line(format!("{}.add_indexed({}, {});", local, index, rendered));
        }
        code.line(format!(
            "{}.set_constructor_argument_values({});",
            var, local
        ));
        Ok(())
    }

    /// 与构造参数相同的单个/多个切分
    fn property_value_statements(
        &self,
        definition: &BeanDefinition,
        code: &mut CodeBlock,
        ctx: &mut GenerationContext<'_>,
    ) -> AotResult<()> {
        let properties = definition.property_values();
        if properties.is_empty() {
            return Ok(());
        }
        let var = ctx.local_definition_var();

        if properties.len() == 1 {
            for property in properties.iter() {
                let rendered =
                    self.chain
                        .try_emit(property.value(), &ResolvableType::NONE, ctx)?;
                code.line(format!(
                    "{}.add_property_value({}, {});",
                    var,
                    quote_string(property.name()),
                    rendered
                ));
            }
            return Ok(());
        }

        let local = format!("pvs{}", "_".repeat(ctx.depth()));
        code.line(format!("let mut {} = PropertyValues::new();", local));
        for property in properties.iter() {
            let rendered = self
                .chain
                .try_emit(property.value(), &ResolvableType::NONE, ctx)?;
            code.line(format!(
                "{}.add({}, {});",
                local,
                quote_string(property.name()),
                rendered
            ));
        }
        code.line(format!("{}.set_property_values({});", var, local));
        Ok(())
    }

    /// 注册函数的期望名称，冲突避让交给上下文里的命名器
    fn requested_function_name(&self, bean_name: &str, definition: &BeanDefinition) -> String {
        let base = {
            let snake = to_snake_case(bean_name);
            if is_valid_identifier(&snake) && !is_reserved_word(&snake) {
                snake
            } else {
                definition
                    .type_path()
                    .map(|path| to_snake_case(path.simple_name()))
                    .filter(|name| is_valid_identifier(name) && !is_reserved_word(name))
                    .unwrap_or_else(|| "bean".to_string())
            }
        };
        let prefix = match definition.executable() {
            Some(executable) if executable.kind() == ExecutableKind::FactoryMethod => {
                format!("{}_", to_snake_case(executable.declaring().simple_name()))
            }
            _ => String::new(),
        };
        format!("register_{}{}", prefix, base)
    }
}

/// 泛型全部解析时用 `ResolvableType` 形式，否则退回裸类型路径
fn bean_type_expression(resolvable: &ResolvableType) -> String {
    if resolvable.is_fully_resolved() {
        return render_resolvable(resolvable);
    }
    match resolvable.type_path() {
        Some(path) => format!("TypePath::of({})", quote_string(path.as_str())),
        None => "ResolvableType::NONE".to_string(),
    }
}

impl NestedDefinitionWriter for BeanRegistrationGenerator {
    /// 内嵌定义渲染为"构建但不注册"的块表达式
    fn write_nested(
        &self,
        ctx: &mut GenerationContext<'_>,
        definition: &BeanDefinition,
    ) -> AotResult<String> {
        ctx.enter_nested(|ctx| {
            let statements = self.definition_statements("<nested>", definition, &[], ctx)?;
            let var = ctx.local_definition_var();
            let mut block = CodeBlock::new();
            block.line("{");
            let mut inner = statements;
            inner.line(var);
            block.block(inner);
            block.line("}");
            // 去掉尾随换行，块表达式要嵌进外层语句里
            let mut rendered = block.render();
            rendered.truncate(rendered.trim_end().len());
            Ok(rendered)
        })
    }
}

impl Default for BeanRegistrationGenerator {
    fn default() -> Self {
        Self::new(GenerationOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wyvern_core::{entry, BeanValue, Executable, Visibility};

    use crate::generated::FunctionNameGenerator;
    use crate::hints::RuntimeHints;

    fn generate(bean_name: &str, definition: &BeanDefinition) -> CodeContribution {
        generate_with(&GenerationOptions::default(), bean_name, definition)
    }

    fn generate_with(
        options: &GenerationOptions,
        bean_name: &str,
        definition: &BeanDefinition,
    ) -> CodeContribution {
        let generator = BeanRegistrationGenerator::new(options.clone());
        let mut hints = RuntimeHints::new();
        let mut names = FunctionNameGenerator::new();
        let mut ctx = GenerationContext::new(&mut hints, &mut names);
        generator
            .generate(bean_name, definition, &[], &mut ctx)
            .unwrap()
    }

    fn render(contribution: &CodeContribution) -> String {
        contribution.function().render().render()
    }

    fn service() -> BeanDefinition {
        BeanDefinition::of(ResolvableType::for_class("demo::UserService"))
    }

    mod naming_tests {
        use super::*;

        #[test]
        fn test_valid_bean_name_drives_the_function_name() {
            let contribution = generate("userService", &service());
            assert_eq!(contribution.function().name(), "register_user_service");
        }

        #[test]
        fn test_invalid_bean_name_falls_back_to_the_type_name() {
            let contribution = generate("demo.user#1", &service());
            assert_eq!(contribution.function().name(), "register_user_service");
        }

        #[test]
        fn test_factory_methods_prefix_the_declaring_type() {
            let bd = service().with_executable(Executable::factory_method(
                "demo::UserConfiguration",
                "user_service",
            ));
            let contribution = generate("userService", &bd);
            assert_eq!(
                contribution.function().name(),
                "register_user_configuration_user_service"
            );
        }

        #[test]
        fn test_collisions_are_suffixed() {
            let generator = BeanRegistrationGenerator::default();
            let mut hints = RuntimeHints::new();
            let mut names = FunctionNameGenerator::new();
            let mut ctx = GenerationContext::new(&mut hints, &mut names);
            let first = generator
                .generate("userService", &service(), &[], &mut ctx)
                .unwrap();
            let second = generator
                .generate("userService", &service(), &[], &mut ctx)
                .unwrap();
            assert_eq!(first.function().name(), "register_user_service");
            assert_eq!(second.function().name(), "register_user_service1");
        }
    }

    mod customizer_tests {
        use super::*;

        #[test]
        fn test_all_default_definition_emits_no_customizer() {
            let rendered = render(&generate("userService", &service()));
            assert!(!rendered.contains("set_primary"));
            assert!(!rendered.contains("set_scope"));
            assert!(!rendered.contains("set_lazy_init"));
            assert!(!rendered.contains("set_autowire_candidate"));
            assert!(!rendered.contains("set_synthetic"));
            assert!(!rendered.contains("set_role"));
            assert!(!rendered.contains("set_depends_on"));
            assert!(!rendered.contains("set_attribute"));
            assert!(rendered.contains("let bd = BeanDefinition::of("));
            assert!(rendered
                .contains("factory.register_bean_definition(\"userService\", bd)"));
        }

        #[test]
        fn test_each_non_default_flag_emits_exactly_its_setter() {
            let cases: [(BeanDefinition, &str); 6] = [
                (service().with_primary(true), "bd.set_primary(true);"),
                (
                    service().with_scope(Scope::Prototype),
                    "bd.set_scope(Scope::Prototype);",
                ),
                (
                    service().with_lazy_init(true),
                    "bd.set_lazy_init(true);",
                ),
                (
                    service().with_autowire_candidate(false),
                    "bd.set_autowire_candidate(false);",
                ),
                (service().with_synthetic(true), "bd.set_synthetic(true);"),
                (
                    service().with_role(Role::Infrastructure),
                    "bd.set_role(Role::Infrastructure);",
                ),
            ];
            for (definition, expected) in cases {
                let rendered = render(&generate("userService", &definition));
                assert!(rendered.contains(expected), "missing `{}` in:\n{}", expected, rendered);
            }
        }

        #[test]
        fn test_explicit_lazy_init_false_is_still_emitted() {
            let rendered = render(&generate("userService", &service().with_lazy_init(false)));
            assert!(rendered.contains("bd.set_lazy_init(false);"));
        }

        #[test]
        fn test_depends_on_lists_names_in_order() {
            let bd = service().with_depends_on(["dataSource", "cache"]);
            let rendered = render(&generate("userService", &bd));
            assert!(rendered.contains("bd.set_depends_on(&[\"dataSource\", \"cache\"]);"));
        }
    }

    mod argument_tests {
        use super::*;

        #[test]
        fn test_single_argument_is_inlined() {
            let bd = service().with_constructor_argument(0, "test");
            let rendered = render(&generate("userService", &bd));
            assert!(rendered.contains("bd.add_indexed_argument(0, \"test\");"));
            assert!(!rendered.contains("ConstructorArgumentValues::new()"));
        }

        #[test]
        fn test_multiple_arguments_are_hoisted() {
            let bd = service()
                .with_constructor_argument(0, BeanValue::Type("std::string::String".into()))
                .with_constructor_argument(1, "test")
                .with_constructor_argument(2, 123i64);
            let rendered = render(&generate("userService", &bd));
            assert!(rendered.contains("let mut args = ConstructorArgumentValues::new();"));
            assert!(rendered.contains("args.add_indexed(0, TypePath::of(\"std::string::String\"));"));
            assert!(rendered.contains("args.add_indexed(1, \"test\");"));
            assert!(rendered.contains("args.add_indexed(2, 123i64);"));
            assert!(rendered.contains("bd.set_constructor_argument_values(args);"));
        }

        #[test]
        fn test_single_property_is_inlined() {
            let bd = service().with_property("timeout", 30i64);
            let rendered = render(&generate("userService", &bd));
            assert!(rendered.contains("bd.add_property_value(\"timeout\", 30i64);"));
        }

        #[test]
        fn test_multiple_properties_are_hoisted() {
            let bd = service()
                .with_property("timeout", 30i64)
                .with_property("name", "primary");
            let rendered = render(&generate("userService", &bd));
            assert!(rendered.contains("let mut pvs = PropertyValues::new();"));
            assert!(rendered.contains("pvs.add(\"timeout\", 30i64);"));
            assert!(rendered.contains("pvs.add(\"name\", \"primary\");"));
            assert!(rendered.contains("bd.set_property_values(pvs);"));
        }
    }

    mod attribute_tests {
        use super::*;

        #[test]
        fn test_attributes_are_dropped_by_default() {
            let bd = service().with_attribute("a", "A");
            let rendered = render(&generate("userService", &bd));
            assert!(!rendered.contains("set_attribute"));
        }

        #[test]
        fn test_filter_admits_attributes_selectively() {
            let options =
                GenerationOptions::default().with_attribute_filter(|name| name == "a");
            let bd = service().with_attribute("a", "A").with_attribute("b", "B");
            let rendered = render(&generate_with(&options, "userService", &bd));
            assert!(rendered.contains("bd.set_attribute(\"a\", \"A\");"));
            assert!(!rendered.contains("\"b\""));
        }
    }

    mod type_expression_tests {
        use super::*;

        #[test]
        fn test_resolved_generics_use_the_resolvable_form() {
            let bd = BeanDefinition::of(ResolvableType::for_class_with_generics(
                "demo::Repository",
                ["demo::User".into()],
            ));
            let rendered = render(&generate("userRepository", &bd));
            assert!(rendered.contains(
                "BeanDefinition::of(ResolvableType::for_class_with_generics(\"demo::Repository\", [\"demo::User\".into()]));"
            ));
        }

        #[test]
        fn test_unresolved_generics_fall_back_to_the_raw_path() {
            let bd = BeanDefinition::of(ResolvableType::for_class_with_generics(
                "demo::Repository",
                [ResolvableType::NONE],
            ));
            let rendered = render(&generate("userRepository", &bd));
            assert!(rendered.contains("BeanDefinition::of(TypePath::of(\"demo::Repository\"));"));
        }
    }

    mod nested_tests {
        use super::*;

        #[test]
        fn test_nested_definition_uses_depth_suffixed_variables() {
            let inner = BeanDefinition::of(ResolvableType::for_class("demo::Inner"))
                .with_primary(true)
                .with_role(Role::Infrastructure);
            let bd = service().with_property("inner", inner);
            let rendered = render(&generate("userService", &bd));
            assert!(rendered.contains("let mut bd_ = BeanDefinition::of("));
            assert!(rendered.contains("bd_.set_primary(true);"));
            assert!(rendered.contains("bd_.set_role(Role::Infrastructure);"));
            assert!(rendered.contains("bd.add_property_value(\"inner\", {"));
        }

        #[test]
        fn test_doubly_nested_definitions_get_a_second_suffix() {
            let innermost = BeanDefinition::of(ResolvableType::for_class("demo::Innermost"));
            let inner = BeanDefinition::of(ResolvableType::for_class("demo::Inner"))
                .with_property("leaf", innermost);
            let bd = service().with_property("inner", inner);
            let rendered = render(&generate("userService", &bd));
            assert!(rendered.contains("let bd__ = BeanDefinition::of("));
            assert!(rendered.contains("bd_.add_property_value(\"leaf\", {"));
        }

        #[test]
        fn test_nested_definition_is_not_registered() {
            let inner = BeanDefinition::of(ResolvableType::for_class("demo::Inner"));
            let bd = service().with_property("inner", inner);
            let rendered = render(&generate("userService", &bd));
            assert_eq!(rendered.matches("register_bean_definition").count(), 1);
        }
    }

    mod reference_tests {
        use super::*;

        #[test]
        fn test_creator_reference_is_recorded() {
            let bd = service().with_executable(
                Executable::constructor("demo::UserService", "new")
                    .with_visibility(Visibility::Module("crate::services".to_string())),
            );
            let contribution = generate("userService", &bd);
            assert_eq!(contribution.referenced().len(), 1);
            let reference = &contribution.referenced()[0];
            assert_eq!(reference.path().as_str(), "demo::UserService");
            assert_eq!(
                reference.visibility(),
                &Visibility::Module("crate::services".to_string())
            );
        }

        #[test]
        fn test_definition_without_creator_registers_a_hint() {
            let mut hints = RuntimeHints::new();
            let mut names = FunctionNameGenerator::new();
            let mut ctx = GenerationContext::new(&mut hints, &mut names);
            BeanRegistrationGenerator::default()
                .generate("userService", &service(), &[], &mut ctx)
                .unwrap();
            assert!(hints
                .reflection()
                .contains(&"demo::UserService".into(), HintCategory::Instantiate));
        }
    }

    mod determinism_tests {
        use super::*;
        use wyvern_core::BeanValue;

        #[test]
        fn test_repeated_generation_is_byte_identical() {
            let bd = service()
                .with_primary(true)
                .with_property("labels", BeanValue::map([entry("b", 2i64), entry("a", 1i64)]))
                .with_constructor_argument(0, BeanValue::set(["z".into(), "a".into()]));
            let first = render(&generate("userService", &bd));
            let second = render(&generate("userService", &bd));
            assert_eq!(first, second);
        }

        #[test]
        fn test_unordered_map_keys_emit_sorted() {
            let bd = service()
                .with_property("labels", BeanValue::map([entry("b", 2i64), entry("a", 1i64)]));
            let rendered = render(&generate("userService", &bd));
            assert!(rendered.contains("managed_map! { \"a\" => 1i64, \"b\" => 2i64 }"));
        }

        #[test]
        fn test_linked_set_emits_in_insertion_order() {
            let bd = service().with_property(
                "ports",
                BeanValue::linked_set(BeanValue::list([2i64.into(), 1i64.into()])),
            );
            let rendered = render(&generate("userService", &bd));
            assert!(rendered.contains("BeanValue::linked_set(managed_list![2i64, 1i64])"));
        }
    }
}
