//! 生成产物模型
//!
//! `GeneratedModule` 是一次生成过程中可变累积的输出单元，结束时恰好
//! 物化一次为 `SourceFile`（通过按值消费保证）。函数名通过
//! `FunctionNameGenerator` 做确定性的冲突避让，保证重复生成产出
//! 逐字节相同的结果。
//!
//! `GenerationContext` 把单次生成的可变状态（提示注册表、命名器、
//! 辅助函数槽、内嵌定义写出器、嵌套深度）作为普通数据穿透整个发射
//! 链，嵌套深度在递归前后保存恢复，绝不跨兄弟共享。

use std::collections::HashSet;

use wyvern_core::BeanDefinition;

use crate::access::ItemReference;
use crate::code::CodeBlock;
use crate::error::AotResult;
use crate::hints::RuntimeHints;

/// 生成条目的可见性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemVisibility {
    Private,
    Crate,
    Public,
}

impl ItemVisibility {
    fn prefix(&self) -> &'static str {
        match self {
            ItemVisibility::Private => "",
            ItemVisibility::Crate => "pub(crate) ",
            ItemVisibility::Public => "pub ",
        }
    }
}

/// 单个生成函数
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFunction {
    name: String,
    visibility: ItemVisibility,
    params: Vec<(String, String)>,
    return_type: Option<String>,
    body: CodeBlock,
}

impl GeneratedFunction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: ItemVisibility::Private,
            params: Vec::new(),
            return_type: None,
            body: CodeBlock::new(),
        }
    }

    pub fn with_visibility(mut self, visibility: ItemVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push((name.into(), ty.into()));
        self
    }

    pub fn with_return_type(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn with_body(mut self, body: CodeBlock) -> Self {
        self.body = body;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &CodeBlock {
        &self.body
    }

    pub fn set_visibility(&mut self, visibility: ItemVisibility) {
        self.visibility = visibility;
    }

    pub fn set_body(&mut self, body: CodeBlock) {
        self.body = body;
    }

    /// 渲染为完整的函数条目
    pub fn render(&self) -> CodeBlock {
        let params = self
            .params
            .iter()
            .map(|(name, ty)| format!("{}: {}", name, ty))
            .collect::<Vec<_>>()
            .join(", ");
        let signature = match &self.return_type {
            Some(ret) => format!(
                "{}fn {}({}) -> {} {{",
                self.visibility.prefix(),
                self.name,
                params,
                ret
            ),
            None => format!("{}fn {}({}) {{", self.visibility.prefix(), self.name, params),
        };

        let mut code = CodeBlock::new();
        code.line(signature);
        code.block(self.body.clone());
        code.line("}");
        code
    }
}

/// 物化后的源文件
///
/// `module_path` 是该文件内容应当挂载到的 crate 内模块路径
/// （空表示默认注册模块），由受保护访问协调器决定。
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub module_path: Vec<String>,
    pub file_name: String,
    pub content: String,
}

/// 可变累积的生成模块，按值物化一次
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedModule {
    module_path: Vec<String>,
    file_name: String,
    preamble: Vec<String>,
    functions: Vec<GeneratedFunction>,
}

impl GeneratedModule {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            module_path: Vec::new(),
            file_name: file_name.into(),
            preamble: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn with_module_path(mut self, path: Vec<String>) -> Self {
        self.module_path = path;
        self
    }

    /// 追加 preamble 行（use 声明等），去重
    pub fn add_preamble(&mut self, line: impl Into<String>) {
        let line = line.into();
        if !self.preamble.contains(&line) {
            self.preamble.push(line);
        }
    }

    pub fn push_function(&mut self, function: GeneratedFunction) {
        self.functions.push(function);
    }

    pub fn module_path(&self) -> &[String] {
        &self.module_path
    }

    pub fn functions(&self) -> &[GeneratedFunction] {
        &self.functions
    }

    /// 物化为源文件，消费自身保证只发生一次
    pub fn into_source_file(self) -> SourceFile {
        let mut content = String::from("// Generated by wyvern-aot. Do not edit.\n");
        if !self.preamble.is_empty() {
            content.push('\n');
            for line in &self.preamble {
                content.push_str(line);
                content.push('\n');
            }
        }
        for function in &self.functions {
            content.push('\n');
            content.push_str(&function.render().render());
        }
        SourceFile {
            module_path: self.module_path,
            file_name: self.file_name,
            content,
        }
    }
}

/// 确定性的函数名分配器
///
/// 首次请求返回原名，冲突时追加递增的数字后缀。
#[derive(Debug, Default)]
pub struct FunctionNameGenerator {
    used: HashSet<String>,
}

impl FunctionNameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&mut self, requested: &str) -> String {
        if self.used.insert(requested.to_string()) {
            return requested.to_string();
        }
        let mut counter = 1usize;
        loop {
            let candidate = format!("{}{}", requested, counter);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

/// 内嵌 Bean 定义的写出器
///
/// 由 Bean 注册生成器实现：对内嵌定义递归生成"只构建不注册"的
/// 块表达式。发射器配置中没有写出器时，遇到内嵌定义立即失败。
pub trait NestedDefinitionWriter {
    fn write_nested(
        &self,
        ctx: &mut GenerationContext<'_>,
        definition: &BeanDefinition,
    ) -> AotResult<String>;
}

/// 单次生成过程的可变上下文
pub struct GenerationContext<'a> {
    hints: &'a mut RuntimeHints,
    names: &'a mut FunctionNameGenerator,
    helpers: Option<&'a mut Vec<GeneratedFunction>>,
    referenced: Option<&'a mut Vec<ItemReference>>,
    nested_writer: Option<&'a dyn NestedDefinitionWriter>,
    depth: usize,
}

impl<'a> GenerationContext<'a> {
    pub fn new(hints: &'a mut RuntimeHints, names: &'a mut FunctionNameGenerator) -> Self {
        Self {
            hints,
            names,
            helpers: None,
            referenced: None,
            nested_writer: None,
            depth: 0,
        }
    }

    pub fn with_helpers(mut self, helpers: &'a mut Vec<GeneratedFunction>) -> Self {
        self.helpers = Some(helpers);
        self
    }

    pub fn with_referenced(mut self, referenced: &'a mut Vec<ItemReference>) -> Self {
        self.referenced = Some(referenced);
        self
    }

    pub fn with_nested_writer(mut self, writer: &'a dyn NestedDefinitionWriter) -> Self {
        self.nested_writer = Some(writer);
        self
    }

    /// 重新借用出一个作用域内上下文，替换内嵌定义写出器
    ///
    /// 注册生成器在递归进入内嵌定义前用它把写出器指向更深一层的
    /// 生成器实例；深度按值复制，递归中的修改不会泄漏回外层。
    pub fn scoped<'b>(
        &'b mut self,
        writer: &'b dyn NestedDefinitionWriter,
    ) -> GenerationContext<'b> {
        GenerationContext {
            hints: &mut *self.hints,
            names: &mut *self.names,
            helpers: self.helpers.as_deref_mut(),
            referenced: self.referenced.as_deref_mut(),
            nested_writer: Some(writer),
            depth: self.depth,
        }
    }

    pub fn hints_mut(&mut self) -> &mut RuntimeHints {
        self.hints
    }

    pub fn nested_writer(&self) -> Option<&'a dyn NestedDefinitionWriter> {
        self.nested_writer
    }

    /// 分配一个不与既有函数冲突的函数名
    pub fn allocate_function_name(&mut self, requested: &str) -> String {
        self.names.generate(requested)
    }

    /// 当前上下文是否支持生成辅助函数
    pub fn supports_helper_functions(&self) -> bool {
        self.helpers.is_some()
    }

    /// 申请一个辅助函数槽
    ///
    /// 返回分配到的函数名；上下文不支持辅助函数时返回 `None`，
    /// 调用方必须回退到纯表达式形式。
    pub fn add_helper_function(
        &mut self,
        requested: &str,
        build: impl FnOnce(&str) -> GeneratedFunction,
    ) -> Option<String> {
        let helpers = self.helpers.as_deref_mut()?;
        let name = self.names.generate(requested);
        helpers.push(build(&name));
        Some(name)
    }

    /// 记录生成语句引用到的条目（用于受保护访问分析）
    pub fn record_reference(&mut self, reference: ItemReference) {
        if let Some(referenced) = self.referenced.as_deref_mut() {
            if !referenced.contains(&reference) {
                referenced.push(reference);
            }
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// 当前深度对应的定义局部变量名：`bd`、`bd_`、`bd__`…
    pub fn local_definition_var(&self) -> String {
        format!("bd{}", "_".repeat(self.depth))
    }

    /// 加深一层执行 `f`，返回前恢复深度
    pub fn enter_nested<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
