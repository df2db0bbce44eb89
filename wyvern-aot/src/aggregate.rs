//! 注册函数的聚合
//!
//! 收集 `(Bean 名, 定义)` 对，驱动逐 Bean 的注册生成和访问路由，
//! 最后物化为源文件集合。入口函数 `initialize` 按加入顺序逐个调用
//! 注册函数，不做重排、去重或依赖排序，顺序完全由调用方决定。

use wyvern_core::BeanDefinition;

use crate::access::AccessCoordinator;
use crate::code::CodeBlock;
use crate::error::AotResult;
use crate::generated::{
    FunctionNameGenerator, GeneratedFunction, GenerationContext, ItemVisibility, SourceFile,
};
use crate::hints::RuntimeHints;
use crate::instance::InstanceContributor;
use crate::registration::{BeanRegistrationGenerator, GenerationOptions};

/// 聚合入口函数的固定名称
const INITIALIZE_FUNCTION: &str = "initialize";

struct Entry {
    bean_name: String,
    definition: BeanDefinition,
    contributors: Vec<InstanceContributor>,
}

/// 一批待生成的 Bean 注册
pub struct BeanRegistrations {
    options: GenerationOptions,
    entries: Vec<Entry>,
}

impl BeanRegistrations {
    pub fn new() -> Self {
        Self::with_options(GenerationOptions::default())
    }

    pub fn with_options(options: GenerationOptions) -> Self {
        Self {
            options,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, bean_name: impl Into<String>, definition: BeanDefinition) {
        self.add_with_contributors(bean_name, definition, Vec::new());
    }

    /// 加入一个带构造后修改的注册项
    pub fn add_with_contributors(
        &mut self,
        bean_name: impl Into<String>,
        definition: BeanDefinition,
        contributors: Vec<InstanceContributor>,
    ) {
        self.entries.push(Entry {
            bean_name: bean_name.into(),
            definition,
            contributors,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 生成全部注册代码
    ///
    /// 运行期提示写入调用方拥有的 `hints`；输出的第一个文件是默认
    /// 注册模块，其后是访问协调器分配的特权模块。
    pub fn generate(&self, hints: &mut RuntimeHints) -> AotResult<Vec<SourceFile>> {
        tracing::info!("Generating registration code for {} bean(s)", self.entries.len());

        let generator = BeanRegistrationGenerator::new(self.options.clone());
        let mut coordinator = AccessCoordinator::new(self.options.file_name());
        let mut names = FunctionNameGenerator::new();
        // 入口名先占住，逐 Bean 的函数名绕开它
        let reserved = names.generate(INITIALIZE_FUNCTION);
        debug_assert_eq!(reserved, INITIALIZE_FUNCTION);

        let mut body = CodeBlock::new();
        for entry in &self.entries {
            let contribution = {
                let mut ctx = GenerationContext::new(hints, &mut names);
                generator.generate(
                    &entry.bean_name,
                    &entry.definition,
                    &entry.contributors,
                    &mut ctx,
                )?
            };
            let function_name = coordinator.route(contribution);
            body.line(format!("{}(factory)?;", function_name));
        }
        body.line("Ok(())");

        let initialize = GeneratedFunction::new(INITIALIZE_FUNCTION)
            .with_visibility(ItemVisibility::Public)
            .with_param("factory", "&mut DefaultListableBeanFactory")
            .with_return_type("ContainerResult<()>")
            .with_body(body);
        coordinator.default_module_mut().push_function(initialize);

        Ok(coordinator.into_source_files())
    }
}

impl Default for BeanRegistrations {
    fn default() -> Self {
        Self::new()
    }
}
