//! 受保护访问协调
//!
//! 生成代码与 Bean 处于同一个 crate，`pub` 和 `pub(crate)` 的创建
//! 入口在默认注册模块里就能调用；模块私有（`pub(in crate::…)`）的
//! 入口要求调用点物理上位于该模块内。协调器把这类注册函数搬进
//! 目标模块下的特权子模块，原位置留一个同名转发函数，调用方无需
//! 感知搬迁。

use wyvern_core::{TypePath, Visibility};

use crate::code::CodeBlock;
use crate::generated::{GeneratedFunction, GeneratedModule, ItemVisibility, SourceFile};
use crate::registration::CodeContribution;

/// 特权子模块的固定名称
pub const PRIVILEGED_MODULE: &str = "aot_registrations";

const PRELUDE_IMPORT: &str = "use wyvern_core::prelude::*;";

/// 生成语句引用到的条目及其可见性
#[derive(Debug, Clone, PartialEq)]
pub struct ItemReference {
    path: TypePath,
    visibility: Visibility,
}

impl ItemReference {
    pub fn new(path: impl Into<TypePath>, visibility: Visibility) -> Self {
        Self {
            path: path.into(),
            visibility,
        }
    }

    pub fn path(&self) -> &TypePath {
        &self.path
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }
}

/// 把各 Bean 的生成产物分配到默认模块或特权模块
pub struct AccessCoordinator {
    default_module: GeneratedModule,
    privileged: Vec<(String, GeneratedModule)>,
}

impl AccessCoordinator {
    pub fn new(file_name: impl Into<String>) -> Self {
        let mut default_module = GeneratedModule::new(file_name);
        default_module.add_preamble(PRELUDE_IMPORT);
        Self {
            default_module,
            privileged: Vec::new(),
        }
    }

    /// 放置一个生成产物，返回默认模块内可调用的函数名
    pub fn route(&mut self, contribution: CodeContribution) -> String {
        let name = contribution.function().name().to_string();
        let Some(module_path) = privileged_module_path(contribution.referenced()) else {
            let (function, helpers) = contribution.into_functions();
            for helper in helpers {
                self.default_module.push_function(helper);
            }
            self.default_module.push_function(function);
            return name;
        };

        tracing::debug!(
            "Routing registration function '{}' into privileged module {}::{}",
            name,
            module_path,
            PRIVILEGED_MODULE
        );
        let stub = forwarding_stub(&module_path, contribution.function());
        let module = self.privileged_module(&module_path);
        let (mut function, helpers) = contribution.into_functions();
        function.set_visibility(ItemVisibility::Crate);
        for helper in helpers {
            module.push_function(helper);
        }
        module.push_function(function);
        self.default_module.push_function(stub);
        name
    }

    pub fn default_module_mut(&mut self) -> &mut GeneratedModule {
        &mut self.default_module
    }

    /// 物化所有模块，默认模块在前，特权模块按首次出现顺序
    pub fn into_source_files(self) -> Vec<SourceFile> {
        let mut files = vec![self.default_module.into_source_file()];
        files.extend(
            self.privileged
                .into_iter()
                .map(|(_, module)| module.into_source_file()),
        );
        files
    }

    /// 每个特权路径只分配一次模块，后续复用
    fn privileged_module(&mut self, module_path: &str) -> &mut GeneratedModule {
        if let Some(index) = self
            .privileged
            .iter()
            .position(|(path, _)| path == module_path)
        {
            return &mut self.privileged[index].1;
        }

        let mut segments: Vec<String> = module_path
            .split("::")
            .skip_while(|segment| *segment == "crate")
            .map(str::to_string)
            .collect();
        segments.push(PRIVILEGED_MODULE.to_string());
        let mut module = GeneratedModule::new(format!("{}.rs", PRIVILEGED_MODULE))
            .with_module_path(segments);
        module.add_preamble(PRELUDE_IMPORT);
        let index = self.privileged.len();
        self.privileged.push((module_path.to_string(), module));
        &mut self.privileged[index].1
    }
}

/// 引用中限制最深的模块路径；只有 `pub` / `pub(crate)` 时返回 `None`
fn privileged_module_path(references: &[ItemReference]) -> Option<String> {
    references
        .iter()
        .filter_map(|reference| match reference.visibility() {
            Visibility::Module(path) => Some(path.as_str()),
            Visibility::Public | Visibility::Crate => None,
        })
        .max_by_key(|path| path.split("::").count())
        .map(str::to_string)
}

fn forwarding_stub(module_path: &str, function: &GeneratedFunction) -> GeneratedFunction {
    let mut body = CodeBlock::new();
    body.line(format!(
        "{}::{}::{}(factory)",
        module_path,
        PRIVILEGED_MODULE,
        function.name()
    ));
    GeneratedFunction::new(function.name())
        .with_param("factory", "&mut DefaultListableBeanFactory")
        .with_return_type("ContainerResult<()>")
        .with_body(body)
}
