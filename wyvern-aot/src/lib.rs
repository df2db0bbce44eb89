// wyvern-aot: Bean 注册代码的预先（AOT）生成器
//
// 读取 wyvern-core 的 Bean 定义元数据，生成把同一张 Bean 图重建到
// DefaultListableBeanFactory 的 Rust 源码。生成是纯同步、确定性的：
// 同样的输入产出逐字节相同的文件。
//
// 流水线（叶子在前）：
// - value     值 -> 表达式的发射器链（标量、类型、集合、内嵌定义）
// - instance  实例供应器语句（创建入口 + 构造后修改）
// - registration  逐 Bean 的注册函数
// - access    受保护访问的模块路由
// - aggregate 聚合为 initialize 入口与源文件集合

pub mod access;
pub mod aggregate;
pub mod code;
pub mod error;
pub mod generated;
pub mod hints;
pub mod instance;
pub mod registration;
pub mod value;

pub use access::{AccessCoordinator, ItemReference, PRIVILEGED_MODULE};
pub use aggregate::BeanRegistrations;
pub use code::CodeBlock;
pub use error::{AotError, AotResult};
pub use generated::{
    FunctionNameGenerator, GeneratedFunction, GeneratedModule, GenerationContext, ItemVisibility,
    NestedDefinitionWriter, SourceFile,
};
pub use hints::{HintCategory, ReflectionHints, RuntimeHints, TypeHint};
pub use instance::{InstanceContributor, InstanceSupplierGenerator};
pub use registration::{
    BeanRegistrationGenerator, CodeContribution, GenerationOptions,
};
pub use value::{ValueEmitter, ValueEmitterChain, DEFAULT_MAP_ENTRY_THRESHOLD};
