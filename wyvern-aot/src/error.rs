use thiserror::Error;

/// 生成器统一错误类型
///
/// 所有错误都是致命的：生成是确定性的，重试没有意义（见 wyvern-compile
/// 的编译错误聚合，属于另一类失败）。
#[derive(Debug, Error)]
pub enum AotError {
    /// 值没有匹配的发射器 - 编写元数据时的硬错误
    #[error("No value code emitter matched value of kind '{kind}' (declared type: {declared})")]
    UnsupportedValue { kind: String, declared: String },

    /// 遇到内嵌 Bean 定义但没有配置内嵌定义写出器 - 调用方配置错误
    #[error("A nested bean definition was encountered but no nested definition writer is configured")]
    MissingNestedWriter,

    /// 创建入口声明了形参但没有对应索引的构造参数值
    #[error("Missing constructor argument at index {index} for creator '{path}'")]
    MissingConstructorArgument { index: usize, path: String },

    /// 值无法渲染为创建入口的原生实参
    #[error("Value of kind '{kind}' cannot be rendered as a native creator argument (index {index})")]
    UnsupportedArgument { kind: String, index: usize },

    /// 其他错误
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// 生成器操作的统一返回类型
pub type AotResult<T> = std::result::Result<T, AotError>;
