use thiserror::Error;

/// 容器统一错误类型
///
/// 元数据注册和 Bean 实例化过程中所有可能的失败情况。
/// 生成器一侧的错误定义在 wyvern-aot 中，两者互不包含。
#[derive(Debug, Error)]
pub enum ContainerError {
    /// 请求的 Bean 不存在
    #[error("Bean not found: '{0}'")]
    BeanNotFound(String),

    /// 同名 Bean 已注册
    #[error("Bean already exists: '{0}'")]
    BeanAlreadyExists(String),

    /// Bean 实例化失败
    #[error("Bean creation failed: {0}")]
    BeanCreationFailed(String),

    /// Bean 定义没有配置实例供应器
    #[error("No instance supplier configured for bean '{0}'")]
    MissingInstanceSupplier(String),

    /// 类型不匹配
    #[error("Type mismatch: expected '{expected}', found '{found}'")]
    TypeMismatch { expected: String, found: String },

    /// 配置已冻结，不允许修改
    #[error("Configuration is frozen: {0}")]
    ConfigurationFrozen(String),

    /// 其他错误
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// 容器操作的统一返回类型
pub type ContainerResult<T> = std::result::Result<T, ContainerError>;

/// Re-export for callers composing container errors with `.context()`.
pub use anyhow::Result;
