/// Bean 的作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// 单例模式 - 容器中只有一个实例
    Singleton,

    /// 原型模式 - 每次请求都创建新实例
    Prototype,
}

impl Default for Scope {
    fn default() -> Self {
        Scope::Singleton
    }
}

impl Scope {
    /// 作用域的字符串名称
    pub fn name(&self) -> &'static str {
        match self {
            Scope::Singleton => "singleton",
            Scope::Prototype => "prototype",
        }
    }
}

/// Bean 的角色
///
/// 对应 Spring 的 ROLE_APPLICATION / ROLE_SUPPORT / ROLE_INFRASTRUCTURE 常量。
/// Application 为默认角色，代码生成时只有非默认角色才会被写出。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// 应用程序定义的 Bean（默认）
    Application,

    /// 配置的支持性 Bean
    Support,

    /// 框架内部基础设施 Bean
    Infrastructure,
}

impl Default for Role {
    fn default() -> Self {
        Role::Application
    }
}
