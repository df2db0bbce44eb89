// wyvern-core: Bean 定义元数据模型与最小运行期容器
//
// AOT 生成器（wyvern-aot）读取这里的元数据并产出可直接执行的注册代码；
// 生成的代码再通过这里的 API 把同样的 Bean 图重建到一个新的工厂里。
//
// 提供：
// - BeanDefinition / ConstructorArgumentValues / PropertyValues 元数据
// - BeanValue 递归值模型（含受管集合与内嵌定义）
// - 单例和原型作用域的最小 BeanFactory 实现

pub mod definition;
pub mod error;
pub mod factory;
pub mod logging;
pub mod resolvable;
pub mod scope;
pub mod utils;
pub mod value;

// 重新导出常用类型
pub use definition::{
    BeanDefinition, BeanInstance, ConstructorArgumentValues, Executable, ExecutableKind,
    InstanceSupplier, Parameter, PropertyValue, PropertyValues, ValueHolder, Visibility,
};
pub use error::{ContainerError, ContainerResult, Result};
pub use factory::{
    BeanFactory, ConfigurableBeanFactory, DefaultListableBeanFactory, ListableBeanFactory,
};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use resolvable::{ResolvableType, TypePath};
pub use scope::{Role, Scope};
pub use value::{entry, BeanValue, EnumRef};

/// Prelude 模块，包含生成代码所需的全部类型和宏
pub mod prelude {
    pub use crate::definition::{
        BeanDefinition, BeanInstance, ConstructorArgumentValues, Executable, ExecutableKind,
        PropertyValues, ValueHolder, Visibility,
    };
    pub use crate::error::{ContainerError, ContainerResult};
    pub use crate::factory::{
        BeanFactory, ConfigurableBeanFactory, DefaultListableBeanFactory, ListableBeanFactory,
    };
    pub use crate::resolvable::{ResolvableType, TypePath};
    pub use crate::scope::{Role, Scope};
    pub use crate::value::{entry, BeanValue, EnumRef};
    pub use crate::{managed_list, managed_map, managed_set};
}
