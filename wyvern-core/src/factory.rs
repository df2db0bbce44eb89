//! Bean Factory - 运行期容器接口
//!
//! 生成的注册代码针对这里的 `DefaultListableBeanFactory` 执行。
//! 接口按能力拆分，与 Spring 的 BeanFactory 层次对应。

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::definition::BeanDefinition;
use crate::error::{ContainerError, ContainerResult};
use crate::scope::Scope;

/// BeanFactory - 最基础的容器接口
pub trait BeanFactory: Send + Sync {
    /// 通过名称获取 Bean
    fn get_bean(&self, name: &str) -> ContainerResult<Arc<dyn Any + Send + Sync>>;

    /// 检查是否包含指定名称的 Bean
    fn contains_bean(&self, name: &str) -> bool;
}

/// ListableBeanFactory - 可列举的 Bean 工厂
pub trait ListableBeanFactory: BeanFactory {
    /// 获取所有 Bean 的名称
    fn get_bean_names(&self) -> Vec<String>;

    /// 获取 Bean 定义的数量
    fn get_bean_definition_count(&self) -> usize;
}

/// ConfigurableBeanFactory - 可配置的 Bean 工厂
pub trait ConfigurableBeanFactory: BeanFactory {
    /// 注册 Bean 定义
    fn register_bean_definition(
        &mut self,
        name: impl Into<String>,
        definition: BeanDefinition,
    ) -> ContainerResult<()>
    where
        Self: Sized;

    /// 检查是否包含指定的 Bean 定义
    fn contains_bean_definition(&self, name: &str) -> bool;

    /// 获取单个 Bean 定义（克隆）
    fn get_bean_definition(&self, name: &str) -> ContainerResult<BeanDefinition>;

    /// 移除 Bean 定义
    fn remove_bean_definition(&mut self, name: &str) -> ContainerResult<()>;

    /// 冻结配置（不再允许修改 Bean 定义）
    fn freeze_configuration(&self);

    /// 检查配置是否已冻结
    fn is_configuration_frozen(&self) -> bool;
}

/// DefaultListableBeanFactory - 默认实现
///
/// 注册顺序由调用方决定并被保留；单例实例在首次请求时创建并缓存。
pub struct DefaultListableBeanFactory {
    /// Bean 定义存储（保留注册顺序）
    definitions: Vec<(String, BeanDefinition)>,

    /// 单例 Bean 缓存
    singletons: RwLock<HashMap<String, Arc<dyn Any + Send + Sync>>>,

    /// 配置是否已冻结
    configuration_frozen: RwLock<bool>,
}

impl DefaultListableBeanFactory {
    /// 创建新的 Bean 工厂
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
            singletons: RwLock::new(HashMap::new()),
            configuration_frozen: RwLock::new(false),
        }
    }

    fn find_definition(&self, name: &str) -> Option<&BeanDefinition> {
        self.definitions
            .iter()
            .find(|(bean_name, _)| bean_name == name)
            .map(|(_, definition)| definition)
    }

    /// 创建 Bean 实例
    fn create_bean_internal(&self, name: &str) -> ContainerResult<Arc<dyn Any + Send + Sync>> {
        let definition = self
            .find_definition(name)
            .ok_or_else(|| ContainerError::BeanNotFound(name.to_string()))?;

        let instance = definition.create_instance(self).map_err(|e| match e {
            ContainerError::MissingInstanceSupplier(_) => e,
            other => ContainerError::BeanCreationFailed(format!("{}: {}", name, other)),
        })?;

        Ok(Arc::from(instance))
    }

    /// 预实例化所有非延迟的单例 Bean
    pub fn preinstantiate_singletons(&self) -> ContainerResult<()> {
        let eager: Vec<String> = self
            .definitions
            .iter()
            .filter(|(_, definition)| {
                definition.scope() == Scope::Singleton
                    && !definition.lazy_init().unwrap_or(false)
            })
            .map(|(name, _)| name.clone())
            .collect();

        tracing::debug!("Pre-instantiating {} singleton beans", eager.len());

        for name in eager {
            self.get_bean(&name)?;
        }
        Ok(())
    }
}

impl Default for DefaultListableBeanFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl BeanFactory for DefaultListableBeanFactory {
    fn get_bean(&self, name: &str) -> ContainerResult<Arc<dyn Any + Send + Sync>> {
        tracing::trace!("Requesting bean: '{}'", name);

        let scope = self
            .find_definition(name)
            .ok_or_else(|| ContainerError::BeanNotFound(name.to_string()))?
            .scope();

        match scope {
            Scope::Singleton => {
                {
                    let singletons = self.singletons.read();
                    if let Some(bean) = singletons.get(name) {
                        tracing::trace!("Returning cached instance of singleton bean '{}'", name);
                        return Ok(Arc::clone(bean));
                    }
                }

                tracing::debug!("Creating shared instance of singleton bean '{}'", name);
                let bean = self.create_bean_internal(name)?;

                let mut singletons = self.singletons.write();
                singletons.insert(name.to_string(), Arc::clone(&bean));
                Ok(bean)
            }
            Scope::Prototype => {
                tracing::debug!("Creating new instance of prototype bean '{}'", name);
                self.create_bean_internal(name)
            }
        }
    }

    fn contains_bean(&self, name: &str) -> bool {
        self.find_definition(name).is_some()
    }
}

impl ListableBeanFactory for DefaultListableBeanFactory {
    fn get_bean_names(&self) -> Vec<String> {
        self.definitions
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn get_bean_definition_count(&self) -> usize {
        self.definitions.len()
    }
}

impl ConfigurableBeanFactory for DefaultListableBeanFactory {
    fn register_bean_definition(
        &mut self,
        name: impl Into<String>,
        definition: BeanDefinition,
    ) -> ContainerResult<()> {
        let name = name.into();

        if *self.configuration_frozen.read() {
            return Err(ContainerError::ConfigurationFrozen(format!(
                "cannot register bean definition '{}'",
                name
            )));
        }

        if self.find_definition(&name).is_some() {
            tracing::warn!("Bean '{}' already exists, registration failed", name);
            return Err(ContainerError::BeanAlreadyExists(name));
        }

        tracing::debug!(
            "Registering bean definition: name='{}', type='{}'",
            name,
            definition
                .type_path()
                .map(|path| path.as_str())
                .unwrap_or("<unresolved>")
        );
        self.definitions.push((name, definition));
        Ok(())
    }

    fn contains_bean_definition(&self, name: &str) -> bool {
        self.find_definition(name).is_some()
    }

    fn get_bean_definition(&self, name: &str) -> ContainerResult<BeanDefinition> {
        self.find_definition(name)
            .cloned()
            .ok_or_else(|| ContainerError::BeanNotFound(name.to_string()))
    }

    fn remove_bean_definition(&mut self, name: &str) -> ContainerResult<()> {
        if *self.configuration_frozen.read() {
            return Err(ContainerError::ConfigurationFrozen(format!(
                "cannot remove bean definition '{}'",
                name
            )));
        }

        let index = self
            .definitions
            .iter()
            .position(|(bean_name, _)| bean_name == name)
            .ok_or_else(|| ContainerError::BeanNotFound(name.to_string()))?;
        self.definitions.remove(index);
        self.singletons.write().remove(name);
        Ok(())
    }

    fn freeze_configuration(&self) {
        *self.configuration_frozen.write() = true;
        tracing::debug!("Bean factory configuration frozen");
    }

    fn is_configuration_frozen(&self) -> bool {
        *self.configuration_frozen.read()
    }
}
