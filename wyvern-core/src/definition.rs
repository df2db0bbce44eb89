//! Bean 定义 - 描述如何创建和管理 Bean
//!
//! 生成器只读取这里的元数据；运行期工厂通过实例供应器创建 Bean。
//! 与 Spring 的 RootBeanDefinition 对应：作用域、各类标志、角色、
//! 依赖列表、带索引的构造参数、属性值、任意命名属性，以及至多一个
//! 规范的创建入口（构造函数或工厂方法）。

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ContainerError, ContainerResult};
use crate::factory::DefaultListableBeanFactory;
use crate::resolvable::{ResolvableType, TypePath};
use crate::scope::{Role, Scope};
use crate::value::BeanValue;

/// 容器管理的 Bean 实例
pub type BeanInstance = Box<dyn Any + Send + Sync>;

/// 实例供应器 - 生成代码为每个 Bean 定义安装的创建闭包
pub type InstanceSupplier =
    Arc<dyn Fn(&DefaultListableBeanFactory) -> ContainerResult<BeanInstance> + Send + Sync>;

/// 创建入口的可见性
///
/// 生成的注册代码假定与 Bean 处于同一个 crate：`Public` 和 `Crate`
/// 可见性的入口可以直接调用，`Module` 可见性的入口要求调用点物理上
/// 位于指定模块内（模块路径以 `crate::` 开头）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Crate,
    Module(String),
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Public
    }
}

/// 创建入口的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutableKind {
    Constructor,
    FactoryMethod,
}

/// 创建入口的形参
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    declared: ResolvableType,
}

impl Parameter {
    pub fn new(name: impl Into<String>, declared: impl Into<ResolvableType>) -> Self {
        Self {
            name: name.into(),
            declared: declared.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared(&self) -> &ResolvableType {
        &self.declared
    }
}

/// 规范的创建入口（构造函数或工厂方法）
///
/// 不变式：每个 Bean 定义至多选定一个 `Executable`。
#[derive(Debug, Clone, PartialEq)]
pub struct Executable {
    kind: ExecutableKind,
    declaring: TypePath,
    function: String,
    parameters: Vec<Parameter>,
    visibility: Visibility,
}

impl Executable {
    /// 关联函数形式的构造入口，例如 `UserService::new`
    pub fn constructor(declaring: impl Into<TypePath>, function: impl Into<String>) -> Self {
        Self {
            kind: ExecutableKind::Constructor,
            declaring: declaring.into(),
            function: function.into(),
            parameters: Vec::new(),
            visibility: Visibility::Public,
        }
    }

    /// 工厂方法入口，声明类型与 Bean 类型不同
    pub fn factory_method(declaring: impl Into<TypePath>, function: impl Into<String>) -> Self {
        Self {
            kind: ExecutableKind::FactoryMethod,
            declaring: declaring.into(),
            function: function.into(),
            parameters: Vec::new(),
            visibility: Visibility::Public,
        }
    }

    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        declared: impl Into<ResolvableType>,
    ) -> Self {
        self.parameters.push(Parameter::new(name, declared));
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn kind(&self) -> ExecutableKind {
        self.kind
    }

    pub fn declaring(&self) -> &TypePath {
        &self.declaring
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    /// 完全限定的调用路径，例如 `demo::UserService::new`
    pub fn path(&self) -> String {
        format!("{}::{}", self.declaring, self.function)
    }
}

/// 带索引的构造参数值
#[derive(Debug, Clone, PartialEq)]
pub struct ValueHolder {
    value: BeanValue,
    declared: Option<ResolvableType>,
}

impl ValueHolder {
    pub fn new(value: impl Into<BeanValue>) -> Self {
        Self {
            value: value.into(),
            declared: None,
        }
    }

    pub fn with_declared(mut self, declared: impl Into<ResolvableType>) -> Self {
        self.declared = Some(declared.into());
        self
    }

    pub fn value(&self) -> &BeanValue {
        &self.value
    }

    pub fn declared(&self) -> Option<&ResolvableType> {
        self.declared.as_ref()
    }
}

/// 索引 -> 值的构造参数表
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstructorArgumentValues {
    indexed: BTreeMap<usize, ValueHolder>,
}

impl ConstructorArgumentValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_indexed(&mut self, index: usize, value: impl Into<BeanValue>) {
        self.indexed.insert(index, ValueHolder::new(value));
    }

    pub fn add_indexed_holder(&mut self, index: usize, holder: ValueHolder) {
        self.indexed.insert(index, holder);
    }

    pub fn get(&self, index: usize) -> Option<&ValueHolder> {
        self.indexed.get(&index)
    }

    /// 按索引升序遍历
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ValueHolder)> {
        self.indexed.iter().map(|(index, holder)| (*index, holder))
    }

    pub fn len(&self) -> usize {
        self.indexed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexed.is_empty()
    }
}

/// 单个属性值
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    name: String,
    value: BeanValue,
}

impl PropertyValue {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &BeanValue {
        &self.value
    }
}

/// 保留插入顺序的属性值表，同名后写覆盖先写
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyValues {
    values: Vec<PropertyValue>,
}

impl PropertyValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, value: impl Into<BeanValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.values.iter_mut().find(|pv| pv.name == name) {
            existing.value = value;
        } else {
            self.values.push(PropertyValue { name, value });
        }
    }

    pub fn get(&self, name: &str) -> Option<&BeanValue> {
        self.values
            .iter()
            .find(|pv| pv.name == name)
            .map(|pv| &pv.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyValue> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Bean 定义
pub struct BeanDefinition {
    resolvable: ResolvableType,
    scope: Scope,
    primary: bool,
    lazy_init: Option<bool>,
    autowire_candidate: bool,
    synthetic: bool,
    role: Role,
    depends_on: Vec<String>,
    constructor_arguments: ConstructorArgumentValues,
    property_values: PropertyValues,
    attributes: BTreeMap<String, BeanValue>,
    executable: Option<Executable>,
    instance_supplier: Option<InstanceSupplier>,
}

impl BeanDefinition {
    /// 创建指定类型的 Bean 定义，其余元数据全部取默认值
    pub fn of(resolvable: impl Into<ResolvableType>) -> Self {
        Self {
            resolvable: resolvable.into(),
            scope: Scope::default(),
            primary: false,
            lazy_init: None,
            autowire_candidate: true,
            synthetic: false,
            role: Role::default(),
            depends_on: Vec::new(),
            constructor_arguments: ConstructorArgumentValues::new(),
            property_values: PropertyValues::new(),
            attributes: BTreeMap::new(),
            executable: None,
            instance_supplier: None,
        }
    }

    // ---- 流式构建（容器侧装配元数据时使用） ----

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    pub fn with_lazy_init(mut self, lazy: bool) -> Self {
        self.lazy_init = Some(lazy);
        self
    }

    pub fn with_autowire_candidate(mut self, candidate: bool) -> Self {
        self.autowire_candidate = candidate;
        self
    }

    pub fn with_synthetic(mut self, synthetic: bool) -> Self {
        self.synthetic = synthetic;
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_depends_on(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.depends_on = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_constructor_argument(mut self, index: usize, value: impl Into<BeanValue>) -> Self {
        self.constructor_arguments.add_indexed(index, value);
        self
    }

    pub fn with_constructor_argument_holder(mut self, index: usize, holder: ValueHolder) -> Self {
        self.constructor_arguments.add_indexed_holder(index, holder);
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<BeanValue>) -> Self {
        self.property_values.add(name, value);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<BeanValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_executable(mut self, executable: Executable) -> Self {
        self.executable = Some(executable);
        self
    }

    // ---- 命令式修改（生成代码中的 customizer 块使用） ----

    pub fn set_scope(&mut self, scope: Scope) {
        self.scope = scope;
    }

    pub fn set_primary(&mut self, primary: bool) {
        self.primary = primary;
    }

    pub fn set_lazy_init(&mut self, lazy: bool) {
        self.lazy_init = Some(lazy);
    }

    pub fn set_autowire_candidate(&mut self, candidate: bool) {
        self.autowire_candidate = candidate;
    }

    pub fn set_synthetic(&mut self, synthetic: bool) {
        self.synthetic = synthetic;
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn set_depends_on(&mut self, names: &[&str]) {
        self.depends_on = names.iter().map(|name| name.to_string()).collect();
    }

    pub fn add_indexed_argument(&mut self, index: usize, value: impl Into<BeanValue>) {
        self.constructor_arguments.add_indexed(index, value);
    }

    pub fn set_constructor_argument_values(&mut self, values: ConstructorArgumentValues) {
        self.constructor_arguments = values;
    }

    pub fn add_property_value(&mut self, name: impl Into<String>, value: impl Into<BeanValue>) {
        self.property_values.add(name, value);
    }

    pub fn set_property_values(&mut self, values: PropertyValues) {
        self.property_values = values;
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<BeanValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// 安装实例供应器（完整闭包形式）
    pub fn set_instance_supplier<F>(&mut self, supplier: F)
    where
        F: Fn(&DefaultListableBeanFactory) -> ContainerResult<BeanInstance>
            + Send
            + Sync
            + 'static,
    {
        self.instance_supplier = Some(Arc::new(supplier));
    }

    /// 安装实例供应器（无参创建函数的简写形式）
    pub fn set_instance_supplier_fn<T, F>(&mut self, create: F)
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.instance_supplier = Some(Arc::new(move |_| Ok(Box::new(create()))));
    }

    // ---- 只读访问 ----

    pub fn resolvable(&self) -> &ResolvableType {
        &self.resolvable
    }

    /// 面向用户的类型路径（去掉泛型信息）
    pub fn type_path(&self) -> Option<&TypePath> {
        self.resolvable.type_path()
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn lazy_init(&self) -> Option<bool> {
        self.lazy_init
    }

    pub fn is_autowire_candidate(&self) -> bool {
        self.autowire_candidate
    }

    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    pub fn constructor_argument_values(&self) -> &ConstructorArgumentValues {
        &self.constructor_arguments
    }

    pub fn property_values(&self) -> &PropertyValues {
        &self.property_values
    }

    pub fn attribute(&self, name: &str) -> Option<&BeanValue> {
        self.attributes.get(name)
    }

    /// 属性名按字典序遍历
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &BeanValue)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn executable(&self) -> Option<&Executable> {
        self.executable.as_ref()
    }

    pub fn instance_supplier(&self) -> Option<&InstanceSupplier> {
        self.instance_supplier.as_ref()
    }

    /// 通过实例供应器创建 Bean 实例
    pub fn create_instance(
        &self,
        factory: &DefaultListableBeanFactory,
    ) -> ContainerResult<BeanInstance> {
        let supplier = self.instance_supplier.as_ref().ok_or_else(|| {
            let type_name = self
                .type_path()
                .map(|path| path.to_string())
                .unwrap_or_else(|| "<unresolved>".to_string());
            ContainerError::MissingInstanceSupplier(type_name)
        })?;
        supplier(factory)
    }
}

impl Clone for BeanDefinition {
    fn clone(&self) -> Self {
        Self {
            resolvable: self.resolvable.clone(),
            scope: self.scope,
            primary: self.primary,
            lazy_init: self.lazy_init,
            autowire_candidate: self.autowire_candidate,
            synthetic: self.synthetic,
            role: self.role,
            depends_on: self.depends_on.clone(),
            constructor_arguments: self.constructor_arguments.clone(),
            property_values: self.property_values.clone(),
            attributes: self.attributes.clone(),
            executable: self.executable.clone(),
            instance_supplier: self.instance_supplier.clone(),
        }
    }
}

/// 相等性只比较可观测元数据，不比较实例供应器
impl PartialEq for BeanDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.resolvable == other.resolvable
            && self.scope == other.scope
            && self.primary == other.primary
            && self.lazy_init == other.lazy_init
            && self.autowire_candidate == other.autowire_candidate
            && self.synthetic == other.synthetic
            && self.role == other.role
            && self.depends_on == other.depends_on
            && self.constructor_arguments == other.constructor_arguments
            && self.property_values == other.property_values
            && self.attributes == other.attributes
            && self.executable == other.executable
    }
}

impl fmt::Debug for BeanDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanDefinition")
            .field("resolvable", &self.resolvable)
            .field("scope", &self.scope)
            .field("primary", &self.primary)
            .field("lazy_init", &self.lazy_init)
            .field("autowire_candidate", &self.autowire_candidate)
            .field("synthetic", &self.synthetic)
            .field("role", &self.role)
            .field("depends_on", &self.depends_on)
            .field("constructor_arguments", &self.constructor_arguments)
            .field("property_values", &self.property_values)
            .field("attributes", &self.attributes)
            .field("executable", &self.executable)
            .field("has_supplier", &self.instance_supplier.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> BeanDefinition {
        BeanDefinition::of(ResolvableType::for_class("demo::UserService"))
    }

    mod defaults_tests {
        use super::*;

        #[test]
        fn test_new_definition_has_all_defaults() {
            let bd = definition();
            assert_eq!(bd.scope(), Scope::Singleton);
            assert!(!bd.is_primary());
            assert_eq!(bd.lazy_init(), None);
            assert!(bd.is_autowire_candidate());
            assert!(!bd.is_synthetic());
            assert_eq!(bd.role(), Role::Application);
            assert!(bd.depends_on().is_empty());
            assert!(bd.constructor_argument_values().is_empty());
            assert!(bd.property_values().is_empty());
            assert!(bd.executable().is_none());
            assert!(bd.instance_supplier().is_none());
        }
    }

    mod builder_tests {
        use super::*;

        #[test]
        fn test_fluent_builders_mirror_setters() {
            let built = definition()
                .with_primary(true)
                .with_scope(Scope::Prototype)
                .with_role(Role::Infrastructure)
                .with_depends_on(["dataSource"]);

            let mut set = definition();
            set.set_primary(true);
            set.set_scope(Scope::Prototype);
            set.set_role(Role::Infrastructure);
            set.set_depends_on(&["dataSource"]);

            assert_eq!(built, set);
        }

        #[test]
        fn test_property_values_replace_by_name() {
            let mut pvs = PropertyValues::new();
            pvs.add("timeout", 30i64);
            pvs.add("timeout", 60i64);
            assert_eq!(pvs.len(), 1);
            assert_eq!(pvs.get("timeout"), Some(&BeanValue::I64(60)));
        }

        #[test]
        fn test_constructor_arguments_iterate_in_index_order() {
            let mut args = ConstructorArgumentValues::new();
            args.add_indexed(2, 123i64);
            args.add_indexed(0, "test");
            let indexes: Vec<usize> = args.iter().map(|(index, _)| index).collect();
            assert_eq!(indexes, vec![0, 2]);
        }
    }

    mod equality_tests {
        use super::*;

        #[test]
        fn test_supplier_does_not_affect_equality() {
            let plain = definition();
            let mut with_supplier = definition();
            with_supplier.set_instance_supplier_fn(|| 42i64);
            assert_eq!(plain, with_supplier);
        }

        #[test]
        fn test_metadata_differences_are_observable() {
            let plain = definition();
            let primary = definition().with_primary(true);
            assert_ne!(plain, primary);
        }
    }

    mod supplier_tests {
        use super::*;
        use crate::factory::DefaultListableBeanFactory;

        #[test]
        fn test_create_instance_without_supplier_fails() {
            let factory = DefaultListableBeanFactory::new();
            let err = definition().create_instance(&factory).unwrap_err();
            assert!(matches!(err, ContainerError::MissingInstanceSupplier(_)));
        }

        #[test]
        fn test_supplier_shorthand_creates_instances() {
            let factory = DefaultListableBeanFactory::new();
            let mut bd = definition();
            bd.set_instance_supplier_fn(|| "hello".to_string());
            let instance = bd.create_instance(&factory).unwrap();
            assert_eq!(instance.downcast_ref::<String>().unwrap(), "hello");
        }
    }
}
