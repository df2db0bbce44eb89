//! 值到代码的发射器链
//!
//! 把元数据里的 `BeanValue` 渲染为"重建同一个值"的 Rust 表达式。
//! 每个发射器只认识自己的值类别，链按顺序询问，最先给出答复的胜出；
//! 新加入的发射器排在最前，因此能遮蔽同类别的既有发射器。链可以有
//! 父链（共享默认链），父链发射器递归子元素时仍从整条链的头部重新
//! 进入，保证定制发射器对嵌套元素同样生效。

mod collection;
pub(crate) mod scalar;
pub(crate) mod types;

use std::sync::{Arc, OnceLock};

use wyvern_core::{BeanValue, ResolvableType};

pub use collection::{
    ArrayEmitter, BeanDefinitionEmitter, ListEmitter, MapEmitter, SetEmitter,
    DEFAULT_MAP_ENTRY_THRESHOLD,
};
pub use scalar::{CharEmitter, PrimitiveEmitter, StringEmitter};
pub use types::{EnumEmitter, ResolvableTypeEmitter, TypePathEmitter};

use crate::error::{AotError, AotResult};
use crate::generated::GenerationContext;

/// 单个值类别的发射器
///
/// 返回 `None` 表示不认识该值，链继续询问下一个；返回 `Some` 表示
/// 本发射器负责到底，结果（包括错误）不再回退。
pub trait ValueEmitter: Send + Sync {
    fn emit(
        &self,
        value: &BeanValue,
        declared: &ResolvableType,
        chain: &ValueEmitterChain,
        ctx: &mut GenerationContext<'_>,
    ) -> Option<AotResult<String>>;
}

/// 有序的发射器集合，可选地挂在一条父链之后
pub struct ValueEmitterChain {
    emitters: Vec<Box<dyn ValueEmitter>>,
    parent: Option<Arc<ValueEmitterChain>>,
}

impl ValueEmitterChain {
    /// 空链（只用于测试或完全定制的场合）
    pub fn empty() -> Self {
        Self {
            emitters: Vec::new(),
            parent: None,
        }
    }

    /// 挂在父链之后的空链，定制发射器从这里加入
    pub fn with_parent(parent: Arc<ValueEmitterChain>) -> Self {
        Self {
            emitters: Vec::new(),
            parent: Some(parent),
        }
    }

    /// 覆盖全部内建类别的默认链
    pub fn standard() -> Self {
        let mut chain = Self::empty();
        chain.add(BeanDefinitionEmitter);
        chain.add(MapEmitter::new());
        chain.add(SetEmitter);
        chain.add(ListEmitter);
        chain.add(ArrayEmitter);
        chain.add(ResolvableTypeEmitter);
        chain.add(TypePathEmitter);
        chain.add(EnumEmitter);
        chain.add(StringEmitter);
        chain.add(CharEmitter);
        chain.add(PrimitiveEmitter);
        chain
    }

    /// 进程内共享的默认链
    pub fn shared() -> &'static ValueEmitterChain {
        static SHARED: OnceLock<ValueEmitterChain> = OnceLock::new();
        SHARED.get_or_init(ValueEmitterChain::standard)
    }

    /// 加入一个发射器，新发射器优先于所有既有发射器
    pub fn add(&mut self, emitter: impl ValueEmitter + 'static) {
        self.emitters.insert(0, Box::new(emitter));
    }

    /// 渲染 `value` 为重建表达式
    ///
    /// `Null` 在进链前短路；没有发射器应答时报 `UnsupportedValue`。
    pub fn try_emit(
        &self,
        value: &BeanValue,
        declared: &ResolvableType,
        ctx: &mut GenerationContext<'_>,
    ) -> AotResult<String> {
        if matches!(value, BeanValue::Null) {
            return Ok("BeanValue::Null".to_string());
        }
        match self.emit_with_root(value, declared, self, ctx) {
            Some(result) => result,
            None => Err(AotError::UnsupportedValue {
                kind: value.kind().to_string(),
                declared: declared.to_string(),
            }),
        }
    }

    /// 沿本链和父链询问，递归时把 `root` 传给发射器
    fn emit_with_root(
        &self,
        value: &BeanValue,
        declared: &ResolvableType,
        root: &ValueEmitterChain,
        ctx: &mut GenerationContext<'_>,
    ) -> Option<AotResult<String>> {
        for emitter in &self.emitters {
            if let Some(result) = emitter.emit(value, declared, root, ctx) {
                return Some(result);
            }
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.emit_with_root(value, declared, root, ctx))
    }
}
