//! 处理器引用（HandlerRef）与对象式处理器（EventHandler）
//!
//! `HandlerRef` 包装一个可调用对象及其声明的参数形状：
//! - 形状在构造时由 `Args` 固定，调用时与载荷逐位比对，不符即 `ArgumentMismatch`；
//! - 判等看底层可调用对象：同一个函数项（或无捕获闭包）构造的引用相等，
//!   绑定实例的方法还要求是同一个 `Arc` 实例；带捕获状态的闭包只与自身的克隆相等；
//! - 实例方法只能通过调用方提供的 `Arc<T>` 绑定，注册表从不自行构造实例。
//!
use crate::error::{RegistryError, RegistryResult};
use crate::marker::HandlerMarker;
use crate::payload::{Args, Payload};
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// 处理器自身逻辑的返回类型
pub type HandlerResult = anyhow::Result<()>;

enum Fault {
    Mismatch,
    Failed(anyhow::Error),
}

type InvokeFn = Box<dyn Fn(&Payload) -> Result<(), Fault> + Send + Sync>;

// 无状态可调用对象的类型，加上绑定实例的地址
#[derive(Clone, Copy, PartialEq, Eq)]
struct CallableKey {
    callable: TypeId,
    instance: Option<usize>,
}

impl CallableKey {
    // 带捕获状态的闭包或函数指针没有可比较的身份
    fn of<F: 'static>(instance: Option<usize>) -> Option<Self> {
        (std::mem::size_of::<F>() == 0).then(|| Self {
            callable: TypeId::of::<F>(),
            instance,
        })
    }
}

fn instance_addr<T>(instance: &Arc<T>) -> usize {
    Arc::as_ptr(instance) as *const () as usize
}

struct Inner {
    name: String,
    signature: Vec<&'static str>,
    key: Option<CallableKey>,
    invoke: InvokeFn,
}

/// 对象式处理器：处理一种参数形状的事件
///
/// 实现者通常持有状态，注册时须以 `Arc<Self>` 显式交出实例。
pub trait EventHandler<A: Args>: Send + Sync {
    /// 处理器名称（用于错误与追踪）
    fn handler_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
    /// 该处理器要绑定的事件名
    fn handled_events(&self) -> HandlerMarker;
    /// 处理事件
    fn handle(&self, args: A) -> HandlerResult;
}

/// 可调用对象 + 参数形状
#[derive(Clone)]
pub struct HandlerRef {
    inner: Arc<Inner>,
}

impl HandlerRef {
    /// 包装自由函数或闭包
    pub fn from_fn<A, F>(name: impl Into<String>, f: F) -> Self
    where
        A: Args,
        F: Fn(A) -> HandlerResult + Send + Sync + 'static,
    {
        let key = CallableKey::of::<F>(None);
        Self::build(name.into(), key, f)
    }

    /// 将方法绑定到调用方给定的实例上
    pub fn bind<T, A, F>(instance: Arc<T>, name: impl Into<String>, f: F) -> Self
    where
        T: Send + Sync + 'static,
        A: Args,
        F: Fn(&T, A) -> HandlerResult + Send + Sync + 'static,
    {
        let key = CallableKey::of::<F>(Some(instance_addr(&instance)));
        Self::build(name.into(), key, move |args: A| f(&*instance, args))
    }

    /// 包装对象式处理器
    pub fn from_handler<A, H>(handler: Arc<H>) -> Self
    where
        A: Args,
        H: EventHandler<A> + 'static,
    {
        let name = handler.handler_name().to_string();
        let key = Some(CallableKey {
            callable: TypeId::of::<(H, A)>(),
            instance: Some(instance_addr(&handler)),
        });
        Self::build(name, key, move |args: A| handler.handle(args))
    }

    fn build<A, F>(name: String, key: Option<CallableKey>, f: F) -> Self
    where
        A: Args,
        F: Fn(A) -> HandlerResult + Send + Sync + 'static,
    {
        let invoke: InvokeFn = Box::new(move |payload| {
            let args = A::from_payload(payload).ok_or(Fault::Mismatch)?;
            f(args).map_err(Fault::Failed)
        });

        Self {
            inner: Arc::new(Inner {
                name,
                signature: A::signature(),
                key,
                invoke,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// 声明的参数类型名（按位置）
    pub fn signature(&self) -> &[&'static str] {
        &self.inner.signature
    }

    pub fn arity(&self) -> usize {
        self.inner.signature.len()
    }

    /// 是否为同一个引用（或其克隆）
    pub fn ptr_eq(&self, other: &HandlerRef) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// 是否包装同一个可调用对象（绑定方法还须是同一实例）
    pub fn same_callable(&self, other: &HandlerRef) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match (self.inner.key, other.inner.key) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// 以 `payload` 调用一次；错误中带上事件名与处理器名
    pub(crate) fn invoke(&self, event: &str, payload: &Payload) -> RegistryResult<()> {
        (self.inner.invoke)(payload).map_err(|fault| match fault {
            Fault::Mismatch => RegistryError::ArgumentMismatch {
                event: event.to_string(),
                handler: self.inner.name.clone(),
                expected: self.inner.signature.join(", "),
                found: payload.type_names().join(", "),
            },
            Fault::Failed(source) => RegistryError::HandlerFailure {
                event: event.to_string(),
                handler: self.inner.name.clone(),
                source,
            },
        })
    }
}

impl PartialEq for HandlerRef {
    fn eq(&self, other: &Self) -> bool {
        self.same_callable(other)
    }
}

impl Eq for HandlerRef {}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRef")
            .field("name", &self.inner.name)
            .field("signature", &self.inner.signature)
            .finish()
    }
}
