//! 载荷与参数形状（Payload / Args / Topic）
//!
//! - `Payload`：按位置排列、类型擦除的参数列表，供字符串事件名的发布路径使用；
//! - `Args`：处理器声明的固定参数形状，实现于 0..=8 元的元组；
//! - `Topic<A>`：携带参数形状的事件键，类型化路径上的形状不匹配在编译期即被拒绝。
//!
//! 绑定规则：元数与每个位置的具体类型都必须完全一致，不做任何隐式转换
//! （例如 `&'static str` 不会被当作 `String`）。
//!
use std::any::{Any, type_name};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

#[derive(Clone)]
struct Arg {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

/// 有序参数列表；克隆只增加引用计数
#[derive(Clone, Default)]
pub struct Payload {
    args: Vec<Arg>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个位置参数（链式）
    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    pub fn push<T: Any + Send + Sync>(&mut self, value: T) {
        self.args.push(Arg {
            value: Arc::new(value),
            type_name: type_name::<T>(),
        });
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// 各位置参数的类型名
    pub fn type_names(&self) -> Vec<&'static str> {
        self.args.iter().map(|a| a.type_name).collect()
    }

    /// 取出第 `index` 个参数的副本；越界或类型不符返回 `None`
    pub fn get<T: Any + Clone>(&self, index: usize) -> Option<T> {
        let arg = self.args.get(index)?;
        (*arg.value).downcast_ref::<T>().cloned()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.args.iter().map(|a| a.type_name))
            .finish()
    }
}

/// 处理器参数形状
///
/// 由元组实现：`()`、`(T0,)`、`(T0, T1)` …… 直至 8 元。
/// 每个元素须为 `Clone + Send + Sync + 'static`，同一载荷可被多个处理器各自取用。
pub trait Args: Sized + Send + 'static {
    /// 声明的参数类型名（按位置）
    fn signature() -> Vec<&'static str>;

    /// 按位置从载荷绑定参数；元数或任一类型不符时返回 `None`
    fn from_payload(payload: &Payload) -> Option<Self>;
}

impl Args for () {
    fn signature() -> Vec<&'static str> {
        Vec::new()
    }

    fn from_payload(payload: &Payload) -> Option<Self> {
        payload.is_empty().then_some(())
    }
}

impl From<()> for Payload {
    fn from(_: ()) -> Self {
        Payload::new()
    }
}

macro_rules! tuple_args {
    ($len:expr => $($T:ident . $idx:tt),+) => {
        impl<$($T),+> Args for ($($T,)+)
        where
            $($T: Clone + Send + Sync + 'static),+
        {
            fn signature() -> Vec<&'static str> {
                vec![$(type_name::<$T>()),+]
            }

            fn from_payload(payload: &Payload) -> Option<Self> {
                if payload.len() != $len {
                    return None;
                }
                Some(($(payload.get::<$T>($idx)?,)+))
            }
        }

        impl<$($T),+> From<($($T,)+)> for Payload
        where
            $($T: Send + Sync + 'static),+
        {
            #[allow(non_snake_case)]
            fn from(value: ($($T,)+)) -> Self {
                let ($($T,)+) = value;
                Payload::new()$(.with($T))+
            }
        }
    };
}

tuple_args!(1 => A.0);
tuple_args!(2 => A.0, B.1);
tuple_args!(3 => A.0, B.1, C.2);
tuple_args!(4 => A.0, B.1, C.2, D.3);
tuple_args!(5 => A.0, B.1, C.2, D.3, E.4);
tuple_args!(6 => A.0, B.1, C.2, D.3, E.4, F.5);
tuple_args!(7 => A.0, B.1, C.2, D.3, E.4, F.5, G.6);
tuple_args!(8 => A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);

/// 类型化事件键
///
/// ```rust
/// use pubsub_core::{EventRegistry, Topic};
///
/// const SAVED: Topic<(String, u64)> = Topic::new("Saved");
///
/// let registry = EventRegistry::new();
/// registry.on(&SAVED, |(path, bytes)| {
///     println!("{path}: {bytes}");
///     Ok(())
/// });
/// registry.emit(&SAVED, ("a.txt".to_string(), 42)).unwrap();
/// ```
pub struct Topic<A> {
    name: &'static str,
    _shape: PhantomData<fn(A)>,
}

impl<A> Topic<A> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _shape: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<A> Clone for Topic<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Topic<A> {}

impl<A> fmt::Debug for Topic<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Topic")
            .field("name", &self.name)
            .field("shape", &type_name::<A>())
            .finish()
    }
}
