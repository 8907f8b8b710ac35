//! 事件注册表（EventRegistry）
//!
//! 事件名 → 有序处理器列表 的映射，由一把互斥锁保护：
//! - `subscribe`：追加到列表尾部（不存在则创建），允许重复；
//! - `unsubscribe`：移除第一个与之相等（同一可调用对象）的条目，找不到时静默返回；
//! - `publish`：锁内取当前列表的快照（`Arc` 克隆），锁外按顺序同步调用，
//!   第一个失败直接上抛，后续处理器不再调用；
//! - `bootstrap`：消费发现阶段产出的候选，每个实例至多执行一次。
//!
//! 列表以 `Arc<Vec<_>>` 存放，变更时写时复制，
//! 因此进行中的发布看到的始终是它开始时的列表。
//!
use crate::discovery::Candidate;
use crate::error::{RegistryError, RegistryResult};
use crate::handler::{HandlerRef, HandlerResult};
use crate::payload::{Args, Payload, Topic};
use bon::Builder;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, trace};

type HandlerList = Arc<Vec<HandlerRef>>;

/// 注册表配置
#[derive(Builder, Clone, Debug)]
pub struct RegistryConfig {
    /// 注册表标签，附加在每条追踪事件上
    #[builder(into, default = String::from("default"))]
    pub label: String,
    /// 事件映射的初始容量
    #[builder(default = 16)]
    pub initial_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            label: String::from("default"),
            initial_capacity: 16,
        }
    }
}

/// 进程内事件注册表
///
/// 一个进程通常只创建一个实例，并以 `Arc<EventRegistry>` 传递给需要发布或订阅的组件。
pub struct EventRegistry {
    handlers: Mutex<HashMap<String, HandlerList>>,
    bootstrapped: AtomicBool,
    config: RegistryConfig,
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::with_config(RegistryConfig::default())
    }
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            handlers: Mutex::new(HashMap::with_capacity(config.initial_capacity)),
            bootstrapped: AtomicBool::new(false),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// 订阅：追加到 `event_name` 的列表尾部
    pub fn subscribe(&self, event_name: impl Into<String>, handler: HandlerRef) {
        let event_name = event_name.into();
        let handler_name = handler.name().to_string();

        let count = {
            let mut map = self.handlers.lock();
            let list = map.entry(event_name.clone()).or_default();
            Arc::make_mut(list).push(handler);
            list.len()
        };

        debug!(
            registry = %self.config.label,
            event = %event_name,
            handler = %handler_name,
            count,
            "handler subscribed"
        );
    }

    /// 以闭包订阅，返回可用于退订的引用
    pub fn subscribe_fn<A, F>(&self, event_name: impl Into<String>, f: F) -> HandlerRef
    where
        A: Args,
        F: Fn(A) -> HandlerResult + Send + Sync + 'static,
    {
        let handler = HandlerRef::from_fn(std::any::type_name::<F>(), f);
        self.subscribe(event_name, handler.clone());
        handler
    }

    /// 类型化订阅
    pub fn on<A, F>(&self, topic: &Topic<A>, f: F) -> HandlerRef
    where
        A: Args,
        F: Fn(A) -> HandlerResult + Send + Sync + 'static,
    {
        self.subscribe_fn(topic.name(), f)
    }

    /// 退订：移除第一个相等的条目，返回是否有条目被移除
    ///
    /// 事件不存在或处理器未订阅时什么也不做；列表被清空时整个事件条目一并移除。
    pub fn unsubscribe(&self, event_name: &str, handler: &HandlerRef) -> bool {
        let remaining = {
            let mut map = self.handlers.lock();
            let Some(list) = map.get_mut(event_name) else {
                return false;
            };
            let Some(pos) = list.iter().position(|h| h == handler) else {
                return false;
            };

            let list = Arc::make_mut(list);
            list.remove(pos);
            let remaining = list.len();
            if remaining == 0 {
                map.remove(event_name);
            }
            remaining
        };

        debug!(
            registry = %self.config.label,
            event = %event_name,
            handler = %handler.name(),
            remaining,
            "handler unsubscribed"
        );
        true
    }

    /// 发布：按订阅顺序同步调用，返回调用的处理器数量
    ///
    /// - 无处理器时返回 `Ok(0)`；
    /// - 任一处理器参数不符（`ArgumentMismatch`）或执行失败（`HandlerFailure`）时立即返回该错误，
    ///   后续处理器不会被调用。
    pub fn publish(&self, event_name: &str, payload: impl Into<Payload>) -> RegistryResult<usize> {
        let Some(snapshot) = self.snapshot(event_name) else {
            trace!(registry = %self.config.label, event = %event_name, "no handlers");
            return Ok(0);
        };

        let payload = payload.into();
        trace!(
            registry = %self.config.label,
            event = %event_name,
            handlers = snapshot.len(),
            args = payload.len(),
            "dispatching"
        );

        for handler in snapshot.iter() {
            trace!(event = %event_name, handler = %handler.name(), "invoking handler");
            handler.invoke(event_name, &payload)?;
        }

        Ok(snapshot.len())
    }

    /// 类型化发布
    ///
    /// 经由同名字符串路径订阅的其他形状处理器仍可能在运行时报 `ArgumentMismatch`。
    pub fn emit<A>(&self, topic: &Topic<A>, args: A) -> RegistryResult<usize>
    where
        A: Args,
        Payload: From<A>,
    {
        self.publish(topic.name(), Payload::from(args))
    }

    /// 以发现阶段的候选批量订阅，返回完成的订阅数
    ///
    /// 每个实例仅允许执行一次，再次调用返回 `AlreadyBootstrapped`。
    pub fn bootstrap<I>(&self, candidates: I) -> RegistryResult<usize>
    where
        I: IntoIterator<Item = Candidate>,
    {
        if self
            .bootstrapped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(RegistryError::AlreadyBootstrapped {
                label: self.config.label.clone(),
            });
        }

        let mut subscriptions = 0usize;
        for candidate in candidates {
            let (marker, handler) = candidate.into_parts();
            debug!(
                registry = %self.config.label,
                handler = %handler.name(),
                events = marker.len(),
                "bootstrapping candidate"
            );
            for event_name in marker.iter() {
                self.subscribe(event_name, handler.clone());
                subscriptions += 1;
            }
        }

        info!(registry = %self.config.label, subscriptions, "registry bootstrapped");
        Ok(subscriptions)
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped.load(Ordering::Acquire)
    }

    /// 某事件当前的处理器数量（含重复）
    pub fn handler_count(&self, event_name: &str) -> usize {
        self.handlers
            .lock()
            .get(event_name)
            .map(|l| l.len())
            .unwrap_or(0)
    }

    /// 当前有处理器的事件名（排序后）
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.lock().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.lock().is_empty()
    }

    fn snapshot(&self, event_name: &str) -> Option<HandlerList> {
        self.handlers.lock().get(event_name).cloned()
    }
}
