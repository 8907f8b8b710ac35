//! 处理器发现（Discovery）
//!
//! 以显式注册代替运行时反射：每个定义处理器的模块在启动时把
//! （处理器, 标记）对交给 `Discovery`，再整体交给 `EventRegistry::bootstrap`。
//!
//! 需要实例的处理器由调用方先行绑定（`HandlerRef::bind` / `Candidate::from_handler`），
//! 发现阶段只记录绑定结果，不决定实例从何而来。
//!
use crate::handler::{EventHandler, HandlerRef};
use crate::marker::HandlerMarker;
use crate::payload::Args;
use std::sync::Arc;

/// 发现候选：一个已就绪的处理器及其标记
#[derive(Clone, Debug)]
pub struct Candidate {
    marker: HandlerMarker,
    handler: HandlerRef,
}

impl Candidate {
    pub fn new(marker: HandlerMarker, handler: HandlerRef) -> Self {
        Self { marker, handler }
    }

    /// 由对象式处理器构造，标记取自 `handled_events`
    pub fn from_handler<A, H>(handler: Arc<H>) -> Self
    where
        A: Args,
        H: EventHandler<A> + 'static,
    {
        let marker = handler.handled_events();
        Self::new(marker, HandlerRef::from_handler(handler))
    }

    pub fn marker(&self) -> &HandlerMarker {
        &self.marker
    }

    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }

    pub fn into_parts(self) -> (HandlerMarker, HandlerRef) {
        (self.marker, self.handler)
    }
}

/// 定义处理器的模块：在启动时登记自己的处理器
pub trait HandlerModule {
    fn register(&self, discovery: &mut Discovery);
}

/// 候选收集器
#[derive(Clone, Debug, Default)]
pub struct Discovery {
    candidates: Vec<Candidate>,
}

impl Discovery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, candidate: Candidate) -> &mut Self {
        self.candidates.push(candidate);
        self
    }

    /// 让模块登记自己的处理器
    pub fn module<M: HandlerModule + ?Sized>(&mut self, module: &M) -> &mut Self {
        module.register(self);
        self
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }
}

impl Extend<Candidate> for Discovery {
    fn extend<T: IntoIterator<Item = Candidate>>(&mut self, iter: T) {
        self.candidates.extend(iter);
    }
}

impl FromIterator<Candidate> for Discovery {
    fn from_iter<T: IntoIterator<Item = Candidate>>(iter: T) -> Self {
        Self {
            candidates: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Discovery {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}
