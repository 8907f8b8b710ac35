//! 处理器标记（HandlerMarker）
//!
//! 声明某个可调用对象希望在发现阶段绑定到哪些事件名。
//! 纯数据，无行为；构造后只读，在 `bootstrap` 时被消费一次。
//!
use crate::error::{RegistryError, RegistryResult};

/// 事件名集合：非空、有序、去重、大小写敏感
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerMarker {
    event_names: Vec<String>,
}

impl HandlerMarker {
    /// 单个事件名
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_names: vec![event_name.into()],
        }
    }

    /// 多个事件名；保留首次出现的顺序，重复项被忽略，空集合返回错误
    pub fn many<I, S>(event_names: I) -> RegistryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for name in event_names {
            let name = name.into();
            if !names.contains(&name) {
                names.push(name);
            }
        }

        if names.is_empty() {
            return Err(RegistryError::invalid_marker(
                "a handler marker needs at least one event name",
            ));
        }

        Ok(Self { event_names: names })
    }

    /// 追加一个事件名（已存在时不变）
    pub fn with(mut self, event_name: impl Into<String>) -> Self {
        let name = event_name.into();
        if !self.event_names.contains(&name) {
            self.event_names.push(name);
        }
        self
    }

    pub fn event_names(&self) -> &[String] {
        &self.event_names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.event_names.iter().map(String::as_str)
    }

    pub fn contains(&self, event_name: &str) -> bool {
        self.event_names.iter().any(|n| n == event_name)
    }

    pub fn len(&self) -> usize {
        self.event_names.len()
    }

    /// 标记至少含一个事件名，此处恒为 false
    pub fn is_empty(&self) -> bool {
        self.event_names.is_empty()
    }
}

impl From<&str> for HandlerMarker {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for HandlerMarker {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
