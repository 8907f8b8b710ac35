//! 注册表统一错误定义
//!
//! 仅覆盖调度与发现阶段真正需要上抛的情形；
//! 未知事件与重复订阅在本库中不视为错误。
//!
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RegistryError {
    // --- 调度 ---
    #[error(
        "argument mismatch: event={event}, handler={handler}, expected=({expected}), found=({found})"
    )]
    ArgumentMismatch {
        event: String,
        handler: String,
        expected: String,
        found: String,
    },
    #[error("handler failed: event={event}, handler={handler}, reason={source}")]
    HandlerFailure {
        event: String,
        handler: String,
        #[source]
        source: anyhow::Error,
    },

    // --- 发现/标记 ---
    #[error("invalid marker: {reason}")]
    InvalidMarker { reason: String },
    #[error("registry already bootstrapped: label={label}")]
    AlreadyBootstrapped { label: String },
}

/// 统一 Result 类型别名
pub type RegistryResult<T> = Result<T, RegistryError>;

impl RegistryError {
    pub fn invalid_marker(reason: impl Into<String>) -> Self {
        RegistryError::InvalidMarker {
            reason: reason.into(),
        }
    }

    /// 出错的事件名（仅调度类错误携带）
    pub fn event(&self) -> Option<&str> {
        match self {
            RegistryError::ArgumentMismatch { event, .. }
            | RegistryError::HandlerFailure { event, .. } => Some(event),
            _ => None,
        }
    }

    /// 出错的处理器名（仅调度类错误携带）
    pub fn handler(&self) -> Option<&str> {
        match self {
            RegistryError::ArgumentMismatch { handler, .. }
            | RegistryError::HandlerFailure { handler, .. } => Some(handler),
            _ => None,
        }
    }
}
