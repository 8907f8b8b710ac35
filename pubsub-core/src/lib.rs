//! 进程内事件注册表（pubsub-core）
//!
//! 以事件名（大小写敏感的字符串）为键，维护有序的处理器列表，提供：
//! - 订阅/退订（`registry`）：单把互斥锁保护映射结构，允许重复订阅；
//! - 同步发布：在锁内取快照，锁外按订阅顺序逐个调用，首个失败即中止；
//! - 参数形状（`payload`）：处理器声明固定的元组参数，运行时按位置严格匹配；
//! - 处理器引用（`handler`）：以底层可调用对象（及绑定实例）判等，实例方法须显式绑定实例；
//! - 标记与发现（`marker`、`discovery`）：由显式注册步骤或属性宏产出候选，
//!   在启动时一次性灌入注册表。
//!
//! 本 crate 不做持久化、跨进程传输与排队，所有状态仅存在于进程内存中。
//!
//! 典型用法：
//! 1. 启动时创建一个 `EventRegistry` 并以 `Arc` 共享给各组件；
//! 2. 各模块实现 `HandlerModule` 或使用 `#[event_handler]` 宏，汇总为 `Discovery`；
//! 3. 调用 `EventRegistry::bootstrap` 完成批量订阅；
//! 4. 业务代码通过 `publish`（或类型化的 `emit`）发布事件。
//!
pub mod discovery;
pub mod error;
pub mod handler;
pub mod marker;
pub mod payload;
pub mod registry;

pub use discovery::{Candidate, Discovery, HandlerModule};
pub use error::{RegistryError, RegistryResult};
pub use handler::{EventHandler, HandlerRef, HandlerResult};
pub use marker::HandlerMarker;
pub use payload::{Args, Payload, Topic};
pub use registry::{EventRegistry, RegistryConfig};

// 允许在本 crate 内部通过 ::pubsub_core 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::pubsub_core 路径。
extern crate self as pubsub_core;
