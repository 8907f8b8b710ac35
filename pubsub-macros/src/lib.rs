use proc_macro::TokenStream;

mod event_handler;
mod event_handlers;
mod utils;

/// 自由函数处理器宏
/// - 参数：一个或多个事件名字面量，例如 `#[event_handler("Error", "Fatal")]`
/// - 保留原函数，并在同一作用域生成 `<fn>_candidate() -> ::pubsub_core::Candidate`
/// - 函数参数须为具名类型的所有权值（不支持引用、`impl Trait`、泛型与 `async`）
/// - 返回 `()` 视为不会失败；返回 `Result<(), E>` 时要求 `E: Into<anyhow::Error>`
#[proc_macro_attribute]
pub fn event_handler(attr: TokenStream, item: TokenStream) -> TokenStream {
    event_handler::expand(attr, item)
}

/// 实例处理器宏
/// - 用于固有 `impl` 块，收集其中带 `#[subscribe("...")]` 的方法（输出中移除该标记）
/// - 生成 `handler_candidates(self: &Arc<Self>) -> Vec<::pubsub_core::Candidate>`
/// - `&self` 方法绑定到传入的 `Arc<Self>`；无接收者的关联函数按自由函数登记
/// - 不支持 `&mut self` 与按值 `self`，需要可变状态时请在类型内部使用锁或原子量
#[proc_macro_attribute]
pub fn event_handlers(attr: TokenStream, item: TokenStream) -> TokenStream {
    event_handlers::expand(attr, item)
}
