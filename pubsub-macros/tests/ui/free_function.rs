use pubsub_core::EventRegistry;
use pubsub_macros::event_handler;

#[event_handler("Error")]
fn log(msg: String) {
    println!("log: {msg}");
}

#[event_handler("Saved", "Synced")]
pub fn count(_path: String, _bytes: u64) -> anyhow::Result<()> {
    Ok(())
}

#[event_handler("Tick")]
fn tick() -> () {}

fn main() {
    let candidate = log_candidate();
    assert_eq!(candidate.marker().event_names(), ["Error"]);
    assert_eq!(candidate.handler().arity(), 1);

    let candidate = count_candidate();
    assert_eq!(candidate.marker().len(), 2);
    assert_eq!(candidate.handler().arity(), 2);
    assert!(candidate.handler().name().ends_with("::count"));

    let registry = EventRegistry::new();
    let n = registry
        .bootstrap(vec![log_candidate(), count_candidate(), tick_candidate()])
        .unwrap();
    assert_eq!(n, 4);
    registry.publish("Error", ("disk full".to_string(),)).unwrap();
    registry.publish("Tick", ()).unwrap();

    // 原函数保持可直接调用
    log("direct".to_string());
}
