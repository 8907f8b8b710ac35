use pubsub_core::EventRegistry;
use pubsub_macros::event_handlers;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct Stats {
    errors: AtomicUsize,
}

#[event_handlers]
impl Stats {
    #[subscribe("Error", "Fatal")]
    fn on_error(&self, _msg: String) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }

    #[subscribe("Ping")]
    fn ping() -> anyhow::Result<()> {
        Ok(())
    }

    fn errors(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }
}

fn main() {
    let stats = Arc::new(Stats::default());
    let candidates = stats.handler_candidates();
    assert_eq!(candidates.len(), 2);

    let registry = EventRegistry::new();
    assert_eq!(registry.bootstrap(candidates).unwrap(), 3);
    registry.publish("Error", ("x".to_string(),)).unwrap();
    registry.publish("Fatal", ("y".to_string(),)).unwrap();
    registry.publish("Ping", ()).unwrap();
    assert_eq!(stats.errors(), 2);
}
