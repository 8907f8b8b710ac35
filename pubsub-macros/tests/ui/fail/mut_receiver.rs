use pubsub_macros::event_handlers;

struct Counter {
    hits: u64,
}

#[event_handlers]
impl Counter {
    #[subscribe("Hit")]
    fn bump(&mut self, by: u64) {
        self.hits += by;
    }
}

fn main() {
    let mut counter = Counter { hits: 0 };
    counter.bump(1);
    assert_eq!(counter.hits, 1);
}
