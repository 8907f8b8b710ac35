use pubsub_macros::event_handlers;

struct Bot;

#[event_handlers]
impl Bot {
    fn name(&self) -> &'static str {
        "bot"
    }
}

fn main() {
    assert_eq!(Bot.name(), "bot");
}
