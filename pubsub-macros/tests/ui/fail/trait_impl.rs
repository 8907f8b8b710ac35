use pubsub_macros::event_handlers;

trait Greet {
    fn greet(&self) -> String;
}

struct Bot;

#[event_handlers]
impl Greet for Bot {
    #[subscribe("Hello")]
    fn greet(&self) -> String {
        "hi".to_string()
    }
}

fn main() {
    assert_eq!(Bot.greet(), "hi");
}
