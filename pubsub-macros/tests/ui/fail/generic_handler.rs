use pubsub_macros::event_handler;

#[event_handler("Show")]
fn show<T: std::fmt::Debug>(_value: T) {}

fn main() {
    show(1u8);
}
