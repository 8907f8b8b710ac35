use pubsub_macros::event_handler;

#[event_handler()]
fn tick() {}

fn main() {
    tick();
}
