use pubsub_macros::event_handler;

#[event_handler("Tick")]
async fn tick() {}

fn main() {
    let _ = tick();
}
