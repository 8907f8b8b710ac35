use pubsub_macros::event_handler;

#[event_handler("Error")]
fn log(_msg: impl Into<String>) {}

fn main() {
    log("disk full");
}
