use pubsub_macros::event_handler;

#[event_handler("Error")]
fn log(_msg: &str) {}

fn main() {
    log("disk full");
}
