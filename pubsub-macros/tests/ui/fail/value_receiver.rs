use pubsub_macros::event_handlers;

struct Token;

#[event_handlers]
impl Token {
    #[subscribe("Spend")]
    fn spend(self, _amount: u32) {}
}

fn main() {
    Token.spend(1);
}
