use pubsub_core::{Discovery, EventRegistry, HandlerModule};
use pubsub_macros::{event_handler, event_handlers};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

#[event_handler("UserCreated")]
fn welcome(user: String) {
    println!("welcome, {user}");
}

#[derive(Default)]
struct Billing {
    charged: AtomicU64,
}

#[event_handlers]
impl Billing {
    #[subscribe("OrderPaid")]
    fn charge(&self, _order: String, cents: u64) -> anyhow::Result<()> {
        anyhow::ensure!(cents > 0, "empty order");
        self.charged.fetch_add(cents, Ordering::SeqCst);
        Ok(())
    }

    #[subscribe("UserCreated", "UserDeleted")]
    fn touch(&self, user: String) {
        println!("billing profile touched for {user}");
    }
}

/// 账户模块：启动时登记自己的处理器
struct Accounts {
    billing: Arc<Billing>,
}

impl HandlerModule for Accounts {
    fn register(&self, discovery: &mut Discovery) {
        discovery.add(welcome_candidate());
        discovery.extend(self.billing.handler_candidates());
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // 实例由应用显式创建并交给模块，注册表不会另建实例
    let billing = Arc::new(Billing::default());
    let accounts = Accounts {
        billing: billing.clone(),
    };

    let registry = EventRegistry::new();
    let mut discovery = Discovery::new();
    discovery.module(&accounts);
    registry.bootstrap(discovery)?;

    registry.publish("UserCreated", ("alice".to_string(),))?;
    registry.publish("OrderPaid", ("o-1".to_string(), 1999u64))?;

    if let Err(err) = registry.publish("OrderPaid", ("o-2".to_string(), 0u64)) {
        eprintln!("dispatch aborted: {err}");
    }

    println!("charged: {} cents", billing.charged.load(Ordering::SeqCst));
    Ok(())
}
