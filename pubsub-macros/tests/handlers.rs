use pubsub_core::{Discovery, EventRegistry, HandlerModule, RegistryError};
use pubsub_macros::{event_handler, event_handlers};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

static AUDITED: AtomicUsize = AtomicUsize::new(0);

#[event_handler("UserCreated", "UserDeleted")]
fn audit(_user_id: String) {
    AUDITED.fetch_add(1, Ordering::SeqCst);
}

// 自定义错误类型：验证 `E: std::error::Error` 的返回值可被转换
#[derive(Debug)]
pub struct Rejected(&'static str);

impl std::fmt::Display for Rejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rejected: {}", self.0)
    }
}

impl std::error::Error for Rejected {}

#[event_handler("Quota")]
fn enforce_quota(used: u64, limit: u64) -> Result<(), Rejected> {
    if used > limit {
        return Err(Rejected("over quota"));
    }
    Ok(())
}

struct Inbox {
    owner: &'static str,
    messages: Mutex<Vec<String>>,
}

#[event_handlers]
impl Inbox {
    #[subscribe("Mail")]
    fn receive(&self, body: String) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("{}<-{}", self.owner, body));
    }
}

struct Accounts;

impl HandlerModule for Accounts {
    fn register(&self, discovery: &mut Discovery) {
        discovery.add(audit_candidate()).add(enforce_quota_candidate());
    }
}

#[test]
fn generated_candidates_bootstrap_a_registry() {
    let alice = Arc::new(Inbox {
        owner: "alice",
        messages: Mutex::new(Vec::new()),
    });
    let bob = Arc::new(Inbox {
        owner: "bob",
        messages: Mutex::new(Vec::new()),
    });

    let mut discovery = Discovery::new();
    discovery.module(&Accounts);
    discovery.extend(alice.handler_candidates());
    discovery.extend(bob.handler_candidates());

    let registry = EventRegistry::new();
    assert_eq!(registry.bootstrap(discovery).unwrap(), 5);

    registry
        .publish("UserCreated", ("u-1".to_string(),))
        .unwrap();
    registry
        .publish("UserDeleted", ("u-1".to_string(),))
        .unwrap();
    assert_eq!(AUDITED.load(Ordering::SeqCst), 2);

    // 每个实例都是独立绑定的处理器
    assert_eq!(registry.publish("Mail", ("hi".to_string(),)).unwrap(), 2);
    assert_eq!(*alice.messages.lock().unwrap(), vec!["alice<-hi"]);
    assert_eq!(*bob.messages.lock().unwrap(), vec!["bob<-hi"]);
}

#[test]
fn generated_handlers_propagate_errors() {
    let registry = EventRegistry::new();
    registry.bootstrap([enforce_quota_candidate()]).unwrap();

    assert_eq!(registry.publish("Quota", (5u64, 10u64)).unwrap(), 1);

    let err = registry.publish("Quota", (11u64, 10u64)).unwrap_err();
    match err {
        RegistryError::HandlerFailure {
            event,
            handler,
            source,
        } => {
            assert_eq!(event, "Quota");
            assert!(handler.ends_with("::enforce_quota"));
            assert_eq!(source.to_string(), "rejected: over quota");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // 载荷形状错误：i32 不会被当作 u64
    let err = registry.publish("Quota", (11i32, 10i32)).unwrap_err();
    assert!(matches!(err, RegistryError::ArgumentMismatch { .. }));
}

#[test]
fn bound_candidate_can_be_unsubscribed() {
    let inbox = Arc::new(Inbox {
        owner: "carol",
        messages: Mutex::new(Vec::new()),
    });

    let registry = EventRegistry::new();
    registry.bootstrap(inbox.handler_candidates()).unwrap();

    // 再次生成的候选绑定同一实例，视为同一个处理器
    let again = inbox.handler_candidates().remove(0);
    assert!(registry.unsubscribe("Mail", again.handler()));
    assert_eq!(registry.publish("Mail", ("late".to_string(),)).unwrap(), 0);
    assert!(inbox.messages.lock().unwrap().is_empty());
}

#[test]
fn candidates_compare_by_callable_and_instance() {
    assert_eq!(audit_candidate().handler(), audit_candidate().handler());
    assert_ne!(audit_candidate().handler(), enforce_quota_candidate().handler());

    let dave = Arc::new(Inbox {
        owner: "dave",
        messages: Mutex::new(Vec::new()),
    });
    let erin = Arc::new(Inbox {
        owner: "erin",
        messages: Mutex::new(Vec::new()),
    });
    let first = dave.handler_candidates().remove(0);
    let second = dave.handler_candidates().remove(0);
    let other = erin.handler_candidates().remove(0);
    assert_eq!(first.handler(), second.handler());
    assert_ne!(first.handler(), other.handler());
}
