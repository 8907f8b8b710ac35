use pubsub_core::{EventRegistry, HandlerRef, RegistryConfig, RegistryError, Topic};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const SAVED: Topic<(String, u64)> = Topic::new("Saved");

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let registry = Arc::new(EventRegistry::with_config(
        RegistryConfig::builder().label("demo").build(),
    ));

    let log = HandlerRef::from_fn("log", |(msg,): (String,)| {
        println!("Error: {msg}");
        Ok(())
    });
    registry.subscribe("Error", log.clone());
    registry.publish("Error", ("disk full".to_string(),))?;

    registry.on(&SAVED, |(path, bytes)| {
        println!("Saved: {path} ({bytes} bytes)");
        Ok(())
    });
    registry.emit(&SAVED, ("report.csv".to_string(), 2048))?;

    // 形状不符 -> ArgumentMismatch
    if let Err(RegistryError::ArgumentMismatch {
        expected, found, ..
    }) = registry.publish("Error", (404u16,))
    {
        eprintln!("ArgumentMismatch as expected: expected=({expected}), found=({found})");
    }

    registry.unsubscribe("Error", &log);
    let invoked = registry.publish("Error", ("ignored".to_string(),))?;
    println!("after unsubscribe: {invoked} handler(s) invoked");
    Ok(())
}
