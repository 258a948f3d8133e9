use logr::backend::{Backend, BackendConfig, BackendKind};
use logr::env::{env_or, LOGR_SERVICE_NAME_ENV, LOGR_SERVICE_VERSION_ENV};
use logr::init::init_tracing;
use logr::{errorf, infof};

fn charge(logger: &Backend, amount: u32) {
    errorf!(logger, "failed to charge {} cents: {}", amount, "card declined");
}

fn main() {
    let cfg = BackendConfig::new(
        BackendKind::Stackdriver,
        env_or(LOGR_SERVICE_NAME_ENV, "billing"),
        env_or(LOGR_SERVICE_VERSION_ENV, "1.2.0"),
    );
    let logger = Backend::from_config(&cfg).expect("failed to build backend");

    infof!(logger, "processed {} items", 42);
    charge(&logger, 1999);

    // The same backend can also receive `tracing` events.
    init_tracing(logger).expect("set global subscriber");
    tracing::error!(order_id = 7, "payment provider unreachable");
}
