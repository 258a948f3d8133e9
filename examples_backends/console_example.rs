use logr::backend::{Backend, BackendConfig, BackendKind};
use logr::{debugf, errorf, infof};

fn main() {
    let cfg = BackendConfig::new(BackendKind::Console, "billing", "1.2.0");
    let logger = Backend::from_config(&cfg).expect("console backend never fails");

    infof!(logger, "console backend example started");
    debugf!(logger, "value={}", 7);
    errorf!(logger, "failed to connect: {}", "timeout");
}
