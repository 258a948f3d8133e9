use std::sync::Mutex;

use logr::{errorf, infof, Entry, Logger};

/// Example of plugging in a completely custom backend by implementing
/// `Logger::log` directly. Imagine this forwards to some proprietary
/// collector for which this crate does not provide a backend.
#[derive(Default)]
struct MyCollector {
    sent: Mutex<u64>,
}

impl Logger for MyCollector {
    fn log(&self, entry: &Entry<'_>) {
        let mut sent = self.sent.lock().unwrap();
        *sent += 1;
        println!(
            "[my-collector #{}] {} {}:{} {}",
            *sent, entry.severity, entry.call_site.file, entry.call_site.line, entry.args
        );
    }
}

fn main() {
    let logger = MyCollector::default();

    infof!(logger, "custom backend example started");
    errorf!(logger, "simulated error sent via {}", "custom backend");
}
