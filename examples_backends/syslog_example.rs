use logr::syslog::Syslog;
use logr::{criticalf, infof};

fn main() {
    // Fails cleanly when no syslog daemon listens on the local socket.
    let logger = match Syslog::new("billing", "1.2.0") {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("syslog backend unavailable: {}", e);
            std::process::exit(1);
        }
    };

    infof!(logger, "syslog backend example started");
    criticalf!(logger, "simulated failure sent to syslog");
}
