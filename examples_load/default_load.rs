use std::sync::Arc;
use std::time::Instant;

use logr::noop_sink::NoopSink;
use logr::stackdriver::Stackdriver;
use logr::{errorf, infof};

fn main() {
    let logger = Stackdriver::with_sink("load", "0.0.0", Arc::new(NoopSink));

    let n: u64 = 100_000;
    let start = Instant::now();
    for i in 0..n {
        infof!(logger, "default load test info {}", i);
    }
    let elapsed = start.elapsed();
    println!("info: formatted {} records in {:?} (~{:.0} rec/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );

    // Error reports capture and resolve the stack, so run far fewer.
    let n: u64 = 1_000;
    let start = Instant::now();
    for i in 0..n {
        errorf!(logger, "default load test error {}", i);
    }
    let elapsed = start.elapsed();
    println!("error: formatted {} reports in {:?} (~{:.0} rec/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
}
