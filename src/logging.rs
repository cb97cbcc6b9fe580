use std::io::Write;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use env_logger::{Builder, Env};

/// Install the event logger. `RUST_LOG` overrides the default `info` filter.
///
/// Lines look like `[1718000000123ms][A] INFO A: 9 left`.
pub fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0);
            let current = thread::current();
            let thread_name = current.name().unwrap_or("unnamed");
            writeln!(
                buf,
                "[{ts}ms][{thread_name}] {} {}",
                record.level(),
                record.args()
            )
        })
        .try_init();
}
