//! Tests for the sink installed as the global `log` backend.
//!
//! The `log` facade accepts one logger per process, so every test here shares
//! the same installed sink and runs serially.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use serial_test::serial;
use standout_log::{ConsoleSink, ConsoleTheme, Error, Level, LINE_TERMINATOR};

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.lock().unwrap());
        String::from_utf8(bytes).unwrap()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct Installed {
    out: Buffer,
    err: Buffer,
}

fn installed() -> &'static Installed {
    static INSTALLED: OnceLock<Installed> = OnceLock::new();
    INSTALLED.get_or_init(|| {
        let (out, err) = (Buffer::default(), Buffer::default());
        ConsoleSink::builder()
            .output_template("{Level:u3} {SourceContext}: {Message}{NewLine}")
            .theme(ConsoleTheme::none())
            .minimum_level(Level::Information)
            .standard_error_from_level(Level::Error)
            .stdout(out.clone())
            .stderr(err.clone())
            .build()
            .unwrap()
            .install()
            .unwrap();
        Installed { out, err }
    })
}

#[test]
#[serial]
fn records_are_rendered_with_their_target() {
    let sink = installed();
    sink.out.take();

    log::info!(target: "app::net", "listening on {}", 8080);
    log::warn!(target: "app::db", "slow query");

    let nl = LINE_TERMINATOR;
    assert_eq!(
        sink.out.take(),
        format!("INF app::net: listening on 8080{nl}WRN app::db: slow query{nl}")
    );
}

#[test]
#[serial]
fn records_below_minimum_are_dropped() {
    let sink = installed();
    sink.out.take();

    log::debug!("hidden");
    log::trace!("hidden");

    assert_eq!(sink.out.take(), "");
    assert_eq!(log::max_level(), log::LevelFilter::Info);
}

#[test]
#[serial]
fn errors_go_to_stderr() {
    let sink = installed();
    sink.out.take();
    sink.err.take();

    log::error!(target: "app", "disk full");

    assert_eq!(sink.out.take(), "");
    assert_eq!(sink.err.take(), format!("ERR app: disk full{LINE_TERMINATOR}"));
}

#[test]
#[serial]
fn second_install_is_rejected() {
    installed();
    let result = ConsoleSink::builder()
        .stdout(io::sink())
        .build()
        .unwrap()
        .install();
    assert!(matches!(result, Err(Error::Configuration(_))));
}
