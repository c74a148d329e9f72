use std::io;
use std::sync::{Arc, Mutex};

use notewire_core::{
    Broadcaster, CenterConfig, Envelope, LocalBroadcaster, Notification, NotificationCenter,
    TypedCenter,
};
use notewire_core_macros::Notification;

#[derive(Notification)]
#[notification(crate = "notewire_core", namespace = "logging")]
struct Status {
    text: String,
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Post a mismatched envelope under `config` and return what was logged at WARN.
fn log_mismatch(config: CenterConfig) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let bus = Arc::new(LocalBroadcaster::new());
        let center = NotificationCenter::with_config(bus.clone(), config);
        let _handle = center.observe(|status: &Status| panic!("unexpected delivery: {}", status.text));
        bus.post_envelope(Envelope::new(Status::name(), None, Arc::new(17u16)));
    });
    captured.text()
}

#[test]
fn mismatch_warning_names_the_notification() {
    let out = log_mismatch(CenterConfig::labeled("audit"));
    assert!(out.contains("WARN"), "no warning in {out:?}");
    assert!(out.contains(&Status::name()), "name missing from {out:?}");
    assert!(out.contains("dropping delivery"), "message missing from {out:?}");
    assert!(out.contains("audit"), "center label missing from {out:?}");
}

#[test]
fn mismatch_warning_can_be_silenced() {
    let out = log_mismatch(CenterConfig {
        label: "quiet".into(),
        log_mismatches: false,
    });
    assert!(out.is_empty(), "expected no output, got {out:?}");
}
