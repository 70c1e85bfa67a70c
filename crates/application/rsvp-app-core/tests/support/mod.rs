#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use camino::Utf8PathBuf;
use rsvp_app_core::domain::AppState;
use rsvp_app_core::kernel::AppKernel;
use rsvp_app_core::ports::{HistoryPort, HostDirectory, RsvpBook};
use rsvp_app_core::RecordingHistory;

#[derive(Clone, Default)]
pub struct SharedHistory(pub Arc<RecordingHistory>);

impl HistoryPort for SharedHistory {
    fn push(&self, location: &str) -> anyhow::Result<()> {
        self.0.push(location)
    }

    fn replace(&self, location: &str) -> anyhow::Result<()> {
        self.0.replace(location)
    }
}

pub fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    (dir, root)
}

/// Pump `tick` until `done` holds or five seconds pass.
pub fn settle<H, R, Y>(
    kernel: &mut AppKernel<H, R, Y>,
    done: impl Fn(&AppState) -> bool,
) -> AppState
where
    H: HostDirectory,
    R: RsvpBook,
    Y: HistoryPort,
{
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        kernel.tick();
        let state = kernel.store.state();
        if done(&state) {
            return state;
        }
        assert!(Instant::now() < deadline, "kernel did not settle: {state:?}");
        std::thread::sleep(Duration::from_millis(10));
    }
}
