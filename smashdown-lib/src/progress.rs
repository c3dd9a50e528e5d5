/// Receives progress of a batch operation (song-list sync, downloads).
///
/// Every method has a no-op default so reporters only implement what they
/// display.
pub trait SyncProgress {
    /// A batch of `total` items is starting.
    fn start(&mut self, _total: usize) {}

    /// Work on one item is starting.
    fn item(&mut self, _description: &str) {}

    /// The current item is done.
    fn advance(&mut self) {}

    /// The batch is over, successfully or not.
    fn finish(&mut self) {}
}

/// Reports nothing.
pub struct SilentProgress;

impl SyncProgress for SilentProgress {}

/// Reports each item through the `log` facade.
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SyncProgress for LogProgress {
    fn start(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn item(&mut self, description: &str) {
        log::info!("[{}/{}] {}", self.done + 1, self.total, description);
    }

    fn advance(&mut self) {
        self.done += 1;
    }

    fn finish(&mut self) {
        log::info!("Done {} of {} item(s).", self.done, self.total);
    }
}
