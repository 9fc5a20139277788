//! Captures formatted tracing output so tests can assert on emitted events.

use std::io;
use std::sync::{Arc, Mutex};

use tracing::Level;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.lock().unwrap().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

/// Runs `f` with a thread-local subscriber at `level` and returns what it logged.
pub(crate) fn capture<R>(level: Level, f: impl FnOnce() -> R) -> (R, String) {
	let buffer = Buffer::default();
	let writer = buffer.clone();
	let subscriber = tracing_subscriber::fmt()
		.with_writer(move || writer.clone())
		.with_max_level(level)
		.with_ansi(false)
		.without_time()
		.finish();

	let out = tracing::subscriber::with_default(subscriber, f);
	let bytes = buffer.0.lock().unwrap().clone();
	(out, String::from_utf8_lossy(&bytes).into_owned())
}
