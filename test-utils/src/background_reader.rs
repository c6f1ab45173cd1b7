use std::{io, thread};
use std::io::Read;
use std::os::fd::AsRawFd;
use std::string::FromUtf8Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use thiserror::Error;
use crate::constants::BACKGROUND_READER_CHECK_INTERVAL;
use crate::signal::FdNonblockExt;

const READ_CHUNK_SIZE: usize = 16 * 1024;

pub trait Reader: AsRawFd + Read + Send + 'static {}
impl<T: AsRawFd + Read + Send + 'static> Reader for T {}

/// Collects a child's output on a separate thread, so the daemon never
/// blocks on a full pipe while a test waits for a log line.
pub struct BackgroundReader {
    thread: Option<JoinHandle<Result<(), BackgroundReaderError>>>,
    inner: Arc<Inner>,
}

struct Inner {
    buf: Mutex<Vec<u8>>,
    shutdown_notice: AtomicBool,
    timeout: Option<Duration>,
}

impl Inner {
    fn buf(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buf.lock()
            .unwrap_or_else(|e| panic!("background reader thread panicked: {e}"))
    }
}

impl BackgroundReader {
    pub fn new(
        reader: impl Reader,
        timeout: Option<u64>,
    ) -> Result<Self, BackgroundReaderError> {
        reader.set_nonblock(true)?;
        let inner = Arc::new(
            Inner {
                buf: Mutex::new(Vec::with_capacity(READ_CHUNK_SIZE)),
                shutdown_notice: AtomicBool::new(false),
                timeout: timeout.map(Duration::from_millis),
            }
        );
        let thread_inner = inner.clone();
        let thread = thread::spawn(move || Self::read_loop(reader, thread_inner));
        Ok(
            BackgroundReader {
                thread: Some(thread),
                inner,
            }
        )
    }

    fn read_loop(
        mut reader: impl Reader,
        inner: Arc<Inner>,
    ) -> Result<(), BackgroundReaderError> {
        let mut read_buf = [0u8; READ_CHUNK_SIZE];
        loop {
            if inner.shutdown_notice.load(Ordering::Relaxed) {
                return Ok(())
            }
            match reader.read(&mut read_buf) {
                Ok(0) => return Ok(()),

                Ok(bytes_read)
                => inner.buf().extend_from_slice(&read_buf[..bytes_read]),

                Err(e) if e.kind() != io::ErrorKind::WouldBlock
                    && e.kind() != io::ErrorKind::Interrupted
                => return Err(BackgroundReaderError::Io(e)),

                Err(_) => thread::sleep(BACKGROUND_READER_CHECK_INTERVAL),
            }
        }
    }

    /// Takes everything collected so far
    pub fn take(&mut self) -> String {
        let bytes = std::mem::take(&mut *self.inner.buf());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Waits for the pipe to close, returns the remaining output
    pub fn read_to_end(mut self) -> Result<String, BackgroundReaderError> {
        if let Some(thread) = self.thread.take() {
            thread.join().expect("background reader thread panicked")?;
        }
        let bytes = std::mem::take(&mut *self.inner.buf());
        Ok(String::from_utf8(bytes)?)
    }

    /// Blocks until `string` shows up, returns the output up to and
    /// including it. Panics once the timeout expires.
    pub fn wait_until(
        &mut self,
        string: &str,
    ) -> Result<String, BackgroundReaderError> {
        let needle = string.as_bytes();
        let started = Instant::now();
        let mut searched = 0usize;

        loop {
            let mut buf = self.inner.buf();
            let found = buf[searched..]
                .windows(needle.len())
                .position(|w| w == needle)
                .map(|pos| searched + pos);
            if let Some(pos) = found {
                let rest = buf.split_off(pos + needle.len());
                let consumed = std::mem::replace(&mut *buf, rest);
                return Ok(String::from_utf8(consumed)?)
            }
            searched = buf.len().saturating_sub(needle.len().saturating_sub(1));

            if let Some(ref timeout) = self.inner.timeout
                && started.elapsed() > *timeout
            {
                eprintln!("last log messages: {}", String::from_utf8_lossy(&buf));
                panic!("timed out waiting for \"{string}\"")
            }
            drop(buf);
            thread::sleep(BACKGROUND_READER_CHECK_INTERVAL);
        }
    }
}

impl Drop for BackgroundReader {
    fn drop(&mut self) {
        let Some(thread) = self.thread.take() else {
            return
        };
        self.inner.shutdown_notice.store(true, Ordering::Relaxed);
        if let Err(e) = thread.join().expect("background reader thread panicked") {
            eprintln!("background reader thread failed: {e}");
        }
    }
}

#[derive(Debug, Error)]
pub enum BackgroundReaderError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    FromUtf8(#[from] FromUtf8Error),
}
