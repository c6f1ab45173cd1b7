use std::sync::atomic::{AtomicU16, Ordering};

// away from the daemon's default 5025 so a locally running instance
// doesn't get in the way
static NEXT_PORT: AtomicU16 = AtomicU16::new(25025);

thread_local! {
    pub static LOCAL_PORT: u16 = NEXT_PORT.fetch_add(1, Ordering::Relaxed);
}
