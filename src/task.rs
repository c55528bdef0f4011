//! Runs suspending operations off the UI loop.
//!
//! The result lands in a shared slot that `update()` polls every frame:
//! 1. the caller keeps the [`Pending`] and spawns the future
//! 2. the future runs on a worker thread (native) or the browser's microtask queue (web)
//! 3. the future stores its output in the slot and requests a repaint
//! 4. `update()` calls [`Pending::take`] and feeds the result to the controller

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;

/// Slot for the result of an operation that has not necessarily finished yet
#[derive(Debug)]
pub struct Pending<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for Pending<T> {
    fn clone(&self) -> Self {
        Self { slot: self.slot.clone() }
    }
}

impl<T> Default for Pending<T> {
    fn default() -> Self {
        Self { slot: Arc::new(Mutex::new(None)) }
    }
}

impl<T> Pending<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that is already resolved
    pub fn ready(value: T) -> Self {
        let pending = Self::new();
        pending.resolve(value);
        pending
    }

    pub fn resolve(&self, value: T) {
        *self.slot.lock() = Some(value);
    }

    pub fn is_ready(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Takes the result out if it has arrived
    pub fn take(&self) -> Option<T> {
        self.slot.lock().take()
    }
}

/// Spawns `future` and returns the slot its output will be written to
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<T, F>(ctx: Option<egui::Context>, future: F) -> Pending<T>
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    let pending = Pending::new();
    let slot = pending.clone();
    std::thread::spawn(move || {
        let value = futures::executor::block_on(future);
        slot.resolve(value);
        if let Some(ctx) = ctx {
            ctx.request_repaint();
        }
    });
    pending
}

/// Spawns `future` and returns the slot its output will be written to
#[cfg(target_arch = "wasm32")]
pub fn spawn<T, F>(ctx: Option<egui::Context>, future: F) -> Pending<T>
where
    T: 'static,
    F: Future<Output = T> + 'static,
{
    let pending = Pending::new();
    let slot = pending.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let value = future.await;
        slot.resolve(value);
        if let Some(ctx) = ctx {
            ctx.request_repaint();
        }
    });
    pending
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_ready_slot_is_taken_once() {
        let pending = Pending::ready(7);
        assert!(pending.is_ready());
        assert_eq!(pending.take(), Some(7));
        assert_eq!(pending.take(), None);
    }

    #[test]
    fn test_spawned_future_resolves() {
        let pending = spawn(None, async { 21 * 2 });
        let deadline = Instant::now() + Duration::from_secs(5);
        while !pending.is_ready() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(pending.take(), Some(42));
    }
}
