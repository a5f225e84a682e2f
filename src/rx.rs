//! Receive queue between the byte-received interrupt and the main loop.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;
use heapless::Deque;

/// Fixed-capacity byte queue fed from the UART receive interrupt.
///
/// The interrupt handler calls [`push`](RxBuffer::push) for every received
/// byte; the main loop drains it with [`pop`](RxBuffer::pop), usually through
/// [`Console::service`](crate::Console::service). A byte arriving while the
/// queue is full is dropped and the overflow flag is raised until someone
/// calls [`take_overflow`](RxBuffer::take_overflow).
pub struct RxBuffer<const N: usize> {
    queue: Mutex<RefCell<Deque<u8, N>>>,
    overflow: Mutex<Cell<bool>>,
}

impl<const N: usize> RxBuffer<N> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
            overflow: Mutex::new(Cell::new(false)),
        }
    }

    /// Queues one received byte. Returns false if it was dropped.
    pub fn push(&self, byte: u8) -> bool {
        critical_section::with(|cs| {
            let stored = self.queue.borrow_ref_mut(cs).push_back(byte).is_ok();
            if !stored {
                self.overflow.borrow(cs).set(true);
            }
            stored
        })
    }

    /// Removes the oldest received byte.
    pub fn pop(&self) -> Option<u8> {
        critical_section::with(|cs| self.queue.borrow_ref_mut(cs).pop_front())
    }

    /// Number of bytes waiting.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether bytes were dropped since the last call, and clears the flag.
    pub fn take_overflow(&self) -> bool {
        critical_section::with(|cs| self.overflow.borrow(cs).replace(false))
    }

    /// Drops every queued byte and clears the overflow flag.
    pub fn reset(&self) {
        critical_section::with(|cs| {
            self.queue.borrow_ref_mut(cs).clear();
            self.overflow.borrow(cs).set(false);
        });
    }
}

impl<const N: usize> Default for RxBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
