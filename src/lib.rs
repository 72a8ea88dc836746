//! Growable circular ring buffer and stack containers.
//!
//! This crate provides two independent heap-backed containers:
//!
//! - [`RingBuffer`]: a circular buffer with strict FIFO semantics. When it
//!   fills up it doubles its capacity and realigns its contents so the
//!   oldest element sits at slot zero again. Capacity never shrinks.
//! - [`GrowableStack`]: a contiguous LIFO stack that doubles its capacity
//!   when full and halves it again once the live count drops below a
//!   hysteresis threshold, never going below its construction capacity.
//!
//! Both containers offer `O(1)` amortized inserts and removals. Contained
//! elements are not required to be copyable.
//!
//! Running out of memory during a (re)allocation aborts through the global
//! allocator's error path; it is never reported as a recoverable error.
//! Removing from an empty container returns `None` and leaves the container
//! untouched.
//!
//! Neither container is synchronized. If one is shared across threads the
//! caller must serialize access externally.
//!
//! # Feature Flags
//! The **growbuf** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd
//!
//! # Usage
//!
//! First, add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! growbuf = "0.1"
//! ```
//!
//! If you would instead like to use growbuf in a `#![no_std]` situation or
//! crate you can request this via:
//!
//! ```toml
//! [dependencies]
//! growbuf = { version = "0.1", default-features = false }
//! ```
//!
//! An allocator is still required; the containers live on the heap.
//!
//! # Examples
//! ```
//! use growbuf::RingBuffer;
//!
//! let mut queue: RingBuffer<i32> = RingBuffer::with_capacity(2);
//!
//! queue.enqueue(1);
//! queue.enqueue(2);
//! queue.enqueue(3); // grows to capacity 4
//! assert_eq!(queue.capacity(), 4);
//!
//! assert_eq!(queue.dequeue(), Some(1));
//! assert_eq!(queue.dequeue(), Some(2));
//! assert_eq!(queue.dequeue(), Some(3));
//! assert_eq!(queue.dequeue(), None);
//! ```
//!
//! ```
//! use growbuf::GrowableStack;
//!
//! let mut stack: GrowableStack<&str> = GrowableStack::new();
//!
//! stack.push("a");
//! stack.push("b");
//!
//! assert_eq!(stack.pop(), Some("b"));
//! assert_eq!(stack.pop(), Some("a"));
//! assert_eq!(stack.pop(), None);
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]

extern crate alloc;

mod buffer;
mod ringbuffer;
mod stack;
mod utils;

pub use crate::ringbuffer::RingBuffer;
pub use crate::stack::GrowableStack;

/// Capacity used by [`RingBuffer::new`] and [`GrowableStack::new`].
pub const DEFAULT_CAPACITY: usize = 100;
