//! Owned storage of possibly-uninitialized slots.

use alloc::boxed::Box;
use core::mem::MaybeUninit;

/// A fixed-size heap allocation whose slots are wholly or partially
/// uninitialized. Dropping it releases the allocation without running any
/// element destructor; the containers track which slots are live and drop
/// them explicitly.
pub struct Buffer<T> {
    slots: Box<[MaybeUninit<T>]>,
}

impl<T> Buffer<T> {
    /// Allocates storage for `capacity` slots, all uninitialized.
    ///
    /// Allocation failure aborts via the global allocator's error path.
    pub fn with_capacity(capacity: usize) -> Buffer<T> {
        Buffer {
            slots: Box::new_uninit_slice(capacity),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.slots.as_ptr() as *const T
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.slots.as_mut_ptr() as *mut T
    }
}
