use core::fmt;
use core::ptr;
use core::slice;

use crate::buffer::Buffer;
use crate::DEFAULT_CAPACITY;

/// A growable LIFO stack with a hysteresis shrink policy.
///
/// Elements are pushed and popped at the top. A push that fills the storage
/// doubles the capacity; a pop that leaves fewer than a tenth of the
/// capacity occupied halves it again. Capacity never drops below the
/// construction-time capacity, and shrinking is disabled entirely once that
/// floor is reached, so the stack cannot thrash between growing and
/// shrinking near the floor.
pub struct GrowableStack<T> {
    buf: Buffer<T>,
    used: usize,
    min_capacity: usize,
    shrink_limit: Option<usize>,
}

impl<T> GrowableStack<T> {
    /// Creates an empty `GrowableStack` with the default capacity
    /// ([`DEFAULT_CAPACITY`]).
    ///
    /// [`DEFAULT_CAPACITY`]: crate::DEFAULT_CAPACITY
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::GrowableStack;
    ///
    /// let stack: GrowableStack<usize> = GrowableStack::new();
    /// assert_eq!(stack.capacity(), growbuf::DEFAULT_CAPACITY);
    /// ```
    #[inline]
    pub fn new() -> GrowableStack<T> {
        GrowableStack::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty `GrowableStack` with the given initial capacity.
    ///
    /// The initial capacity is also the shrink floor: the stack never
    /// shrinks below it.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Aborts if the storage cannot be
    /// allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::GrowableStack;
    ///
    /// let stack: GrowableStack<usize> = GrowableStack::with_capacity(8);
    /// assert_eq!(stack.capacity(), 8);
    /// assert_eq!(stack.len(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> GrowableStack<T> {
        assert!(capacity > 0, "capacity must be positive");
        GrowableStack {
            buf: Buffer::with_capacity(capacity),
            used: 0,
            min_capacity: capacity,
            shrink_limit: None,
        }
    }

    /// Returns the current capacity of the `GrowableStack`.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::GrowableStack;
    ///
    /// let stack: GrowableStack<usize> = GrowableStack::with_capacity(8);
    /// assert_eq!(stack.capacity(), 8);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the number of elements in the `GrowableStack`.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::GrowableStack;
    ///
    /// let mut stack: GrowableStack<i32> = GrowableStack::with_capacity(8);
    /// assert_eq!(stack.len(), 0);
    /// stack.push(1);
    /// assert_eq!(stack.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.used
    }

    /// Returns true if the stack contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::GrowableStack;
    ///
    /// let mut stack: GrowableStack<i32> = GrowableStack::with_capacity(8);
    /// assert!(stack.is_empty());
    /// stack.push(1);
    /// assert!(!stack.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Provides a reference to the top element, or `None` if the stack is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::GrowableStack;
    ///
    /// let mut stack: GrowableStack<i32> = GrowableStack::with_capacity(8);
    /// assert_eq!(stack.peek(), None);
    ///
    /// stack.push(1);
    /// stack.push(2);
    /// assert_eq!(stack.peek(), Some(&2));
    /// ```
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        unsafe { Some(&*self.ptr().add(self.used - 1)) }
    }

    /// Pushes an element onto the top of the stack.
    ///
    /// If the push fills the storage the capacity is doubled right away, so
    /// the stack is never left full. Growth aborts if the larger storage
    /// cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::GrowableStack;
    ///
    /// let mut stack: GrowableStack<i32> = GrowableStack::with_capacity(2);
    /// stack.push(1);
    /// stack.push(2);
    ///
    /// assert_eq!(stack.capacity(), 4);
    /// assert_eq!(stack.len(), 2);
    /// ```
    pub fn push(&mut self, element: T) {
        debug_assert!(self.used < self.capacity());
        unsafe {
            self.buffer_write(self.used, element);
        }
        self.used += 1;

        if self.used == self.capacity() {
            let new_capacity = self.capacity() * 2;
            self.reallocate(new_capacity);
        }
    }

    /// Removes the top element and returns it, or `None` if the stack is
    /// empty.
    ///
    /// Popping from an empty stack leaves the stack untouched. A successful
    /// pop that leaves the live count below the shrink limit (a tenth of
    /// the capacity) halves the capacity, down to the construction-time
    /// floor.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::GrowableStack;
    ///
    /// let mut stack: GrowableStack<i32> = GrowableStack::with_capacity(2);
    /// stack.push(10);
    /// stack.push(20);
    ///
    /// assert_eq!(stack.pop(), Some(20));
    /// assert_eq!(stack.pop(), Some(10));
    /// assert_eq!(stack.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.used -= 1;
        let element = unsafe { self.buffer_read(self.used) };

        if let Some(limit) = self.shrink_limit {
            if self.used < limit {
                let new_capacity = self.capacity() / 2;
                self.reallocate(new_capacity);
            }
        }

        Some(element)
    }

    /// Clears the stack, dropping all elements. Capacity is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::GrowableStack;
    ///
    /// let mut stack: GrowableStack<i32> = GrowableStack::with_capacity(8);
    /// stack.push(1);
    /// stack.clear();
    /// assert!(stack.is_empty());
    /// ```
    pub fn clear(&mut self) {
        let used = self.used;
        self.used = 0;
        unsafe {
            ptr::drop_in_place(slice::from_raw_parts_mut(self.ptr_mut(), used));
        }
    }

    #[inline]
    fn ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    #[inline]
    fn ptr_mut(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    #[inline]
    unsafe fn buffer_read(&mut self, offset: usize) -> T {
        debug_assert!(offset < self.capacity());
        ptr::read(self.ptr().add(offset))
    }

    #[inline]
    unsafe fn buffer_write(&mut self, offset: usize, element: T) {
        debug_assert!(offset < self.capacity());
        ptr::write(self.ptr_mut().add(offset), element);
    }

    /// The live contents, bottom first.
    fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr(), self.used) }
    }

    /// Moves the contents into storage of `new_capacity` slots and
    /// recomputes the shrink limit. No realignment is needed; the contents
    /// are contiguous from slot zero.
    fn reallocate(&mut self, new_capacity: usize) {
        debug_assert!(self.used <= new_capacity);
        debug_assert!(new_capacity >= self.min_capacity);

        let mut new_buf = Buffer::with_capacity(new_capacity);
        unsafe {
            ptr::copy_nonoverlapping(self.ptr(), new_buf.as_mut_ptr(), self.used);
        }
        self.buf = new_buf;

        // Shrinking stays disabled at the floor, where halving again would
        // immediately be undone by the next growth.
        self.shrink_limit = if new_capacity > self.min_capacity {
            Some(new_capacity / 10)
        } else {
            None
        };
    }
}

impl<T> Drop for GrowableStack<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for GrowableStack<T> {
    #[inline]
    fn default() -> Self {
        GrowableStack::new()
    }
}

impl<T: Clone> Clone for GrowableStack<T> {
    fn clone(&self) -> Self {
        let mut cloned = GrowableStack::with_capacity(self.min_capacity);
        for element in self.as_slice() {
            cloned.push(element.clone());
        }
        cloned
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowableStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
