use core::ptr;
use core::slice;

use crate::buffer::Buffer;
use crate::utils::wrap_add;
use crate::DEFAULT_CAPACITY;

mod trait_impls;

/// A growable circular FIFO buffer.
///
/// Elements are inserted at the tail with [`enqueue`] and consumed from the
/// head with [`dequeue`]. When the buffer is strictly full the next insert
/// doubles the capacity and realigns the contents so the oldest element is
/// back at slot zero; capacity never shrinks.
///
/// Emptiness is tracked by the live-element count alone. The head and tail
/// cursors coincide both when the buffer is empty and when it is full, so
/// comparing them tells you nothing.
///
/// [`enqueue`]: RingBuffer::enqueue
/// [`dequeue`]: RingBuffer::dequeue
pub struct RingBuffer<T> {
    buf: Buffer<T>,
    head: usize,
    tail: usize,
    used: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty `RingBuffer` with the default capacity
    /// ([`DEFAULT_CAPACITY`]).
    ///
    /// [`DEFAULT_CAPACITY`]: crate::DEFAULT_CAPACITY
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::RingBuffer;
    ///
    /// let buf: RingBuffer<usize> = RingBuffer::new();
    /// assert_eq!(buf.capacity(), growbuf::DEFAULT_CAPACITY);
    /// ```
    #[inline]
    pub fn new() -> RingBuffer<T> {
        RingBuffer::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty `RingBuffer` with the given initial capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Aborts if the storage cannot be
    /// allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::RingBuffer;
    ///
    /// let buf: RingBuffer<usize> = RingBuffer::with_capacity(4);
    /// assert_eq!(buf.capacity(), 4);
    /// assert_eq!(buf.len(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> RingBuffer<T> {
        assert!(capacity > 0, "capacity must be positive");
        RingBuffer {
            buf: Buffer::with_capacity(capacity),
            head: 0,
            tail: 0,
            used: 0,
        }
    }

    /// Returns the current capacity of the `RingBuffer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::RingBuffer;
    ///
    /// let buf: RingBuffer<usize> = RingBuffer::with_capacity(4);
    /// assert_eq!(buf.capacity(), 4);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the number of elements in the `RingBuffer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::RingBuffer;
    ///
    /// let mut buf: RingBuffer<usize> = RingBuffer::with_capacity(4);
    /// assert_eq!(buf.len(), 0);
    /// buf.enqueue(1);
    /// assert_eq!(buf.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.used
    }

    /// Returns true if the buffer contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::RingBuffer;
    ///
    /// let mut buf: RingBuffer<usize> = RingBuffer::with_capacity(4);
    /// assert!(buf.is_empty());
    /// buf.enqueue(1);
    /// assert!(!buf.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Returns true if every slot of the current storage is occupied.
    ///
    /// The next [`enqueue`] on a full buffer grows the storage first.
    ///
    /// [`enqueue`]: RingBuffer::enqueue
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::RingBuffer;
    ///
    /// let mut buf: RingBuffer<usize> = RingBuffer::with_capacity(2);
    /// buf.enqueue(1);
    /// buf.enqueue(2);
    /// assert!(buf.is_full());
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        self.used == self.capacity()
    }

    /// Provides a reference to the oldest element, or `None` if the buffer
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::RingBuffer;
    ///
    /// let mut buf: RingBuffer<i32> = RingBuffer::with_capacity(4);
    /// assert_eq!(buf.front(), None);
    ///
    /// buf.enqueue(1);
    /// buf.enqueue(2);
    /// assert_eq!(buf.front(), Some(&1));
    /// ```
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        unsafe { Some(&*self.ptr().add(self.head)) }
    }

    /// Appends an element at the tail of the buffer.
    ///
    /// If the buffer is full its capacity is doubled first; the copy this
    /// entails preserves FIFO order across the wraparound boundary. Growth
    /// aborts if the larger storage cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::RingBuffer;
    ///
    /// let mut buf: RingBuffer<i32> = RingBuffer::with_capacity(2);
    /// buf.enqueue(1);
    /// buf.enqueue(2);
    /// buf.enqueue(3);
    ///
    /// assert_eq!(buf.capacity(), 4);
    /// assert_eq!(buf.len(), 3);
    /// assert_eq!(buf.dequeue(), Some(1));
    /// ```
    pub fn enqueue(&mut self, element: T) {
        if self.is_full() {
            self.grow();
        }
        let tail = self.tail;
        self.tail = wrap_add(tail, 1, self.capacity());
        self.used += 1;
        unsafe {
            self.buffer_write(tail, element);
        }
    }

    /// Removes the oldest element and returns it, or `None` if the buffer
    /// is empty.
    ///
    /// Dequeuing from an empty buffer leaves the buffer untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::RingBuffer;
    ///
    /// let mut buf: RingBuffer<i32> = RingBuffer::with_capacity(4);
    /// buf.enqueue(1);
    /// buf.enqueue(2);
    ///
    /// assert_eq!(buf.dequeue(), Some(1));
    /// assert_eq!(buf.dequeue(), Some(2));
    /// assert_eq!(buf.dequeue(), None);
    /// ```
    pub fn dequeue(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let head = self.head;
        self.head = wrap_add(head, 1, self.capacity());
        self.used -= 1;
        unsafe { Some(self.buffer_read(head)) }
    }

    /// Clears the buffer, dropping all elements. Capacity is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::RingBuffer;
    ///
    /// let mut buf: RingBuffer<i32> = RingBuffer::with_capacity(4);
    /// buf.enqueue(1);
    /// buf.clear();
    /// assert!(buf.is_empty());
    /// ```
    pub fn clear(&mut self) {
        while let Some(element) = self.dequeue() {
            drop(element);
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

    /// The live contents, oldest first, as one or two slices.
    fn as_slices(&self) -> (&[T], &[T]) {
        if self.used == 0 {
            return (&[], &[]);
        }
        unsafe {
            if self.head < self.tail {
                // [. . H o o o T . .]
                (slice::from_raw_parts(self.ptr().add(self.head), self.used), &[])
            } else {
                // wrapped (or full with head == tail)
                //
                // [o o T . . . H o o]
                let lead = self.capacity() - self.head;
                (
                    slice::from_raw_parts(self.ptr().add(self.head), lead),
                    slice::from_raw_parts(self.ptr(), self.tail),
                )
            }
        }
    }

    /// Doubles the capacity and realigns the contents so the oldest element
    /// lands at slot zero of the new storage.
    ///
    /// Only ever called on a strictly full buffer, which is the one state
    /// where `head == tail` says nothing about alignment; the split point of
    /// the copy is decided by `head` alone.
    fn grow(&mut self) {
        debug_assert!(self.is_full());

        let old_cap = self.capacity();
        let mut new_buf = Buffer::with_capacity(old_cap * 2);

        unsafe {
            if self.head == 0 {
                // Already linear:
                //
                // [H o o o o o o o]
                //  T
                ptr::copy_nonoverlapping(self.ptr(), new_buf.as_mut_ptr(), old_cap);
            } else {
                // Split at head; the run from head to the end of the array
                // comes first, the wrapped run from slot zero second:
                //
                // [o o o o H o o o]
                //          T
                let lead = old_cap - self.head;
                ptr::copy_nonoverlapping(self.ptr().add(self.head), new_buf.as_mut_ptr(), lead);
                ptr::copy_nonoverlapping(self.ptr(), new_buf.as_mut_ptr().add(lead), self.head);
            }
        }

        // The old allocation is released here; the elements were moved into
        // the new storage bitwise, so only the memory goes away.
        self.buf = new_buf;
        self.head = 0;
        self.tail = old_cap;
    }
}

#[cfg(test)]
mod tests {
    use super::RingBuffer;

    #[test]
    fn test_simple() {
        let mut tester: RingBuffer<i32> = RingBuffer::with_capacity(8);
        assert_eq!(tester.capacity(), 8);
        assert_eq!(tester.len(), 0);

        tester.enqueue(1);
        tester.enqueue(2);
        tester.enqueue(3);
        tester.enqueue(4);
        assert_eq!(tester.len(), 4);

        assert_eq!(tester.dequeue(), Some(1));
        assert_eq!(tester.dequeue(), Some(2));
        assert_eq!(tester.len(), 2);
        assert_eq!(tester.dequeue(), Some(3));
        assert_eq!(tester.dequeue(), Some(4));
        assert_eq!(tester.dequeue(), None);
    }

    #[test]
    fn test_dequeue_empty() {
        let mut tester: RingBuffer<i32> = RingBuffer::with_capacity(3);
        tester.enqueue(1);
        assert_eq!(tester.dequeue(), Some(1));
        assert_eq!(tester.is_empty(), true);
        assert_eq!(tester.len(), 0);
        assert_eq!(tester.dequeue(), None);
        assert_eq!(tester.dequeue(), None);
        assert_eq!(tester.len(), 0);

        // still usable afterwards
        tester.enqueue(2);
        assert_eq!(tester.dequeue(), Some(2));
    }

    #[test]
    #[should_panic]
    fn test_zero_capacity() {
        let _tester: RingBuffer<i32> = RingBuffer::with_capacity(0);
    }

    #[test]
    fn test_growth_doubles_capacity() {
        let mut tester: RingBuffer<usize> = RingBuffer::with_capacity(4);
        for i in 0..4 {
            tester.enqueue(i);
        }
        assert_eq!(tester.capacity(), 4);
        assert!(tester.is_full());

        tester.enqueue(4);
        assert_eq!(tester.capacity(), 8);

        for i in 5..16 {
            tester.enqueue(i);
        }
        assert_eq!(tester.capacity(), 16);
        assert!(tester.is_full());
        tester.enqueue(16);
        assert_eq!(tester.capacity(), 32);

        for i in 0..17 {
            assert_eq!(tester.dequeue(), Some(i));
        }
        assert_eq!(tester.dequeue(), None);
        // capacity never decreases
        assert_eq!(tester.capacity(), 32);
    }

    #[test]
    fn test_growth_after_partial_drain() {
        // capacity 4: fill, consume the oldest, then keep inserting; the
        // growth happens with head > 0 and must preserve order
        let mut tester: RingBuffer<i32> = RingBuffer::with_capacity(4);
        for i in 0..4 {
            tester.enqueue(i);
        }
        assert_eq!(tester.dequeue(), Some(0));

        tester.enqueue(4);
        tester.enqueue(5);
        assert_eq!(tester.capacity(), 8);

        for i in 1..6 {
            assert_eq!(tester.dequeue(), Some(i));
        }
        assert_eq!(tester.dequeue(), None);
    }

    #[test]
    fn test_grow_realign_at_every_offset() {
        const CAP: usize = 8;

        // rotate the cursors to every possible head offset before filling,
        // so growth exercises both the aligned and the split copy
        for padding in 0..CAP {
            let mut tester: RingBuffer<usize> = RingBuffer::with_capacity(CAP);
            for i in 0..padding {
                tester.enqueue(i);
                tester.dequeue();
            }

            for i in 0..CAP {
                tester.enqueue(i);
            }
            assert_eq!(tester.capacity(), CAP);
            assert!(tester.is_full());

            tester.enqueue(CAP);
            assert_eq!(tester.capacity(), CAP * 2);
            assert_eq!(tester.len(), CAP + 1);

            for i in 0..=CAP {
                assert_eq!(tester.dequeue(), Some(i));
            }
            assert_eq!(tester.dequeue(), None);
        }
    }

    #[test]
    fn test_interleaved_drive() {
        // the drive sequence of the original integration test: interleave
        // enqueues and dequeues through several growths, then drain
        let mut tester: RingBuffer<i32> = RingBuffer::with_capacity(10);

        for i in 0..5 {
            tester.enqueue(i);
        }
        assert_eq!(tester.dequeue(), Some(0));

        for i in 5..11 {
            tester.enqueue(i);
        }
        assert_eq!(tester.dequeue(), Some(1));

        for i in 11..30 {
            tester.enqueue(i);
        }
        for i in 2..7 {
            assert_eq!(tester.dequeue(), Some(i));
        }

        for i in 30..100 {
            tester.enqueue(i);
        }

        for i in 7..100 {
            assert_eq!(tester.dequeue(), Some(i));
        }
        assert_eq!(tester.dequeue(), None);
    }

    #[test]
    fn test_front() {
        let mut tester: RingBuffer<i32> = RingBuffer::with_capacity(4);
        assert_eq!(tester.front(), None);
        tester.enqueue(1);
        tester.enqueue(2);
        assert_eq!(tester.front(), Some(&1));
        tester.dequeue();
        assert_eq!(tester.front(), Some(&2));
        tester.dequeue();
        assert_eq!(tester.front(), None);
    }

    #[test]
    fn test_clear() {
        let mut tester: RingBuffer<i32> = RingBuffer::with_capacity(4);
        tester.enqueue(1);
        tester.enqueue(2);
        tester.clear();
        assert!(tester.is_empty());
        assert_eq!(tester.capacity(), 4);

        tester.enqueue(3);
        assert_eq!(tester.dequeue(), Some(3));
    }

    #[test]
    fn test_drop() {
        use std::cell::Cell;

        let flag = &Cell::new(0);

        struct Bump<'a>(&'a Cell<i32>);

        impl<'a> Drop for Bump<'a> {
            fn drop(&mut self) {
                let n = self.0.get();
                self.0.set(n + 1);
            }
        }

        {
            let mut tester: RingBuffer<Bump> = RingBuffer::with_capacity(2);
            tester.enqueue(Bump(flag));
            tester.enqueue(Bump(flag));
            tester.enqueue(Bump(flag)); // grows
            assert_eq!(flag.get(), 0);
        }
        assert_eq!(flag.get(), 3);

        // dropping a dequeued value must not double-drop on container drop
        flag.set(0);
        {
            let mut tester: RingBuffer<Bump> = RingBuffer::with_capacity(2);
            tester.enqueue(Bump(flag));
            tester.enqueue(Bump(flag));
            drop(tester.dequeue());
            assert_eq!(flag.get(), 1);
        }
        assert_eq!(flag.get(), 2);
    }

    #[test]
    fn test_non_copy_elements() {
        let mut tester: RingBuffer<String> = RingBuffer::with_capacity(2);
        tester.enqueue(String::from("a"));
        tester.enqueue(String::from("b"));
        tester.enqueue(String::from("c"));
        assert_eq!(tester.dequeue().as_deref(), Some("a"));
        assert_eq!(tester.dequeue().as_deref(), Some("b"));
        assert_eq!(tester.dequeue().as_deref(), Some("c"));
        assert_eq!(tester.dequeue(), None);
    }

    #[test]
    fn test_fmt() {
        let mut tester: RingBuffer<usize> = RingBuffer::with_capacity(4);
        tester.extend(0..4);
        assert_eq!(format!("{:?}", tester), "[0, 1, 2, 3]");

        // wrapped contents print in logical order
        tester.dequeue();
        tester.enqueue(4);
        assert_eq!(format!("{:?}", tester), "[1, 2, 3, 4]");
    }

    #[test]
    fn test_eq() {
        let a: RingBuffer<usize> = (0..4).collect();
        let mut b: RingBuffer<usize> = RingBuffer::with_capacity(4);
        // same logical content, different cursor positions
        b.enqueue(999);
        b.dequeue();
        b.extend(0..4);
        assert_eq!(a, b);

        b.dequeue();
        assert!(a != b);
    }

    #[test]
    fn test_clone() {
        let mut tester: RingBuffer<usize> = RingBuffer::with_capacity(4);
        for i in 0..4 {
            tester.enqueue(i);
        }
        tester.dequeue();
        tester.enqueue(4);

        let cloned = tester.clone();
        assert_eq!(tester, cloned);
        assert_eq!(cloned.capacity(), tester.capacity());
    }

    #[test]
    fn test_from_iterator() {
        let tester: RingBuffer<usize> = (0..200).collect();
        assert_eq!(tester.len(), 200);
        // default capacity of 100, doubled once
        assert_eq!(tester.capacity(), 200);
    }
}
