use std::ptr;

/// Owned sqlite object (`sqlite3`, `sqlite3_stmt`) released by `release` when dropped.
///
/// Starts empty, the sqlite constructor fills it through [`Handle::out_ptr`].
pub(crate) struct Handle<T> {
    ptr: *mut T,
    release: unsafe fn(*mut T),
}

impl<T> Handle<T> {
    pub(crate) fn empty(release: unsafe fn(*mut T)) -> Self {
        Self {
            ptr: ptr::null_mut(),
            release,
        }
    }

    pub(crate) fn as_ptr(&self) -> *mut T {
        self.ptr
    }

    /// Out parameter for `sqlite3_open_v2` or `sqlite3_prepare_v2`.
    pub(crate) fn out_ptr(&mut self) -> *mut *mut T {
        &mut self.ptr
    }

    pub(crate) fn is_null(&self) -> bool {
        self.ptr.is_null()
    }
}

impl<T> Drop for Handle<T> {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe { (self.release)(self.ptr) };
        }
    }
}

// Sqlite is built in serialized mode and every access goes through a mutex.
unsafe impl<T> Send for Handle<T> {}
unsafe impl<T> Sync for Handle<T> {}
