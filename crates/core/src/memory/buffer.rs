//! RAM Buffer Implementation.
//!
//! This module provides a safe wrapper around a raw allocation for a model's flat RAM.
//! On Unix it maps anonymous memory with `mmap`, so pages are only backed by the OS once
//! touched; this keeps a large RAM cheap when a test only touches a few windows, or none
//! at all because the memory is rebound before the step. Elsewhere (and for zero-sized
//! buffers) it falls back to a heap allocation.

use std::fmt;
use std::io;
#[cfg(unix)]
use std::ptr::NonNull;

enum Storage {
    #[cfg(unix)]
    Mapped { ptr: NonNull<u8>, size: usize },
    Heap(Box<[u8]>),
}

/// Zero-initialized, lazily allocated byte buffer.
pub struct RamBuffer {
    storage: Storage,
}

impl RamBuffer {
    /// Allocates a zeroed buffer of `size` bytes.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the anonymous mapping cannot be created.
    pub fn new(size: usize) -> io::Result<Self> {
        if size == 0 {
            return Ok(Self::heap(0));
        }
        Self::allocate(size)
    }

    fn heap(size: usize) -> Self {
        Self {
            storage: Storage::Heap(vec![0; size].into_boxed_slice()),
        }
    }

    #[cfg(not(unix))]
    fn allocate(size: usize) -> io::Result<Self> {
        Ok(Self::heap(size))
    }

    #[cfg(unix)]
    fn allocate(size: usize) -> io::Result<Self> {
        // SAFETY: a private anonymous mapping with no fixed address and no file descriptor
        // has no preconditions; failure is reported through MAP_FAILED.
        let raw = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                size,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        if raw == libc::MAP_FAILED {
            return Err(io::Error::last_os_error());
        }
        let ptr = NonNull::new(raw.cast::<u8>())
            .ok_or_else(|| io::Error::other("mmap returned a null mapping"))?;
        Ok(Self {
            storage: Storage::Mapped { ptr, size },
        })
    }

    /// Returns the size of the buffer in bytes.
    pub fn len(&self) -> usize {
        match &self.storage {
            #[cfg(unix)]
            Storage::Mapped { size, .. } => *size,
            Storage::Heap(bytes) => bytes.len(),
        }
    }

    /// Returns `true` if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the buffer is an `mmap` mapping.
    pub const fn is_mapped(&self) -> bool {
        match &self.storage {
            #[cfg(unix)]
            Storage::Mapped { .. } => true,
            Storage::Heap(_) => false,
        }
    }

    /// Views the whole buffer.
    pub fn as_slice(&self) -> &[u8] {
        match &self.storage {
            // SAFETY: the mapping is `size` bytes, readable, zero-initialized by the kernel,
            // and lives until `drop`; the shared borrow of `self` prevents aliasing writes.
            #[cfg(unix)]
            Storage::Mapped { ptr, size } => unsafe {
                std::slice::from_raw_parts(ptr.as_ptr(), *size)
            },
            Storage::Heap(bytes) => &bytes[..],
        }
    }

    /// Views the whole buffer mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match &mut self.storage {
            // SAFETY: as in `as_slice`; the exclusive borrow of `self` makes this the only
            // live reference into the mapping.
            #[cfg(unix)]
            Storage::Mapped { ptr, size } => unsafe {
                std::slice::from_raw_parts_mut(ptr.as_ptr(), *size)
            },
            Storage::Heap(bytes) => &mut bytes[..],
        }
    }
}

impl Drop for RamBuffer {
    /// Unmaps the buffer when it was created with `mmap`.
    fn drop(&mut self) {
        match self.storage {
            #[cfg(unix)]
            Storage::Mapped { ptr, size } => {
                // SAFETY: `ptr`/`size` describe a mapping created in `allocate` that has not
                // been unmapped; no slice into it can outlive `self`.
                let _ = unsafe { libc::munmap(ptr.as_ptr().cast(), size) };
            }
            Storage::Heap(_) => {}
        }
    }
}

impl fmt::Debug for RamBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RamBuffer")
            .field("len", &self.len())
            .field("mapped", &self.is_mapped())
            .finish()
    }
}
