use {
    crate::{it::test_error::TestResult, utils::oserror::OsError},
    std::{cell::Cell, ops::Deref, ptr, rc::Rc},
    uapi::{OwnedFd, c},
};

/// The client side of a shared memory pool.
pub struct TestMem {
    pub fd: Rc<OwnedFd>,
    data: *const Cell<u8>,
    len: usize,
}

impl TestMem {
    /// A memfd that can grow but not shrink, like a well behaved client would create.
    pub fn new(size: usize) -> TestResult<Rc<Self>> {
        let fd = uapi::memfd_create("test_pool", c::MFD_CLOEXEC | c::MFD_ALLOW_SEALING)?;
        uapi::fcntl_add_seals(fd.raw(), c::F_SEAL_SHRINK)?;
        uapi::ftruncate(fd.raw(), size as _)?;
        Self::map(Rc::new(fd), size)
    }

    /// A plain memfd without seals. The server has to guard its accesses.
    pub fn unsealed(size: usize) -> TestResult<Rc<Self>> {
        let fd = uapi::memfd_create("test_pool", c::MFD_CLOEXEC)?;
        uapi::ftruncate(fd.raw(), size as _)?;
        Self::map(Rc::new(fd), size)
    }

    /// Extends the file and returns a mapping of the new size.
    pub fn grow(&self, size: usize) -> TestResult<Rc<Self>> {
        let stat = uapi::fstat(self.fd.raw())?;
        if size as u64 > stat.st_size as u64 {
            uapi::ftruncate(self.fd.raw(), size as _)?;
        }
        Self::map(self.fd.clone(), size)
    }

    /// Writes `bytes` at `offset`. Out of range bytes are discarded.
    pub fn write(&self, offset: usize, bytes: &[u8]) {
        for (cell, b) in self.iter().skip(offset).zip(bytes) {
            cell.set(*b);
        }
    }

    fn map(fd: Rc<OwnedFd>, len: usize) -> TestResult<Rc<Self>> {
        let data = if len == 0 {
            ptr::NonNull::<Cell<u8>>::dangling().as_ptr() as *const Cell<u8>
        } else {
            let res = unsafe {
                c::mmap(
                    ptr::null_mut(),
                    len,
                    c::PROT_READ | c::PROT_WRITE,
                    c::MAP_SHARED,
                    fd.raw(),
                    0,
                )
            };
            if res == c::MAP_FAILED {
                bail!("Could not map memory: {}", OsError::default());
            }
            res as *const Cell<u8>
        };
        Ok(Rc::new(Self { fd, data, len }))
    }
}

impl Deref for TestMem {
    type Target = [Cell<u8>];

    fn deref(&self) -> &Self::Target {
        unsafe { std::slice::from_raw_parts(self.data, self.len) }
    }
}

impl Drop for TestMem {
    fn drop(&mut self) {
        if self.len > 0 {
            unsafe {
                c::munmap(self.data as *mut c::c_void, self.len);
            }
        }
    }
}
