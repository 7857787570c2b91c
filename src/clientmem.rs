use {
    crate::utils::{errorfmt::ErrorFmt, oserror::OsError},
    std::{
        cell::Cell,
        mem::MaybeUninit,
        ptr,
        rc::Rc,
        sync::atomic::{Ordering, compiler_fence},
    },
    thiserror::Error,
    uapi::{OwnedFd, c},
};

#[derive(Debug, Error)]
pub enum ClientMemError {
    #[error("Could not install the sigbus handler")]
    SigactionFailed(#[source] OsError),
    #[error("A SIGBUS occurred while accessing mapped memory")]
    Sigbus,
    #[error("mmap failed")]
    MmapFailed(#[source] OsError),
    #[error("Cannot map an empty region")]
    Empty,
    #[error("The range {offset}..{offset}+{len} is not contained in a mapping of size {size}")]
    OutOfBounds { offset: usize, len: usize, size: usize },
}

impl ClientMemError {
    /// Whether the failure was caused by the system rather than by the client's fd.
    pub fn is_system_exhaustion(&self) -> bool {
        match self {
            ClientMemError::MmapFailed(e) => e.is_exhaustion(),
            ClientMemError::SigactionFailed(_) => true,
            _ => false,
        }
    }
}

/// One shared mapping of a client file descriptor.
///
/// The mapping lives until the last `Rc` is dropped. Every `ClientMemOffset` holds such
/// an `Rc`, so memory handed out to buffers stays mapped at a stable address.
pub struct ClientMem {
    failed: Cell<bool>,
    sigbus_impossible: bool,
    data: *const [Cell<u8>],
}

#[derive(Clone)]
pub struct ClientMemOffset {
    mem: Rc<ClientMem>,
    offset: usize,
    data: *const [Cell<u8>],
}

impl ClientMem {
    pub fn new(fd: &OwnedFd, len: usize) -> Result<Self, ClientMemError> {
        if len == 0 {
            return Err(ClientMemError::Empty);
        }
        let mut sigbus_impossible = false;
        if let Ok(seals) = uapi::fcntl_get_seals(fd.raw()) {
            if seals & c::F_SEAL_SHRINK != 0 {
                if let Ok(stat) = uapi::fstat(fd.raw()) {
                    sigbus_impossible = stat.st_size as u64 >= len as u64;
                }
            }
        }
        let data = unsafe {
            let data = c::mmap(
                ptr::null_mut(),
                len,
                c::PROT_READ | c::PROT_WRITE,
                c::MAP_SHARED,
                fd.raw(),
                0,
            );
            if data == c::MAP_FAILED {
                return Err(ClientMemError::MmapFailed(OsError::default()));
            }
            ptr::slice_from_raw_parts(data as *const Cell<u8>, len)
        };
        Ok(Self {
            failed: Cell::new(false),
            sigbus_impossible,
            data,
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether accesses are known not to fault, i.e. the fd is a memfd that cannot shrink.
    pub fn is_sealed_memfd(&self) -> bool {
        self.sigbus_impossible
    }

    pub fn offset(
        self: &Rc<Self>,
        offset: usize,
        len: usize,
    ) -> Result<ClientMemOffset, ClientMemError> {
        let size = self.len();
        let end = match offset.checked_add(len) {
            Some(end) if end <= size => end,
            _ => return Err(ClientMemError::OutOfBounds { offset, len, size }),
        };
        let mem = unsafe { &*self.data };
        Ok(ClientMemOffset {
            mem: self.clone(),
            offset,
            data: &mem[offset..end],
        })
    }
}

impl ClientMemOffset {
    pub fn pool(&self) -> &Rc<ClientMem> {
        &self.mem
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ptr(&self) -> *const u8 {
        self.data as *const u8
    }

    /// Runs `f` on the memory. If the client truncated the file in the meantime, the
    /// faulting pages read as zeros and `Sigbus` is returned instead of the result.
    pub fn access<T, F: FnOnce(&[Cell<u8>]) -> T>(&self, f: F) -> Result<T, ClientMemError> {
        unsafe {
            if self.mem.sigbus_impossible {
                return Ok(f(&*self.data));
            }
            let mref = MemRef {
                mem: &*self.mem,
                outer: MEM.with(|m| m.get()),
            };
            MEM.with(|m| m.set(&mref));
            compiler_fence(Ordering::SeqCst);
            let res = f(&*self.data);
            MEM.with(|m| m.set(mref.outer));
            compiler_fence(Ordering::SeqCst);
            match self.mem.failed.get() {
                true => Err(ClientMemError::Sigbus),
                _ => Ok(res),
            }
        }
    }

    pub fn read(&self) -> Result<Vec<u8>, ClientMemError> {
        self.access(|mem| mem.iter().map(|b| b.get()).collect())
    }
}

impl Drop for ClientMem {
    fn drop(&mut self) {
        let res = unsafe { c::munmap(self.data as *const Cell<u8> as *mut c::c_void, self.len()) };
        if let Err(e) = uapi::map_err!(res) {
            log::error!(
                "Could not unmap client memory: {}",
                ErrorFmt(OsError::from(e))
            );
        }
    }
}

struct MemRef {
    mem: *const ClientMem,
    outer: *const MemRef,
}

thread_local! {
    static MEM: Cell<*const MemRef> = const { Cell::new(ptr::null()) };
}

unsafe fn kill() -> ! {
    unsafe {
        c::signal(c::SIGBUS, c::SIG_DFL);
        c::raise(c::SIGBUS);
    }
    std::process::abort();
}

unsafe extern "C" fn sigbus(sig: i32, info: &c::siginfo_t, _ucontext: *mut c::c_void) {
    unsafe {
        if sig != c::SIGBUS {
            kill();
        }
        let mut memr_ptr = MEM.with(|m| m.get());
        while !memr_ptr.is_null() {
            let memr = &*memr_ptr;
            let mem = &*memr.mem;
            let lo = mem.data as *const u8 as usize;
            let hi = lo + mem.len();
            let fault_addr = info.si_addr() as usize;
            if fault_addr < lo || fault_addr >= hi {
                memr_ptr = memr.outer;
                continue;
            }
            let res = c::mmap(
                lo as _,
                hi - lo,
                c::PROT_WRITE | c::PROT_READ,
                c::MAP_ANONYMOUS | c::MAP_PRIVATE | c::MAP_FIXED,
                -1,
                0,
            );
            if res == c::MAP_FAILED {
                kill();
            }
            mem.failed.set(true);
            return;
        }
        kill();
    }
}

/// Installs the SIGBUS handler that protects accesses to unsealed client memory.
pub fn init() -> Result<(), ClientMemError> {
    unsafe {
        let mut action: c::sigaction = MaybeUninit::zeroed().assume_init();
        action.sa_sigaction =
            sigbus as unsafe extern "C" fn(i32, &c::siginfo_t, *mut c::c_void) as _;
        action.sa_flags = c::SA_NODEFER | c::SA_SIGINFO;
        let res = c::sigaction(c::SIGBUS, &action, ptr::null_mut());
        match uapi::map_err!(res) {
            Ok(_) => Ok(()),
            Err(e) => Err(ClientMemError::SigactionFailed(e.into())),
        }
    }
}
