use {
    crate::utils::oserror::OsError,
    log::{LevelFilter, Log, Metadata, Record},
    std::{
        cell::RefCell,
        fmt::Arguments,
        io::Write,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering::Relaxed},
        },
        time::SystemTime,
    },
    thiserror::Error,
    uapi::{Fd, OwnedFd},
};

thread_local! {
    static BUFFER: RefCell<Vec<u8>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Could not dup stderr")]
    Dup(#[source] OsError),
    #[error("A logger has already been installed")]
    AlreadyInstalled,
}

pub struct Logger {
    level: AtomicUsize,
    file: OwnedFd,
}

impl Logger {
    /// Installs a process-wide logger that writes to a duplicate of stderr.
    pub fn install_stderr(level: LevelFilter) -> Result<Arc<Self>, LoggerError> {
        let file = match uapi::fcntl_dupfd_cloexec(2, 0) {
            Ok(fd) => fd,
            Err(e) => return Err(LoggerError::Dup(e.into())),
        };
        Self::install(level, file)
    }

    fn install(level: LevelFilter, file: OwnedFd) -> Result<Arc<Self>, LoggerError> {
        let slf = Arc::new(Self {
            level: AtomicUsize::new(level as usize),
            file,
        });
        let res = log::set_boxed_logger(Box::new(LogWrapper {
            logger: slf.clone(),
        }));
        if res.is_err() {
            return Err(LoggerError::AlreadyInstalled);
        }
        log::set_max_level(level);
        Ok(slf)
    }

    pub fn set_level(&self, level: LevelFilter) {
        self.level.store(level as usize, Relaxed);
        log::set_max_level(level);
    }

    pub fn level(&self) -> LevelFilter {
        match self.level.load(Relaxed) {
            0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            4 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

struct LogWrapper {
    logger: Arc<Logger>,
}

impl Log for LogWrapper {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() as usize <= self.logger.level.load(Relaxed)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        BUFFER.with(|buffer| {
            let buffer = &mut *buffer.borrow_mut();
            buffer.clear();
            format_line(
                buffer,
                SystemTime::now(),
                record.level(),
                record.module_path(),
                record.args(),
            );
            let mut fd = Fd::new(self.logger.file.raw());
            let _ = fd.write_all(buffer);
        });
    }

    fn flush(&self) {
        // nothing
    }
}

fn format_line(
    buffer: &mut Vec<u8>,
    now: SystemTime,
    level: log::Level,
    module: Option<&str>,
    args: &Arguments<'_>,
) {
    let now = humantime::format_rfc3339_millis(now);
    let _ = match module {
        Some(mp) => writeln!(buffer, "[{} {:5} {}] {}", now, level, mp, args),
        _ => writeln!(buffer, "[{} {:5}] {}", now, level, args),
    };
}

#[cfg(test)]
mod tests {
    use {super::*, std::time::UNIX_EPOCH};

    #[test]
    fn line_format() {
        let mut buf = vec![];
        format_line(
            &mut buf,
            UNIX_EPOCH,
            log::Level::Warn,
            Some("wlcore::client"),
            &format_args!("x = {}", 1),
        );
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "[1970-01-01T00:00:00.000Z WARN  wlcore::client] x = 1\n"
        );
        let mut buf = vec![];
        format_line(
            &mut buf,
            UNIX_EPOCH,
            log::Level::Error,
            None,
            &format_args!("boom"),
        );
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "[1970-01-01T00:00:00.000Z ERROR] boom\n"
        );
    }
}
