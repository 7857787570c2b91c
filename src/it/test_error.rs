use {
    crate::utils::errorfmt::ErrorFmt,
    std::{
        error::Error,
        fmt::{Debug, Display, Formatter},
    },
};

pub type TestResult<T = ()> = Result<T, TestError>;

/// An error with a chain of context messages, printed outermost first.
pub struct TestError {
    msg: String,
    source: Option<Box<dyn Error + 'static>>,
}

impl TestError {
    pub fn new(msg: impl Display) -> Self {
        Self {
            msg: msg.to_string(),
            source: None,
        }
    }
}

impl Debug for TestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for TestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.msg.is_empty(), &self.source) {
            (_, None) => f.write_str(&self.msg),
            (true, Some(source)) => ErrorFmt(&**source).fmt(f),
            (false, Some(source)) => write!(f, "{}: {}", self.msg, ErrorFmt(&**source)),
        }
    }
}

impl<T: Error + 'static> From<T> for TestError {
    fn from(error: T) -> Self {
        Self {
            msg: String::new(),
            source: Some(Box::new(error)),
        }
    }
}

pub trait TestErrorExt<T> {
    fn with_context<D: Display>(self, f: impl FnOnce() -> D) -> TestResult<T>;
}

impl<T, E: Error + 'static> TestErrorExt<T> for Result<T, E> {
    fn with_context<D: Display>(self, f: impl FnOnce() -> D) -> TestResult<T> {
        self.map_err(|e| TestError {
            msg: f().to_string(),
            source: Some(Box::new(e)),
        })
    }
}

macro_rules! bail {
    ($($tt:tt)*) => {{
        let msg = format!($($tt)*);
        return Err(crate::it::test_error::TestError::new(msg));
    }}
}

macro_rules! tassert_eq {
    ($left:expr, $right:expr) => {{
        let left = $left;
        let right = $right;
        if left != right {
            bail!(
                "{}: {:?} != {:?}",
                stringify!($left == $right),
                left,
                right
            );
        }
    }};
}
