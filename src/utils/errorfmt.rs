use std::{
    error::Error,
    fmt::{Display, Formatter},
    iter,
};

/// Displays an error followed by its sources, separated by `: `.
pub struct ErrorFmt<E>(pub E);

impl<E: Error> Display for ErrorFmt<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let chain = iter::successors(Some(&self.0 as &dyn Error), |&e| e.source());
        for (i, e) in chain.enumerate() {
            if i > 0 {
                f.write_str(": ")?;
            }
            write!(f, "{}", e)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, thiserror::Error};

    #[derive(Debug, Error)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, Error)]
    #[error("inner")]
    struct Inner;

    #[test]
    fn source_chain() {
        assert_eq!(ErrorFmt(Outer(Inner)).to_string(), "outer: inner");
        assert_eq!(ErrorFmt(Inner).to_string(), "inner");
    }
}
