//! In-process harness that drives the protocol core through `Client::dispatch`.

#[macro_use]
pub mod test_error;
pub mod test_client;
pub mod test_mem;
mod tests;
