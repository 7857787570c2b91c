#![allow(
    clippy::len_zero,
    clippy::new_without_default,
    clippy::too_many_arguments,
    clippy::type_complexity
)]

#[macro_use]
mod macros;
#[cfg(test)]
#[macro_use]
mod it;

pub mod affine;
pub mod client;
pub mod clientmem;
pub mod config;
pub mod format;
pub mod ifs;
pub mod logger;
pub mod object;
pub mod rect;
pub mod state;
pub mod transform;
pub mod utils;
pub mod wire;
