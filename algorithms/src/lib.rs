#![allow(clippy::comparison_chain, clippy::needless_lifetimes)]

pub mod rect;
mod windows;
