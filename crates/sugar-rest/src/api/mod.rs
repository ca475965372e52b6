//! Domain operations of [`SugarClient`](crate::SugarClient).
//!
//! Each submodule adds an `impl SugarClient` block; every method builds one
//! [`Request`](crate::Request) and hands it to the executor.

mod endpoints;
mod files;
mod records;
mod relationships;
