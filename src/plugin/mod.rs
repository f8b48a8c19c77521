//! Host-facing plugin surface: the stdio protocol and its server loop.

pub mod protocol;
pub mod server;

pub use protocol::{Reply, Request};
pub use server::{dispatch, serve};
