//! HTTP API: one route per store query/mutation.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
