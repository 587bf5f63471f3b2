//! httpfromtcp - HTTP/1.1 straight from a TCP stream
//!
//! Incremental request parsing and response writing on raw bytes, plus a
//! small server that drives them.

pub mod config;
pub mod handler;
pub mod http;
pub mod server;
