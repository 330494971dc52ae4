//! Streaming output

pub mod printer;
