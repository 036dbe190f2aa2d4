//! Application command handlers, one use case per file.

pub mod auth;
pub mod subscription;

#[cfg(test)]
pub mod test_support;
