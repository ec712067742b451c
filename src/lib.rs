//! Shorthand library exports for testing

pub mod core;
pub mod integrations;
pub mod tui;

#[cfg(test)]
pub mod test_support;
