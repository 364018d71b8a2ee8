//! aise library exports for testing

pub mod assistant;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
