pub mod commands;
pub mod domain;
pub mod error;
pub mod infrastructure;

#[cfg(test)]
mod test_support;
