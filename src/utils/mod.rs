//! Small shared utilities.

pub mod token;
