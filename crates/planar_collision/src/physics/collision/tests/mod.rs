//! Cross-cutting behavior checks for the pair tests

mod fuzz;
