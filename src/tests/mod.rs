//! Internal test modules - whitebox tests with crate access
//!
//! Harness-driven scenarios against the terminal host, plus rendered
//! snapshots of the stack.
