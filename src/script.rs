//! The smoke-test script fed to the engine under test.

/// JavaScript source. Under a conformant engine its `console.log` output is
/// exactly [`crate::oracle::transcript`].
pub const SCRIPT: &str = include_str!("../demos/demo.js");
