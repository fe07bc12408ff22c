//! JSON runtime configuration for the demo binary.
pub mod detect;
