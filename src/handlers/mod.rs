//! Event Handling Module
//!
//! Turns raw terminal events into application intents.
//!
//! # Module Organization
//!
//! - **`keys`**: Keyboard input processing and navigation logic
//!

pub mod keys;
