//! # Feed Module
//!
//! Fetching and parsing of the remote sensor feed.
//!
//! This module handles:
//! - Fetching the JSON feed document over HTTP
//! - Joining the document's `readings` and `sensors` sections on key
//! - Normalizing each entry into a [`reading::SensorReading`]

pub mod client;
pub mod parser;
pub mod reading;
