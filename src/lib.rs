//! # Sensor Board Library
//!
//! Watch a remote sensor feed, render a reading grid and raise low-battery
//! alerts.
//!
//! This library provides the core pipeline: fetching the JSON feed,
//! normalizing it into sensor readings, rendering them as a grid and
//! dispatching an alert for every sensor whose battery runs low.

pub mod alert;
pub mod config;
pub mod error;
pub mod feed;
pub mod pipeline;
pub mod presenter;
