//! # Alert Module
//!
//! Low-battery alert evaluation and dispatch.
//!
//! This module handles:
//! - Deciding whether a reading needs a recharge alert
//! - Emitting one alert per flagged reading to the notifier
//! - Replace-by-id notification semantics

pub mod dispatch;
pub mod evaluator;
pub mod notifier;
