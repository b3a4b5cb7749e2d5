#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! The health assistant and the process-wide settings it depends on.
//!
//! - [`settings`]: the persisted [`Settings`](settings::Settings) record
//!   and its single update entry point.
//! - [`wizard`]: the four-step questionnaire (condition, location, zones,
//!   tips).
//! - [`generation`]: request tokens so only the latest location lookup is
//!   applied.
//! - [`notify`]: user notifications, gated by the settings flag.

pub mod generation;
pub mod notify;
pub mod settings;
pub mod wizard;
