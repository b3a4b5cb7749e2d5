#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Risk derivation for air vision.
//!
//! Turns pollutant concentrations into a composite index and a tiered,
//! localised narrative:
//!
//! 1. [`aqi`] reduces a concentration triple to a single 0-300 index driven
//!    by the worst pollutant-to-WHO-limit ratio.
//! 2. [`tiering`] classifies a snapshot into one of three tiers under an
//!    explicit [`TieringPolicy`](air_vision_air_quality_models::TieringPolicy).
//! 3. [`narrative`] renders the tier through the [`locale`] phrasebook.
//! 4. [`advice`] derives the health assistant's zones, tips and scores.
//!
//! Everything here is pure. Numeric degeneracy is coerced to zero rather
//! than surfaced as an error.

pub mod advice;
pub mod aqi;
pub mod locale;
pub mod narrative;
pub mod tiering;

pub use aqi::{compute_aqi, snapshot_from};
pub use narrative::build_risk_narrative;
pub use tiering::classify;
