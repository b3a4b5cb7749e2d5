//! The health assistant questionnaire.
//!
//! A linear four-step flow:
//!
//! 1. [`WizardStep::SelectCondition`]
//! 2. [`WizardStep::EnterLocation`]
//! 3. [`WizardStep::RecommendedZones`]
//! 4. [`WizardStep::Tips`]
//!
//! There are no backward transitions; [`HealthWizard::reopen`] returns to
//! step 1. Location lookups are split into request, resolve and apply so
//! a caller can run several concurrently; only the latest one is applied.
//! The assistant classifies with
//! [`TieringPolicy::ByFraction`](air_vision_air_quality_models::TieringPolicy::ByFraction).

use air_vision_air_quality_models::{AqiSnapshot, Locale, RiskNarrative, TieringPolicy};
use air_vision_live::fetcher::{FetchOutcome, SnapshotFetcher, SnapshotOrigin};
use air_vision_live::transport::JsonTransport;
use air_vision_locate::{LocationError, parse_coordinates};
use air_vision_locate_models::Coordinates;
use air_vision_risk::advice::{self, Condition, INNOVATIONS, PreventionPlan};
use air_vision_risk::narrative::assessment_line;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

use crate::generation::{RequestGeneration, Ticket};
use crate::notify::{Notice, Notifications};

/// Maximum number of zones shown on step 3.
const MAX_ZONES: usize = 5;

/// Errors from invalid wizard actions. The wizard state is unchanged when
/// one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// The action belongs to another step.
    #[error("Not available at step {actual}, expected step {expected}")]
    WrongStep {
        /// The step the action requires.
        expected: WizardStep,
        /// The current step.
        actual: WizardStep,
    },

    /// The selected condition is not one of [`Condition::all`].
    #[error("Unknown condition: {0}")]
    UnknownCondition(String),

    /// The location inputs could not be resolved.
    #[error(transparent)]
    Location(#[from] LocationError),

    /// Tips were requested before any location data arrived.
    #[error("No air quality data yet, submit a location first")]
    MissingSnapshot,
}

/// Questionnaire steps, in order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display,
    AsRefStr,
)]
pub enum WizardStep {
    #[default]
    SelectCondition,
    EnterLocation,
    RecommendedZones,
    Tips,
}

impl WizardStep {
    /// The 1-based step number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::SelectCondition => 1,
            Self::EnterLocation => 2,
            Self::RecommendedZones => 3,
            Self::Tips => 4,
        }
    }
}

/// A parsed location waiting to be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRequest {
    ticket: Ticket,
    pub coordinates: Coordinates,
}

/// A resolved location waiting to be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationResult {
    ticket: Ticket,
    pub coordinates: Coordinates,
    pub outcome: FetchOutcome,
    pub narrative: RiskNarrative,
    pub zones: Vec<String>,
}

/// Fetches the snapshot for `request` and derives the step 3 content.
///
/// Never fails: provider failures surface as
/// [`SnapshotOrigin::Degraded`] in the result.
pub async fn resolve_location<T: JsonTransport>(
    request: LocationRequest,
    fetcher: &SnapshotFetcher<T>,
    live_data: bool,
    locale: Locale,
) -> LocationResult {
    let LocationRequest {
        ticket,
        coordinates,
    } = request;

    let outcome = fetcher
        .fetch(coordinates.lat, coordinates.lon, live_data)
        .await;
    let narrative = air_vision_risk::build_risk_narrative(
        &outcome.snapshot,
        TieringPolicy::ByFraction,
        locale,
    );
    let mut zones = advice::adapted_zones(&outcome.snapshot, &coordinates.label);
    zones.truncate(MAX_ZONES);

    LocationResult {
        ticket,
        coordinates,
        outcome,
        narrative,
        zones,
    }
}

/// Questionnaire state.
#[derive(Debug, Default)]
pub struct HealthWizard {
    step: WizardStep,
    locale: Locale,
    condition: Option<Condition>,
    location: Option<Coordinates>,
    outcome: Option<FetchOutcome>,
    narrative: Option<RiskNarrative>,
    zones: Vec<String>,
    plan: Option<PreventionPlan>,
    generation: RequestGeneration,
}

impl HealthWizard {
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    /// Returns to step 1 and discards in-flight lookups.
    ///
    /// The last resolved location is kept as the fallback for the next
    /// submission.
    pub fn reopen(&mut self) {
        self.generation.invalidate();
        self.step = WizardStep::SelectCondition;
        self.condition = None;
        self.outcome = None;
        self.narrative = None;
        self.zones.clear();
        self.plan = None;
    }

    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub const fn condition(&self) -> Option<Condition> {
        self.condition
    }

    /// The last resolved location.
    #[must_use]
    pub const fn location(&self) -> Option<&Coordinates> {
        self.location.as_ref()
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&AqiSnapshot> {
        self.outcome.as_ref().map(|o| &o.snapshot)
    }

    #[must_use]
    pub fn origin(&self) -> Option<SnapshotOrigin> {
        self.outcome.as_ref().map(|o| o.origin)
    }

    #[must_use]
    pub const fn narrative(&self) -> Option<&RiskNarrative> {
        self.narrative.as_ref()
    }

    /// The one-line risk assessment, e.g. `Moderate : …`.
    #[must_use]
    pub fn assessment(&self) -> Option<String> {
        self.narrative.as_ref().map(assessment_line)
    }

    #[must_use]
    pub fn zones(&self) -> &[String] {
        &self.zones
    }

    #[must_use]
    pub const fn plan(&self) -> Option<&PreventionPlan> {
        self.plan.as_ref()
    }

    /// The score as shown to the user, e.g. `72/100`.
    #[must_use]
    pub fn respiro_score_label(&self) -> Option<String> {
        self.plan.as_ref().map(|p| format!("{}/100", p.score))
    }

    #[must_use]
    pub const fn innovations(&self) -> &'static [&'static str] {
        &INNOVATIONS
    }

    /// Step 1: records the condition and moves to step 2.
    ///
    /// # Errors
    ///
    /// * [`WizardError::WrongStep`] outside step 1
    /// * [`WizardError::UnknownCondition`] if `value` names no condition
    pub fn select_condition(
        &mut self,
        value: &str,
        notes: &Notifications<'_>,
    ) -> Result<Condition, WizardError> {
        self.expect_step(WizardStep::SelectCondition)?;

        let Ok(condition) = value.parse::<Condition>() else {
            notes.send(Notice::InvalidCondition);
            return Err(WizardError::UnknownCondition(value.to_string()));
        };

        log::debug!("Assistant condition: {condition}");
        self.condition = Some(condition);
        self.step = WizardStep::EnterLocation;
        Ok(condition)
    }

    /// Step 2: parses the location inputs and issues a request ticket.
    ///
    /// # Errors
    ///
    /// * [`WizardError::WrongStep`] outside step 2
    /// * [`WizardError::Location`] if the inputs do not resolve
    pub fn request_location(
        &self,
        city: &str,
        lat_lon: &str,
        notes: &Notifications<'_>,
    ) -> Result<LocationRequest, WizardError> {
        self.expect_step(WizardStep::EnterLocation)?;

        let coordinates = parse_coordinates(city, lat_lon, self.location.as_ref())
            .inspect_err(|_| notes.send(Notice::InvalidLocation))?;

        Ok(LocationRequest {
            ticket: self.generation.next(),
            coordinates,
        })
    }

    /// Applies a resolved location if it is still the latest request.
    ///
    /// Returns whether the result was applied. Stale results are dropped.
    pub fn apply_location(&mut self, result: LocationResult, notes: &Notifications<'_>) -> bool {
        if !self.generation.is_current(result.ticket) {
            log::debug!(
                "Discarding stale location result for {}",
                result.coordinates.label
            );
            return false;
        }

        if result.outcome.origin == SnapshotOrigin::Degraded {
            notes.send(Notice::DegradedData);
        } else {
            notes.send(Notice::LocationResolved);
        }

        log::info!(
            "Assistant location {} resolved: aqi={} ({})",
            result.coordinates.label,
            result.outcome.snapshot.aqi,
            result.outcome.origin
        );

        self.location = Some(result.coordinates);
        self.outcome = Some(result.outcome);
        self.narrative = Some(result.narrative);
        self.zones = result.zones;
        self.step = WizardStep::RecommendedZones;
        true
    }

    /// Step 2 in one call: request, resolve and apply.
    ///
    /// # Errors
    ///
    /// See [`HealthWizard::request_location`].
    pub async fn submit_location<T: JsonTransport>(
        &mut self,
        city: &str,
        lat_lon: &str,
        fetcher: &SnapshotFetcher<T>,
        live_data: bool,
        notes: &Notifications<'_>,
    ) -> Result<bool, WizardError> {
        let request = self.request_location(city, lat_lon, notes)?;
        let result = resolve_location(request, fetcher, live_data, self.locale).await;
        Ok(self.apply_location(result, notes))
    }

    /// Step 3: builds the prevention plan and moves to step 4.
    ///
    /// # Errors
    ///
    /// * [`WizardError::WrongStep`] outside step 3
    /// * [`WizardError::MissingSnapshot`] if no location data is present
    pub fn show_tips(&mut self, notes: &Notifications<'_>) -> Result<&PreventionPlan, WizardError> {
        self.expect_step(WizardStep::RecommendedZones)?;

        let Some(snapshot) = self.outcome.as_ref().map(|o| o.snapshot) else {
            notes.send(Notice::MissingLocation);
            return Err(WizardError::MissingSnapshot);
        };

        self.step = WizardStep::Tips;
        Ok(self
            .plan
            .insert(advice::prevention_plan(self.condition, &snapshot)))
    }

    fn expect_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }
}
