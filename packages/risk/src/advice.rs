//! Health assistant advice: recommended zones, prevention tips, the
//! `RespiroScore`, and regional disease probabilities.

use air_vision_air_quality_models::{AqiSnapshot, PollutantConcentrations, WHO_LIMITS};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Respiratory conditions offered by the assistant's first step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum Condition {
    /// Asthma
    Asthma,
    /// Chronic bronchitis
    #[serde(rename = "Chronic bronchitis")]
    #[strum(serialize = "Chronic bronchitis")]
    ChronicBronchitis,
    /// Chronic obstructive pulmonary disease
    #[serde(rename = "COPD")]
    #[strum(serialize = "COPD")]
    Copd,
    /// Pneumonia
    Pneumonia,
    /// Anything else, described by the user
    #[serde(rename = "Other (specify)")]
    #[strum(serialize = "Other (specify)")]
    Other,
}

impl Condition {
    /// Returns all variants of this enum, in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Asthma,
            Self::ChronicBronchitis,
            Self::Copd,
            Self::Pneumonia,
            Self::Other,
        ]
    }

    /// The condition-specific tip appended to the base tips, if any.
    #[must_use]
    pub const fn specific_tip(self) -> Option<&'static str> {
        match self {
            Self::Asthma => Some(
                "Keep your rescue inhaler on hand and follow the action plan approved by your pulmonologist.",
            ),
            Self::Copd => Some("Use a HEPA air purifier and perform guided breathing exercises."),
            Self::Pneumonia => {
                Some("Monitor your temperature and avoid environments with humidity > 80%.")
            }
            Self::ChronicBronchitis | Self::Other => None,
        }
    }
}

/// Suggested innovations shown alongside the final tips.
pub const INNOVATIONS: [&str; 3] = [
    "Connected respiratory wearable: set alerts when NO₂ exceeds 20 µg/m³ (WHO AQG 2021).",
    "24h AI forecasts combining NASA TEMPO + Open-Meteo winds to plan outings in the cleanest air.",
    "Educational AR overlay: visualize live PM2.5 to avoid nearby micro-polluted zones.",
];

/// Maximum number of tips returned by [`prevention_plan`].
pub const MAX_TIPS: usize = 5;

/// Wind speed (m/s) from which pollutants are considered dispersed.
const DISPERSING_WIND_MS: f64 = 3.0;

/// Recommended low-exposure zones around `label`.
#[must_use]
pub fn adapted_zones(snapshot: &AqiSnapshot, label: &str) -> Vec<String> {
    let breeze = if snapshot.wind_speed >= DISPERSING_WIND_MS {
        "moderate winds disperse pollutants"
    } else {
        "light winds: prefer wooded areas"
    };
    let park_aqi = snapshot.aqi.saturating_sub(30).max(20);

    vec![
        format!(
            "{label} - Tree-lined urban park: estimated AQI {park_aqi} (OpenAQ < {} µg/m³).",
            WHO_LIMITS.pm25
        ),
        format!("Coast within 30 km: marine influence reducing PM2.5 ({breeze})."),
        "Nature reserve recommended by NASA MODIS: PM2.5 < 5 µg/m³, ideal for asthma/COPD."
            .to_string(),
        "Morning walk (before 9am): per AI with Open-Meteo winds, NO₂ reduced by 18% vs. afternoon."
            .to_string(),
    ]
}

/// Tips plus a 0-100 score for the final assistant step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreventionPlan {
    /// At most [`MAX_TIPS`] tips.
    pub tips: Vec<String>,
    /// The `RespiroScore`.
    pub score: u8,
}

/// Builds the personalised tips and score for a condition.
///
/// Condition-specific tips are appended after the five base tips and so
/// are cut by the [`MAX_TIPS`] truncation.
#[must_use]
pub fn prevention_plan(condition: Option<Condition>, snapshot: &AqiSnapshot) -> PreventionPlan {
    let mut tips = vec![
        "Stay hydrated and keep indoor humidity around 40-50% (WHO).".to_string(),
        format!("Limit exertion outdoors when AQI exceeds {}.", snapshot.aqi),
        "Use a certified FFP2/N95 mask during peaks > 100 AQI.".to_string(),
        "Ventilate early in the morning and monitor the OpenAQ app for local alerts.".to_string(),
        "Log symptoms in a wearable app to adapt treatments.".to_string(),
    ];

    if let Some(tip) = condition.and_then(Condition::specific_tip) {
        tips.push(tip.to_string());
    }
    tips.truncate(MAX_TIPS);

    PreventionPlan {
        tips,
        score: respiro_score(&snapshot.concentrations()),
    }
}

/// `100 - 30 * Σ ratio`, clamped to `0..=100`; non-finite input scores 0.
#[must_use]
pub fn respiro_score(concentrations: &PollutantConcentrations) -> u8 {
    let penalty: f64 = WHO_LIMITS
        .ratios(concentrations)
        .iter()
        .map(|ratio| ratio * 30.0)
        .sum();
    clamped_percent(100.0 - penalty, 100.0)
}

/// Linear disease-probability estimates (percent) for a regional average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseProbabilities {
    /// `min(90, round(aqi * 0.45))`
    pub asthma: u8,
    /// `min(80, round(pm25 * 4))`
    pub chronic_bronchitis: u8,
    /// `min(70, round(no2 * 2.2))`
    pub copd: u8,
    /// `min(60, round(o3 * 1.1))`
    pub pneumonia: u8,
}

impl DiseaseProbabilities {
    /// Derives the estimates from an averaged snapshot.
    #[must_use]
    pub fn from_averages(aqi: u16, averages: &PollutantConcentrations) -> Self {
        Self {
            asthma: clamped_percent(f64::from(aqi) * 0.45, 90.0),
            chronic_bronchitis: clamped_percent(averages.pm25 * 4.0, 80.0),
            copd: clamped_percent(averages.no2 * 2.2, 70.0),
            pneumonia: clamped_percent(averages.o3 * 1.1, 60.0),
        }
    }

    /// One display line per condition.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Asthma: {}% (High NO₂ + PM2.5).", self.asthma),
            format!(
                "Chronic bronchitis: {}% (based on WHO data).",
                self.chronic_bronchitis
            ),
            format!("COPD: {}%.", self.copd),
            format!("Pneumonia: {}%.", self.pneumonia),
        ]
    }
}

fn clamped_percent(value: f64, cap: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = value.round().clamp(0.0, cap) as u8;
    percent
}
