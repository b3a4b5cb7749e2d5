//! Risk narrative builder.

use air_vision_air_quality_models::{
    AqiSnapshot, Locale, RiskNarrative, TieringPolicy, WHO_LIMITS,
};

use crate::{locale, tiering};

/// Classifies `snapshot` under `policy` and renders its narrative.
#[must_use]
pub fn build_risk_narrative(
    snapshot: &AqiSnapshot,
    policy: TieringPolicy,
    locale: Locale,
) -> RiskNarrative {
    let tier = tiering::classify(policy, snapshot);
    log::debug!(
        "Classified aqi={} as {tier} under {policy} ({locale})",
        snapshot.aqi
    );

    RiskNarrative {
        tier,
        label: locale::tier_label(locale, tier).to_string(),
        summary: locale::summary(
            locale,
            policy,
            tier,
            &snapshot.concentrations(),
            &WHO_LIMITS,
        ),
        vulnerable_profiles: locale::vulnerable_profiles(locale, policy, tier).to_string(),
    }
}

/// Formats the one-line assessment shown by the assistant, e.g.
/// `"Moderate : Moderate: NO₂ …"`.
#[must_use]
pub fn assessment_line(narrative: &RiskNarrative) -> String {
    format!("{} : {}", narrative.label, narrative.summary)
}
