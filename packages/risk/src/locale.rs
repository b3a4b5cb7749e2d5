//! Locale phrasebook for risk narratives.
//!
//! The risk computations are locale independent; only the copy below
//! varies. Each tiering policy keeps its own wording because the two call
//! sites (globe clicks and the health assistant) present different detail.

use air_vision_air_quality_models::{
    Locale, PollutantConcentrations, RiskTier, TieringPolicy, WhoLimits,
};

/// Sources credited in narrative text and insight records.
pub const DATA_SOURCES: &[&str] = &["NASA TEMPO", "OpenAQ", "Open-Meteo"];

/// Returns the display label for a tier.
#[must_use]
pub const fn tier_label(locale: Locale, tier: RiskTier) -> &'static str {
    match (locale, tier) {
        (Locale::En, RiskTier::Good) => "Good",
        (Locale::En, RiskTier::Moderate) => "Moderate",
        (Locale::En, RiskTier::HighRisk) => "High risk",
        (Locale::Fr, RiskTier::Good) => "Bon",
        (Locale::Fr, RiskTier::Moderate) => "Modéré",
        (Locale::Fr, RiskTier::HighRisk) => "Risque élevé",
    }
}

/// Renders the narrative summary for a tier.
#[must_use]
pub fn summary(
    locale: Locale,
    policy: TieringPolicy,
    tier: RiskTier,
    c: &PollutantConcentrations,
    limits: &WhoLimits,
) -> String {
    match policy {
        TieringPolicy::ByAqi => aqi_summary(locale, tier, c, limits),
        TieringPolicy::ByFraction => fraction_summary(locale, tier, c, limits),
    }
}

fn aqi_summary(
    locale: Locale,
    tier: RiskTier,
    c: &PollutantConcentrations,
    limits: &WhoLimits,
) -> String {
    let (no2, pm25, o3) = (c.no2, c.pm25, c.o3);
    match (locale, tier) {
        (Locale::En, RiskTier::HighRisk) => format!(
            "High risk: NO₂ {no2:.1} µg/m³ (> {}), PM2.5 {pm25:.1} µg/m³ (> {}), \
             O₃ {o3:.1} µg/m³ (> {}). Reduce all outdoor activity (WHO AQG 2021).",
            limits.no2, limits.pm25, limits.o3
        ),
        (Locale::En, RiskTier::Moderate) => format!(
            "Moderate: partial compliance with WHO thresholds (NO₂ {no2:.1} µg/m³, \
             PM2.5 {pm25:.1} µg/m³, O₃ {o3:.1} µg/m³). Monitor fluctuations from \
             NASA TEMPO and OpenAQ."
        ),
        (Locale::En, RiskTier::Good) => format!(
            "Good: levels below WHO AQG 2021 (NO₂ {no2:.1} µg/m³, PM2.5 {pm25:.1} µg/m³, \
             O₃ {o3:.1} µg/m³)."
        ),
        (Locale::Fr, RiskTier::HighRisk) => format!(
            "Risque élevé : NO₂ {no2:.1} µg/m³ (> {}), PM2.5 {pm25:.1} µg/m³ (> {}), \
             O₃ {o3:.1} µg/m³ (> {}). Réduisez toute activité extérieure (OMS AQG 2021).",
            limits.no2, limits.pm25, limits.o3
        ),
        (Locale::Fr, RiskTier::Moderate) => format!(
            "Modéré : respect partiel des seuils OMS (NO₂ {no2:.1} µg/m³, \
             PM2.5 {pm25:.1} µg/m³, O₃ {o3:.1} µg/m³). Surveillez les variations \
             NASA TEMPO et OpenAQ."
        ),
        (Locale::Fr, RiskTier::Good) => format!(
            "Bon : niveaux sous les seuils OMS AQG 2021 (NO₂ {no2:.1} µg/m³, \
             PM2.5 {pm25:.1} µg/m³, O₃ {o3:.1} µg/m³)."
        ),
    }
}

fn fraction_summary(
    locale: Locale,
    tier: RiskTier,
    c: &PollutantConcentrations,
    limits: &WhoLimits,
) -> String {
    let comments = match locale {
        Locale::En => format!(
            "NO₂ {:.1} µg/m³ (WHO 24h < {} µg/m³), PM2.5 {:.1} µg/m³ (WHO 24h < {} µg/m³), \
             O₃ {:.1} µg/m³ (WHO seasonal peak < {} µg/m³)",
            c.no2, limits.no2, c.pm25, limits.pm25, c.o3, limits.o3
        ),
        Locale::Fr => format!(
            "NO₂ {:.1} µg/m³ (OMS 24h < {} µg/m³), PM2.5 {:.1} µg/m³ (OMS 24h < {} µg/m³), \
             O₃ {:.1} µg/m³ (pic saisonnier OMS < {} µg/m³)",
            c.no2, limits.no2, c.pm25, limits.pm25, c.o3, limits.o3
        ),
    };

    match (locale, tier) {
        (Locale::En, RiskTier::HighRisk) => format!(
            "High risk: {comments}. NASA TEMPO + OpenAQ indicate high exposure; \
             stay indoors if possible."
        ),
        (Locale::En, RiskTier::Moderate) => format!(
            "Moderate: {comments}. Plan breaks and hydration; monitor wind \
             fluctuations (Open-Meteo)."
        ),
        (Locale::En, RiskTier::Good) => format!(
            "Good: {comments}. WHO AQG 2021 thresholds respected (confirmed by TEMPO/WHO)."
        ),
        (Locale::Fr, RiskTier::HighRisk) => format!(
            "Risque élevé : {comments}. NASA TEMPO + OpenAQ indiquent une forte \
             exposition ; restez à l'intérieur si possible."
        ),
        (Locale::Fr, RiskTier::Moderate) => format!(
            "Modéré : {comments}. Prévoyez des pauses et hydratez-vous ; surveillez \
             les variations du vent (Open-Meteo)."
        ),
        (Locale::Fr, RiskTier::Good) => format!(
            "Bon : {comments}. Seuils OMS AQG 2021 respectés (confirmé par TEMPO/OMS)."
        ),
    }
}

/// Guidance for vulnerable populations at a tier.
#[must_use]
pub const fn vulnerable_profiles(
    locale: Locale,
    policy: TieringPolicy,
    tier: RiskTier,
) -> &'static str {
    match (locale, policy, tier) {
        (Locale::En, TieringPolicy::ByAqi, RiskTier::HighRisk) => {
            "Children, asthmatics, COPD: stay indoors; HEPA purifier recommended."
        }
        (Locale::En, TieringPolicy::ByFraction, RiskTier::HighRisk) => {
            "Children, asthmatics, COPD: prefer indoors and HEPA purifier."
        }
        (Locale::En, _, RiskTier::Moderate) => {
            "Pregnant women, seniors, people with asthma: limit outdoor exertion."
        }
        (Locale::En, TieringPolicy::ByAqi, RiskTier::Good) => {
            "General population: favorable conditions; maintain regular monitoring."
        }
        (Locale::En, TieringPolicy::ByFraction, RiskTier::Good) => {
            "General population: favorable conditions; stay attentive to local alerts."
        }
        (Locale::Fr, TieringPolicy::ByAqi, RiskTier::HighRisk) => {
            "Enfants, asthmatiques, BPCO : restez à l'intérieur ; purificateur HEPA recommandé."
        }
        (Locale::Fr, TieringPolicy::ByFraction, RiskTier::HighRisk) => {
            "Enfants, asthmatiques, BPCO : privilégiez l'intérieur et un purificateur HEPA."
        }
        (Locale::Fr, _, RiskTier::Moderate) => {
            "Femmes enceintes, aînés, personnes asthmatiques : limitez l'effort en extérieur."
        }
        (Locale::Fr, TieringPolicy::ByAqi, RiskTier::Good) => {
            "Population générale : conditions favorables ; maintenez une surveillance régulière."
        }
        (Locale::Fr, TieringPolicy::ByFraction, RiskTier::Good) => {
            "Population générale : conditions favorables ; restez attentif aux alertes locales."
        }
    }
}

/// Narrative used when no sample data covers a clicked point.
#[must_use]
pub const fn unavailable_narrative(locale: Locale) -> &'static str {
    match locale {
        Locale::En => {
            "Data unavailable for this area. Use the Health Assistant for an estimate."
        }
        Locale::Fr => {
            "Données indisponibles pour cette zone. Utilisez l'assistant santé pour une estimation."
        }
    }
}

/// Vulnerable-population text paired with [`unavailable_narrative`].
#[must_use]
pub const fn unavailable_profiles(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "General population: monitor local alerts.",
        Locale::Fr => "Population générale : surveillez les alertes locales.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use air_vision_air_quality_models::WHO_LIMITS;

    const C: PollutantConcentrations = PollutantConcentrations {
        no2: 30.04,
        pm25: 18.0,
        o3: 61.25,
    };

    #[test]
    fn aqi_high_risk_interpolates_limits() {
        let text = summary(
            Locale::En,
            TieringPolicy::ByAqi,
            RiskTier::HighRisk,
            &C,
            &WHO_LIMITS,
        );
        assert!(text.starts_with("High risk: NO₂ 30.0 µg/m³ (> 25)"), "{text}");
        assert!(text.contains("PM2.5 18.0 µg/m³ (> 15)"));
        assert!(text.contains("O₃ 61.2 µg/m³ (> 60)") || text.contains("O₃ 61.3 µg/m³ (> 60)"));
    }

    #[test]
    fn fraction_summary_mentions_every_limit() {
        let text = summary(
            Locale::En,
            TieringPolicy::ByFraction,
            RiskTier::Good,
            &C,
            &WHO_LIMITS,
        );
        assert!(text.contains("(WHO 24h < 25 µg/m³)"));
        assert!(text.contains("(WHO 24h < 15 µg/m³)"));
        assert!(text.contains("(WHO seasonal peak < 60 µg/m³)"));
        assert!(text.starts_with("Good: "));
    }

    #[test]
    fn french_labels_differ_from_english() {
        for tier in [RiskTier::Good, RiskTier::Moderate, RiskTier::HighRisk] {
            assert_ne!(tier_label(Locale::En, tier), tier_label(Locale::Fr, tier));
            let fr = summary(Locale::Fr, TieringPolicy::ByAqi, tier, &C, &WHO_LIMITS);
            assert!(fr.starts_with(tier_label(Locale::Fr, tier)), "{fr}");
        }
    }

    #[test]
    fn english_label_matches_tier_display() {
        for tier in [RiskTier::Good, RiskTier::Moderate, RiskTier::HighRisk] {
            assert_eq!(tier_label(Locale::En, tier), tier.to_string());
        }
    }
}
