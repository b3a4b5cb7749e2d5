//! User notifications.
//!
//! The assistant reports rejections and degraded data through a
//! [`Notifier`]. Delivery (toasts, terminal output) belongs to the caller;
//! [`Notifications`] only enforces the user's on/off setting.

use air_vision_air_quality_models::Locale;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// The messages the assistant can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    InvalidCondition,
    InvalidLocation,
    MissingLocation,
    DegradedData,
    LocationResolved,
}

impl Notice {
    #[must_use]
    pub const fn level(self) -> NoticeLevel {
        match self {
            Self::InvalidCondition | Self::InvalidLocation | Self::MissingLocation => {
                NoticeLevel::Error
            }
            Self::DegradedData => NoticeLevel::Info,
            Self::LocationResolved => NoticeLevel::Success,
        }
    }

    #[must_use]
    pub const fn message(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::InvalidCondition, Locale::En) => "Please choose a valid condition.",
            (Self::InvalidCondition, Locale::Fr) => "Veuillez choisir une maladie valide.",
            (Self::InvalidLocation, Locale::En) => {
                "Invalid location. Enter City or lat,lon (e.g., 48.8566,2.3522)."
            }
            (Self::InvalidLocation, Locale::Fr) => {
                "Localisation invalide. Entrez une ville ou lat,lon (ex. 48.8566,2.3522)."
            }
            (Self::MissingLocation, Locale::En) => "Provide your location first to get data.",
            (Self::MissingLocation, Locale::Fr) => {
                "Indiquez d'abord votre localisation pour obtenir les données."
            }
            (Self::DegradedData, Locale::En) => {
                "Unable to reach an API. Using estimated data for this location."
            }
            (Self::DegradedData, Locale::Fr) => {
                "API injoignable. Données estimées utilisées pour cette localisation."
            }
            (Self::LocationResolved, Locale::En) => "Air quality data loaded.",
            (Self::LocationResolved, Locale::Fr) => "Données de qualité de l'air chargées.",
        }
    }
}

/// Delivers notifications to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Sends localized [`Notice`]s to a [`Notifier`] when enabled.
pub struct Notifications<'a> {
    sink: &'a dyn Notifier,
    enabled: bool,
    locale: Locale,
}

impl<'a> Notifications<'a> {
    #[must_use]
    pub const fn new(sink: &'a dyn Notifier, enabled: bool, locale: Locale) -> Self {
        Self {
            sink,
            enabled,
            locale,
        }
    }

    pub fn send(&self, notice: Notice) {
        if self.enabled {
            self.sink.notify(notice.level(), notice.message(self.locale));
        } else {
            log::debug!("Notification suppressed: {notice:?}");
        }
    }
}
