//! Interactive health assistant.
//!
//! Walks the user through the four questionnaire steps with `dialoguer`
//! prompts. Notifications are printed above any active spinner.

use air_vision_assistant::notify::{NoticeLevel, Notifications, Notifier};
use air_vision_assistant::settings::SettingsStore;
use air_vision_assistant::wizard::{HealthWizard, WizardError, WizardStep};
use air_vision_cli_utils::MultiProgress;
use air_vision_live::fetcher::SnapshotFetcher;
use air_vision_live::transport::ReqwestTransport;
use air_vision_locate::LocationError;
use air_vision_risk::advice::Condition;
use dialoguer::{Confirm, Input, Select};

/// Prints notifications through the shared [`MultiProgress`].
struct TerminalNotifier {
    multi: MultiProgress,
}

impl Notifier for TerminalNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        let prefix = match level {
            NoticeLevel::Error => "!",
            NoticeLevel::Info => "i",
            NoticeLevel::Success => "✓",
        };
        self.multi.println(format!("[{prefix}] {message}")).ok();
    }
}

/// Runs the questionnaire once.
///
/// # Errors
///
/// Returns an error if a prompt fails (e.g. no terminal).
pub async fn run(
    multi: &MultiProgress,
    store: &SettingsStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = store.current();
    let notifier = TerminalNotifier {
        multi: multi.clone(),
    };
    let notes = Notifications::new(&notifier, settings.notifications, settings.locale);
    let fetcher = SnapshotFetcher::new(ReqwestTransport::default());
    let mut wizard = HealthWizard::new(settings.locale);

    println!("Health Assistant");

    print_step(&wizard, "Condition");
    let labels: Vec<&str> = Condition::all().iter().map(AsRef::as_ref).collect();
    let idx = Select::new()
        .with_prompt("Respiratory condition")
        .items(&labels)
        .default(0)
        .interact()?;
    wizard.select_condition(labels[idx], &notes)?;

    print_step(&wizard, "Location");
    loop {
        let city: String = Input::new()
            .with_prompt("City")
            .default("Montreal".to_string())
            .allow_empty(true)
            .interact_text()?;
        let lat_lon: String = Input::new()
            .with_prompt("Coordinates (lat,lon), blank to look up the city")
            .default(String::new())
            .allow_empty(true)
            .interact_text()?;

        let spinner = air_vision_cli_utils::spinner(multi, "Fetching air quality...");
        let result = wizard
            .submit_location(&city, &lat_lon, &fetcher, settings.live_data, &notes)
            .await;
        spinner.finish_and_clear();

        match result {
            Ok(_) => break,
            Err(WizardError::Location(e)) => {
                log::debug!("{e}");
                if let Some(line) = rejection_line(&e, settings.notifications) {
                    multi.println(line).ok();
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    print_step(&wizard, "Recommended zones");
    if let Some(location) = wizard.location() {
        println!("{}", location.label);
    }
    if let Some(assessment) = wizard.assessment() {
        println!("{assessment}");
    }
    if let Some(narrative) = wizard.narrative() {
        println!("{}", narrative.vulnerable_profiles);
    }
    println!();
    for zone in wizard.zones() {
        println!("  - {zone}");
    }
    println!();

    if !Confirm::new()
        .with_prompt("Show prevention tips?")
        .default(true)
        .interact()?
    {
        return Ok(());
    }

    let plan = wizard.show_tips(&notes)?.clone();
    print_step(&wizard, "Prevention tips");
    for tip in &plan.tips {
        println!("  - {tip}");
    }
    println!();
    println!("RespiroScore: {}/100", plan.score);
    println!();
    println!("Innovations:");
    for innovation in wizard.innovations() {
        println!("  - {innovation}");
    }

    Ok(())
}

/// The line to print for a rejected location. With notifications on the
/// notifier has already reported it.
fn rejection_line(err: &LocationError, notified: bool) -> Option<String> {
    (!notified).then(|| format!("[!] {err}"))
}

fn print_step(wizard: &HealthWizard, title: &str) {
    println!();
    println!(
        "Step {}/{}: {title}",
        wizard.step().number(),
        WizardStep::Tips.number()
    );
}

/// Prompts for a latitude and longitude, re-asking until both are in
/// range.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub fn prompt_coordinates() -> Result<(f64, f64), Box<dyn std::error::Error>> {
    let lat: f64 = Input::new()
        .with_prompt("Latitude")
        .validate_with(|v: &f64| in_range(*v, 90.0))
        .interact_text()?;
    let lon: f64 = Input::new()
        .with_prompt("Longitude")
        .validate_with(|v: &f64| in_range(*v, 180.0))
        .interact_text()?;
    Ok((lat, lon))
}

fn in_range(value: f64, limit: f64) -> Result<(), String> {
    if (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(format!("Must be between -{limit} and {limit}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_location_is_printed_when_notifications_are_off() {
        let err = LocationError::UnknownLocation {
            input: "Atlantis".to_string(),
        };
        assert_eq!(
            rejection_line(&err, false).as_deref(),
            Some("[!] Unknown location: Atlantis")
        );
        assert_eq!(rejection_line(&err, true), None);
    }

    #[test]
    fn coordinate_ranges_are_inclusive() {
        assert!(in_range(90.0, 90.0).is_ok());
        assert!(in_range(-180.0, 180.0).is_ok());
        assert!(in_range(90.1, 90.0).is_err());
    }
}
