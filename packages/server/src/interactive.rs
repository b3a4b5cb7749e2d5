//! Interactive mode for the server.
//!
//! Prompts the user for bind address, port and the live-data flag before
//! starting the server.

use air_vision_assistant::settings::{SettingsPatch, SettingsStore};
use dialoguer::{Confirm, Input};

/// Runs the server in interactive mode, prompting for configuration.
///
/// Asks for a bind address and port, sets the corresponding environment
/// variables (`BIND_ADDR`, `PORT`), optionally toggles live data in the
/// settings file, and delegates to [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the settings cannot be updated or
/// the underlying server fails to start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("Air Vision Server");
    println!();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default("127.0.0.1".to_string())
        .interact_text()
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port_str: String = Input::new()
        .with_prompt("Port")
        .default("8080".to_string())
        .interact_text()
        .unwrap_or_else(|_| "8080".to_string());

    let store = SettingsStore::open_default().map_err(std::io::Error::other)?;
    let live_data = Confirm::new()
        .with_prompt("Query live air quality providers?")
        .default(store.current().live_data)
        .interact()
        .unwrap_or(false);
    store
        .update(&SettingsPatch {
            live_data: Some(live_data),
            ..SettingsPatch::default()
        })
        .map_err(std::io::Error::other)?;

    // SAFETY: We are single-threaded at this point (before server starts) and
    // these variables are only read once during server initialisation.
    unsafe {
        std::env::set_var("BIND_ADDR", &bind_addr);
        std::env::set_var("PORT", &port_str);
    }

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port_str}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server().await
}
