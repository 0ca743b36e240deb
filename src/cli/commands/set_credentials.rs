//! Store Spotify API credentials in the config file.

use crate::config;

use super::prompt;

/// Write the OAuth client ID and secret into the config file.
///
/// Values not supplied as arguments are prompted for, so
/// `playlist-porter set-credentials` alone walks through the setup.
pub fn cmd_set_credentials(
    client_id: Option<&str>,
    client_secret: Option<&str>,
) -> anyhow::Result<()> {
    let client_id = match client_id {
        Some(value) => value.to_string(),
        None => prompt("Spotify client ID: ")?,
    };
    let client_secret = match client_secret {
        Some(value) => value.to_string(),
        None => prompt("Spotify client secret: ")?,
    };

    if client_id.is_empty() || client_secret.is_empty() {
        eprintln!("Error: both a client ID and a client secret are required.");
        eprintln!("Create an app at https://developer.spotify.com/dashboard to get them.");
        std::process::exit(1);
    }

    let mut config = config::load();
    config.credentials.client_id = Some(client_id);
    config.credentials.client_secret = Some(client_secret);
    config::save(&config)?;

    match config::config_path() {
        Some(path) => println!("✓ Credentials saved to {}", path.display()),
        None => println!("✓ Credentials saved."),
    }

    Ok(())
}
