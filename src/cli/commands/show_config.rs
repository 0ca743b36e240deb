//! Show where configuration and credentials come from.

use crate::config;

/// Print the config file location and whether each credential is set.
pub fn cmd_show_config() -> anyhow::Result<()> {
    match config::config_path() {
        Some(path) => {
            let exists = if path.exists() { "" } else { " (not created yet)" };
            println!("Config file: {}{exists}", path.display());
        }
        None => println!("Config file: could not determine config directory"),
    }
    println!();

    let config = config::load();
    let credentials = &config.credentials;

    print_status("client_id", "SPOTIFY_CLIENT_ID", credentials.client_id.is_some());
    print_status(
        "client_secret",
        "SPOTIFY_CLIENT_SECRET",
        credentials.client_secret.is_some(),
    );
    println!("  redirect_uri: {}", credentials.redirect_uri);
    println!("  scope:        {}", credentials.scope);

    println!();
    match config.credentials.resolve() {
        Ok(_) => println!("✓ Credentials are complete."),
        Err(e) => println!("✗ {e}"),
    }

    Ok(())
}

fn print_status(field: &str, env_var: &str, in_file: bool) {
    let from_env = std::env::var(env_var).is_ok_and(|v| !v.is_empty());
    let status = match (from_env, in_file) {
        (true, _) => "set (environment)",
        (false, true) => "set (config file)",
        (false, false) => "missing",
    };
    println!("  {field}: {status}");
}
