use nextpwd::Config;
use nextpwd_session::{SessionKeys, unix_now};

/// Mint a session token with the configured secret and lifetime, for
/// scripted access (`curl --cookie nextpwd_token=...`).
pub fn print(config: &Config) -> anyhow::Result<()> {
    let keys = SessionKeys::new(&config.gate.secret, config.gate.max_age);
    let token = keys.issue(unix_now())?;

    tracing::info!(max_age = config.gate.max_age, "Session token issued from CLI");
    println!("{token}");

    Ok(())
}
