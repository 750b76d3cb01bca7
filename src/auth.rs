use crate::config::Config;

/// Try to run a CLI command and capture stdout as a token
fn try_cli_token(command: &str) -> Option<String> {
    let output = std::process::Command::new("sh")
        .args(["-c", command])
        .output()
        .ok()?;

    if output.status.success() {
        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !token.is_empty() {
            return Some(token);
        }
    }
    None
}

fn env_token(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Resolve the API token once at start-up:
/// 1. Environment variable named by `token_env`
/// 2. Output of `token_command`
///
/// Returns `None` when neither yields a token; requests then go out
/// unauthenticated.
pub fn load_token(config: &Config) -> Option<String> {
    if let Some(token) = config.token_env.as_deref().and_then(env_token) {
        tracing::debug!(source = "env", "using API token");
        return Some(token);
    }

    if let Some(token) = config.token_command.as_deref().and_then(try_cli_token) {
        tracing::debug!(source = "command", "using API token");
        return Some(token);
    }

    tracing::warn!(
        token_env = config.token_env.as_deref().unwrap_or("-"),
        "no API token found; requests will be unauthenticated and rate limited"
    );
    None
}
