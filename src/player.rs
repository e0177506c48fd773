//! Playing a video outside the window: external player, then the browser

use std::process::Stdio;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    process::Command,
};
use tracing::{debug, info, warn};

use crate::config::PlayerConfig;
use crate::error::PlayerError;

/// Canonical watch page every video id plays from
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_URL_PREFIX, urlencoding::encode(video_id))
}

/// Arguments for the player process: configured ones, then the URL
pub fn player_args(config: &PlayerConfig, url: &str) -> Vec<String> {
    let mut args = config.args.clone();
    args.push(url.to_owned());
    args
}

/// Play a URL in the configured player, falling back to the browser
pub async fn play(url: String, config: PlayerConfig) -> Result<(), PlayerError> {
    match run_player(&url, &config).await {
        Err(PlayerError::Spawn { command, source }) => {
            warn!(%command, error = %source, "player unavailable, opening browser");
            webbrowser::open(&url).map_err(|e| PlayerError::Browser(e.to_string()))
        }
        other => other,
    }
}

async fn run_player(url: &str, config: &PlayerConfig) -> Result<(), PlayerError> {
    // Spawn the player with stdout piped for logging
    let mut child = Command::new(&config.command)
        .args(player_args(config, url))
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| PlayerError::Spawn {
            command: config.command.clone(),
            source,
        })?;
    info!(command = %config.command, %url, "player started");

    // Log player output line by line until it closes
    if let Some(out) = child.stdout.take() {
        let mut lines = BufReader::new(out).lines();
        while let Some(line) = lines.next_line().await? {
            debug!(target: "tube_browser::player", "{}", line);
        }
    }

    // Wait for the player to exit
    let status = child.wait().await?;
    info!(%status, "player exited");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_url_embeds_the_id() {
        assert_eq!(
            watch_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert_eq!(watch_url("a&b"), "https://www.youtube.com/watch?v=a%26b");
    }

    #[test]
    fn url_goes_after_configured_args() {
        let config = PlayerConfig {
            command: "mpv".to_string(),
            args: vec!["--fs".to_string(), "--ytdl-format=best".to_string()],
            autoplay: false,
        };
        assert_eq!(
            player_args(&config, "https://www.youtube.com/watch?v=x"),
            vec!["--fs", "--ytdl-format=best", "https://www.youtube.com/watch?v=x"]
        );
    }

    #[tokio::test]
    async fn missing_player_is_a_spawn_error() {
        let config = PlayerConfig {
            command: "tube-browser-no-such-player".to_string(),
            args: Vec::new(),
            autoplay: false,
        };
        let err = run_player("https://www.youtube.com/watch?v=x", &config)
            .await
            .unwrap_err();
        assert!(matches!(err, PlayerError::Spawn { .. }));
    }
}
