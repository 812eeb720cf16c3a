//! Session configuration
//!
//! Built once at startup (TOML file, then environment overrides) and passed
//! by reference into the session controller. Nothing re-reads it.

use crate::skin::Skin;
use crate::{Result, VoiceboardError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Orchestrator endpoint
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub host: String,
    pub port: u16,
    pub path: String,
    /// Use TLS for the websocket
    pub ssl: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8000,
            path: "/api/v1/ws".to_string(),
            ssl: false,
        }
    }
}

impl OrchestratorConfig {
    pub fn ws_url(&self) -> String {
        let scheme = if self.ssl { "wss" } else { "ws" };
        format!("{}://{}:{}{}", scheme, self.host, self.port, self.path)
    }
}

/// Audio rates handed to the orchestrator client
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Capture rate for speech-to-text
    pub stt_sample_rate: u32,
    /// Playback rate for text-to-speech
    pub tts_sample_rate: u32,
    pub greeting_filename: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            stt_sample_rate: 16000,
            tts_sample_rate: 24000,
            greeting_filename: "pizza-greeting.mp3".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Enables the voice/text mode toggle
    pub debug_mode: bool,
    /// 0 disables the thinking timeout
    pub thinking_timeout_ms: u64,
    /// Ignore VAD speech-start while the microphone is muted
    pub gate_speech_on_recording: bool,
}

impl UiConfig {
    pub fn thinking_timeout(&self) -> Option<Duration> {
        (self.thinking_timeout_ms > 0).then(|| Duration::from_millis(self.thinking_timeout_ms))
    }
}

/// Complete startup configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub orchestrator: OrchestratorConfig,
    pub audio: AudioConfig,
    pub ui: UiConfig,
    /// Skin name, see [`Skin::NAMES`]
    pub skin: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            orchestrator: OrchestratorConfig::default(),
            audio: AudioConfig::default(),
            ui: UiConfig::default(),
            skin: "pizza-agent".to_string(),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(VoiceboardError::Config(format!("{}: expected a boolean, got {:?}", key, other))),
    }
}

fn parse_num<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| VoiceboardError::Config(format!("{}: expected a number, got {:?}", key, value)))
}

impl SessionConfig {
    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| VoiceboardError::Config(e.to_string()))
    }

    /// Load a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            VoiceboardError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Apply overrides from a key lookup (environment variables in practice)
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("ORCHESTRATOR_HOST") {
            self.orchestrator.host = v;
        }
        if let Some(v) = lookup("ORCHESTRATOR_PORT") {
            self.orchestrator.port = parse_num("ORCHESTRATOR_PORT", &v)?;
        }
        if let Some(v) = lookup("ORCHESTRATOR_PATH") {
            self.orchestrator.path = v;
        }
        if let Some(v) = lookup("ORCHESTRATOR_SSL") {
            self.orchestrator.ssl = parse_bool("ORCHESTRATOR_SSL", &v)?;
        }
        if let Some(v) = lookup("UI_DEBUG_MODE") {
            self.ui.debug_mode = parse_bool("UI_DEBUG_MODE", &v)?;
        }
        if let Some(v) = lookup("STT_SAMPLE_RATE") {
            self.audio.stt_sample_rate = parse_num("STT_SAMPLE_RATE", &v)?;
        }
        if let Some(v) = lookup("TTS_SAMPLE_RATE") {
            self.audio.tts_sample_rate = parse_num("TTS_SAMPLE_RATE", &v)?;
        }
        if let Some(v) = lookup("GREETING_FILENAME") {
            self.audio.greeting_filename = v;
        }
        if let Some(v) = lookup("AGENT") {
            self.skin = v;
        }
        Ok(self)
    }

    /// Apply process environment overrides
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Enable debug mode (voice/text toggle)
    pub fn with_debug_mode(mut self, enabled: bool) -> Self {
        self.ui.debug_mode = enabled;
        self
    }

    /// Set the thinking timeout; zero disables it
    pub fn with_thinking_timeout(mut self, timeout: Duration) -> Self {
        self.ui.thinking_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Gate VAD speech-start on the recording intent
    pub fn with_speech_gating(mut self, enabled: bool) -> Self {
        self.ui.gate_speech_on_recording = enabled;
        self
    }

    pub fn with_skin(mut self, skin: impl Into<String>) -> Self {
        self.skin = skin.into();
        self
    }

    /// Resolve the configured skin
    pub fn skin(&self) -> Result<Skin> {
        Skin::by_name(&self.skin)
            .ok_or_else(|| VoiceboardError::Config(format!("Unknown skin: {}", self.skin)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.orchestrator.host.trim().is_empty() {
            return Err(VoiceboardError::Config("orchestrator host is empty".to_string()));
        }
        if self.orchestrator.port == 0 {
            return Err(VoiceboardError::Config("orchestrator port must be non-zero".to_string()));
        }
        if !self.orchestrator.path.starts_with('/') {
            return Err(VoiceboardError::Config(format!(
                "orchestrator path must start with '/': {}",
                self.orchestrator.path
            )));
        }
        if self.audio.stt_sample_rate == 0 || self.audio.tts_sample_rate == 0 {
            return Err(VoiceboardError::Config("sample rates must be non-zero".to_string()));
        }
        self.skin()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.orchestrator.ws_url(), "ws://localhost:8000/api/v1/ws");
        assert_eq!(config.audio.stt_sample_rate, 16000);
        assert_eq!(config.audio.tts_sample_rate, 24000);
        assert!(!config.ui.debug_mode);
        assert!(config.ui.thinking_timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = SessionConfig::from_toml(
            r#"
            skin = "stock-agent"

            [orchestrator]
            host = "orchestrator.internal"
            ssl = true

            [ui]
            debug_mode = true
            thinking_timeout_ms = 15000
            "#,
        )
        .unwrap();

        assert_eq!(config.orchestrator.ws_url(), "wss://orchestrator.internal:8000/api/v1/ws");
        assert!(config.ui.debug_mode);
        assert_eq!(config.ui.thinking_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.skin().unwrap().agent_name, "Alice");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(SessionConfig::from_toml("[orchestrator\nport = ").is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("ORCHESTRATOR_PORT", "9000"),
            ("UI_DEBUG_MODE", "true"),
            ("TTS_SAMPLE_RATE", "22050"),
            ("AGENT", "stock-agent"),
        ]
        .into_iter()
        .collect();

        let config = SessionConfig::default()
            .with_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.orchestrator.port, 9000);
        assert!(config.ui.debug_mode);
        assert_eq!(config.audio.tts_sample_rate, 22050);
        assert_eq!(config.skin, "stock-agent");
    }

    #[test]
    fn test_bad_override() {
        let result = SessionConfig::default().with_overrides(|k| {
            (k == "ORCHESTRATOR_PORT").then(|| "eighty".to_string())
        });
        assert!(matches!(result, Err(VoiceboardError::Config(_))));
    }

    #[test]
    fn test_validation() {
        let mut config = SessionConfig::default();
        config.orchestrator.path = "api".to_string();
        assert!(config.validate().is_err());

        let config = SessionConfig::default().with_skin("taco-agent");
        assert!(config.validate().is_err());

        let mut config = SessionConfig::default();
        config.audio.stt_sample_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::default()
            .with_debug_mode(true)
            .with_speech_gating(true)
            .with_thinking_timeout(Duration::from_millis(500));
        assert!(config.ui.debug_mode);
        assert!(config.ui.gate_speech_on_recording);
        assert_eq!(config.ui.thinking_timeout_ms, 500);
    }
}
