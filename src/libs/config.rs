//! Application configuration stored as `config.json` in the data directory.
//!
//! Both sections are optional; a missing file or section means defaults.
//!
//! ```json
//! {
//!   "focus": { "focus_minutes": 25, "break_minutes": 5, "tick_millis": 1000,
//!              "dispatch_attempts": 3, "dispatch_backoff_millis": 500 },
//!   "ai": { "api_url": "https://api.openai.com/v1", "model": "gpt-5" }
//! }
//! ```
//!
//! The AI key may live in the file, but normally comes from `OPENAI_API_KEY`
//! (a `.env` file is honoured at startup).

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::outbox::DispatchPolicy;
use crate::libs::timer::{TimerDurations, DEFAULT_BREAK_MINUTES, DEFAULT_FOCUS_MINUTES};
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Password};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::time::Duration;

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Timer lengths and how the session dispatcher retries.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct FocusConfig {
    pub focus_minutes: u32,
    pub break_minutes: u32,
    pub tick_millis: u64,
    pub dispatch_attempts: u32,
    pub dispatch_backoff_millis: u64,
}

impl Default for FocusConfig {
    fn default() -> Self {
        FocusConfig {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            tick_millis: 1000,
            dispatch_attempts: 3,
            dispatch_backoff_millis: 500,
        }
    }
}

impl FocusConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "focus".to_string(),
            name: "Focus timer".to_string(),
        }
    }

    pub fn durations(&self) -> TimerDurations {
        TimerDurations::new(self.focus_minutes, self.break_minutes)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }

    pub fn dispatch_policy(&self) -> DispatchPolicy {
        DispatchPolicy {
            max_attempts: self.dispatch_attempts.max(1),
            backoff: Duration::from_millis(self.dispatch_backoff_millis),
        }
    }

    pub fn init(config: &Option<FocusConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleFocus);
        Ok(FocusConfig {
            focus_minutes: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptFocusMinutes.to_string())
                .default(config.focus_minutes)
                .interact_text()?,
            break_minutes: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptBreakMinutes.to_string())
                .default(config.break_minutes)
                .interact_text()?,
            dispatch_attempts: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptDispatchAttempts.to_string())
                .default(config.dispatch_attempts)
                .interact_text()?,
            ..config
        })
    }
}

/// OpenAI-compatible completion endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct AiConfig {
    pub api_url: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            api_url: APP_METADATA_AI_API_URL.to_string(),
            model: APP_METADATA_AI_MODEL.to_string(),
            api_key: None,
        }
    }
}

impl AiConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "ai".to_string(),
            name: "AI assistant".to_string(),
        }
    }

    /// The configured key, or `OPENAI_API_KEY` when none is stored.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty()))
    }

    pub fn init(config: &Option<AiConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleAi);

        let api_url = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptAiApiUrl.to_string())
            .default(config.api_url)
            .interact_text()?;
        let model = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptAiModel.to_string())
            .default(config.model)
            .interact_text()?;
        let api_key = Password::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptAiApiKey.to_string())
            .allow_empty_password(true)
            .interact()?;

        Ok(AiConfig {
            api_url,
            model,
            api_key: if api_key.trim().is_empty() { config.api_key } else { Some(api_key) },
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<FocusConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai: Option<AiConfig>,
}

impl Config {
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    /// Reads the config file under `storage`, falling back to defaults.
    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn focus(&self) -> FocusConfig {
        self.focus.clone().unwrap_or_default()
    }

    pub fn ai(&self) -> AiConfig {
        self.ai.clone().unwrap_or_default()
    }

    /// Interactive wizard over the selected sections.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [FocusConfig::module(), AiConfig::module()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "focus" => config.focus = Some(FocusConfig::init(&config.focus)?),
                "ai" => config.ai = Some(AiConfig::init(&config.ai)?),
                _ => {}
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_sections_fill_in_defaults() {
        let config: Config = serde_json::from_str(r#"{ "focus": { "focus_minutes": 50 } }"#).unwrap();

        let focus = config.focus();
        assert_eq!(focus.focus_minutes, 50);
        assert_eq!(focus.break_minutes, 5);
        assert_eq!(focus.tick_period(), Duration::from_secs(1));
        assert_eq!(config.ai().model, APP_METADATA_AI_MODEL);
    }

    #[test]
    fn stored_key_wins_over_environment() {
        let ai = AiConfig {
            api_key: Some("sk-file".into()),
            ..AiConfig::default()
        };
        assert_eq!(ai.resolved_api_key().as_deref(), Some("sk-file"));
    }

    #[test]
    fn dispatch_policy_always_tries_once() {
        let focus = FocusConfig {
            dispatch_attempts: 0,
            ..FocusConfig::default()
        };
        assert_eq!(focus.dispatch_policy().max_attempts, 1);
    }
}
