//! Startup configuration: defaults, overridable from the page's query string
//! (`?effect=Plasma%20Waves&speed=1.5&auto=0&stats=1&seed=7&log=debug`).

use crate::core::constants::{SPEED_DEFAULT, SPEED_MAX, SPEED_MIN};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`{key}`: expected a number, got `{value}`")]
    NotANumber { key: String, value: String },
    #[error("`{key}`: {value} is outside {min}..={max}")]
    OutOfRange {
        key: String,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("`{key}`: expected a boolean, got `{value}`")]
    NotABool { key: String, value: String },
    #[error("`log`: unknown level `{0}`")]
    UnknownLevel(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct StudioConfig {
    /// Effect mounted at startup; `None` mounts the registry default.
    pub initial_effect: Option<String>,
    pub global_speed: f32,
    pub auto_adjust: bool,
    pub show_stats: bool,
    /// Keep sampling frame timing while playback is paused.
    pub sample_while_paused: bool,
    /// Fixed seed for effect randomness; `None` draws one at startup.
    pub seed: Option<u64>,
    pub log_level: log::Level,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            initial_effect: None,
            global_speed: SPEED_DEFAULT,
            auto_adjust: true,
            show_stats: false,
            sample_while_paused: true,
            seed: None,
            log_level: log::Level::Info,
        }
    }
}

impl StudioConfig {
    /// Apply overrides from a query string (leading `?` optional). Bad values
    /// keep their default and are reported back; unknown keys are ignored.
    pub fn from_query(query: &str) -> (Self, Vec<ConfigError>) {
        let mut cfg = Self::default();
        let mut errors = Vec::new();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let value = percent_decode(raw);
            if let Err(e) = cfg.apply(key, &value) {
                errors.push(e);
            }
        }
        (cfg, errors)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "effect" => {
                self.initial_effect = (!value.is_empty()).then(|| value.to_string());
            }
            "speed" => {
                let v: f32 = parse_number(key, value)?;
                if !(SPEED_MIN..=SPEED_MAX).contains(&v) {
                    return Err(ConfigError::OutOfRange {
                        key: key.to_string(),
                        value: v,
                        min: SPEED_MIN,
                        max: SPEED_MAX,
                    });
                }
                self.global_speed = v;
            }
            "auto" => self.auto_adjust = parse_bool(key, value)?,
            "stats" => self.show_stats = parse_bool(key, value)?,
            "sample_paused" => self.sample_while_paused = parse_bool(key, value)?,
            "seed" => self.seed = Some(parse_number(key, value)?),
            "log" => {
                self.log_level = value
                    .parse()
                    .map_err(|_| ConfigError::UnknownLevel(value.to_string()))?;
            }
            _ => log::debug!("[config] ignoring unknown key `{}`", key),
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::NotANumber {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        // A bare flag (`?stats`) means on.
        "" | "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::NotABool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// `+` as space and `%XX` escapes; malformed escapes pass through literally.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                match hex {
                    Some(b) => {
                        out.push(b);
                        i += 2;
                    }
                    None => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
