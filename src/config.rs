use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::calendar::{Agenda, Event, EventId};
use crate::error::{Error, ErrorKind, Result};

/// Maps a key to the command line it runs.
pub type KeyMap = HashMap<char, String>;

const CONFIG_PATH_ENV_VAR: &str = "CALGRID_CONFIG_FILE";

pub fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("calgrid").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".calgrid.toml"));
    }

    locations
}

/// Loads `path` if given, otherwise the first config file found in the
/// default locations. Falls back to the defaults if there is none.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    for location in find_configfile_locations() {
        log::debug!("looking for config at {}", location.display());
        if location.is_file() {
            return Config::from_file(&location);
        }
    }

    log::info!("no config file found, using defaults");
    Ok(Config::default())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    pub today_char: Option<char>,
    pub show_inactive: bool,
    pub dim_inactive: bool,
    pub invert_today: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            today_char: Some('*'),
            show_inactive: true,
            dim_inactive: true,
            invert_today: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
struct ConfigFile {
    /// Milliseconds between two clock refreshes.
    tick_rate: u64,
    theme: Theme,
    keys: KeyMap,
    events: Vec<EventEntry>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            tick_rate: 1000,
            theme: Theme::default(),
            keys: KeyMap::new(),
            events: Vec::new(),
        }
    }
}

/// Start time format of `[[events]]` entries.
const EVENT_START_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One `[[events]]` table, e.g. `start = "2024-02-14 09:30"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct EventEntry {
    start: String,
    summary: String,
}

fn load_agenda(entries: &[EventEntry]) -> Result<Agenda> {
    let mut agenda = Agenda::new();

    for (n, entry) in entries.iter().enumerate() {
        let start = NaiveDateTime::parse_from_str(entry.start.trim(), EVENT_START_FORMAT)
            .map_err(|err| {
                Error::new(
                    ErrorKind::ConfigParse,
                    &format!("event '{}': bad start '{}': {}", entry.summary, entry.start, err),
                )
            })?;
        agenda.add_event(EventId(n as u64 + 1), Event::new(start, &entry.summary));
    }

    Ok(agenda)
}

#[derive(Debug, Clone)]
pub struct Config {
    pub path: Option<PathBuf>,
    pub key_map: KeyMap,
    pub tick_rate: Duration,
    pub theme: Theme,
    pub agenda: Agenda,
}

impl Default for Config {
    fn default() -> Config {
        Config::from(ConfigFile::default())
    }
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        let mut key_map = default_key_map();
        key_map.extend(file.keys);

        Config {
            path: None,
            key_map,
            tick_rate: Duration::from_millis(file.tick_rate),
            theme: file.theme,
            agenda: Agenda::new(),
        }
    }
}

fn default_key_map() -> KeyMap {
    [
        ('l', "next"),
        ('n', "next"),
        ('h', "prev"),
        ('p', "prev"),
        ('L', "12next"),
        ('H', "12prev"),
        ('t', "today"),
        ('w', "week"),
        ('m', "month"),
        ('q', "quit"),
    ]
    .iter()
    .map(|&(key, cmd)| (key, cmd.to_owned()))
    .collect()
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|err| {
            Error::from(ErrorKind::IOError(err))
                .with_msg(&format!("could not read {}", path.display()))
        })?;

        let mut config = Config::from_toml(&content).map_err(|err| {
            let msg = format!(
                "{}: {}",
                path.display(),
                err.message.as_deref().unwrap_or_default()
            );
            err.with_msg(&msg)
        })?;
        config.path = Some(path.to_owned());

        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Config> {
        let file: ConfigFile = toml::from_str(content)?;

        if file.tick_rate == 0 {
            return Err(Error::new(
                ErrorKind::ConfigParse,
                "tick_rate must be greater than zero",
            ));
        }

        let agenda = load_agenda(&file.events)?;
        log::debug!("{} events configured", agenda.len());

        let mut config = Config::from(file);
        config.agenda = agenda;
        Ok(config)
    }

    pub fn command_for(&self, key: char) -> Option<&str> {
        self.key_map.get(&key).map(String::as_str)
    }
}
