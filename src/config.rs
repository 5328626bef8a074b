//! Runtime settings read from the environment.
use std::path::PathBuf;

pub const ASSETS_ENV: &str = "DRUMSEQ_ASSETS";
pub const MIDI_PORT_ENV: &str = "DRUMSEQ_MIDI_PORT";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the nine drum samples
    pub assets_dir: PathBuf,
    /// Substring of a MIDI output port name to mirror hits to
    pub midi_port: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            midi_port: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v: &String| !v.trim().is_empty());

        Self {
            assets_dir: get(ASSETS_ENV).map(PathBuf::from).unwrap_or(defaults.assets_dir),
            midi_port: get(MIDI_PORT_ENV),
        }
    }
}
