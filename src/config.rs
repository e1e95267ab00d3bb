extern crate anyhow;
extern crate chrono_tz;
extern crate serde;
extern crate serde_json;

use anyhow::Context;
use crate::result;

pub const DEFAULT_UPLOAD_DIR: &str = "/image/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Everything a run needs to know about the outside world.
///
/// Built from defaults, then an optional JSON file, then the environment,
/// then command line flags; each later source overrides the earlier ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Todoist API token. Required by the tasks board only.
    pub auth_token: Option<String>,
    /// Upload endpoint of the display device. Required for uploads only.
    pub device_url: Option<String>,
    pub upload_dir: String,

    pub departures_url: String,
    pub stop_id: String,
    pub region_id: String,

    pub tasks_url: String,
    pub completed_url: String,

    /// IANA zone used for the header clock and "today"; system local time when unset.
    pub timezone: Option<String>,

    pub font_path: Option<std::path::PathBuf>,
    pub bold_font_path: Option<std::path::PathBuf>,

    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Config {
        return Config {
            auth_token: None,
            device_url: None,
            upload_dir: DEFAULT_UPLOAD_DIR.to_string(),

            departures_url: "https://citymapper.com/api/1/departures".to_string(),
            stop_id: "WarsawStop_Centrum_01".to_string(),
            region_id: "pl-warsaw".to_string(),

            tasks_url: "https://api.todoist.com/rest/v2/tasks".to_string(),
            completed_url: "https://api.todoist.com/sync/v9/completed/get_all".to_string(),

            timezone: None,

            font_path: Some(std::path::PathBuf::from(
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf")),
            bold_font_path: Some(std::path::PathBuf::from(
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf")),

            timeout_secs: DEFAULT_TIMEOUT_SECS,
        };
    }
}

impl Config {
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> result::BoardResult<Config> {
        let debug_path = path.as_ref().display().to_string();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Opening config from '{}'", debug_path))?;
        let reader = std::io::BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("while parsing config '{}'", debug_path))?;
        return Ok(config);
    }

    pub fn with_env_overrides(self) -> Config {
        return self.with_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from a key lookup; empty values count as unset.
    pub fn with_overrides_from<F: Fn(&str) -> Option<String>>(mut self, lookup: F) -> Config {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get("TODOIST_API_TOKEN") {
            self.auth_token = Some(token);
        }
        if let Some(url) = get("DEVICE_URL") {
            self.device_url = Some(url);
        }
        if let Some(dir) = get("UPLOAD_DIR") {
            self.upload_dir = dir;
        }
        if let Some(tz) = get("INFOBOARD_TIMEZONE") {
            self.timezone = Some(tz);
        }
        if let Some(font) = get("INFOBOARD_FONT") {
            self.font_path = Some(std::path::PathBuf::from(font));
        }

        return self;
    }

    pub fn require_auth_token(&self) -> result::BoardResult<&str> {
        return self.auth_token.as_deref()
            .ok_or(result::BoardError::MissingConfig("TODOIST_API_TOKEN"));
    }

    pub fn require_device_url(&self) -> result::BoardResult<&str> {
        return self.device_url.as_deref()
            .ok_or(result::BoardError::MissingConfig("DEVICE_URL"));
    }

    pub fn timeout(&self) -> std::time::Duration {
        return std::time::Duration::from_secs(self.timeout_secs);
    }

    pub fn tz(&self) -> result::BoardResult<Option<chrono_tz::Tz>> {
        match self.timezone {
            None => return Ok(None),
            Some(ref name) => {
                let tz: chrono_tz::Tz = name.parse().map_err(|err| result::make_error(
                    &format!("Unknown timezone '{}': {}", name, err)))?;
                return Ok(Some(tz));
            },
        }
    }
}
