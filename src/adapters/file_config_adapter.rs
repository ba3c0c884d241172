//! INI file configuration adapter.
//!
//! Keys and sections are case-insensitive. Values are trimmed, and an empty
//! value counts as absent so `key =` falls back to the default.

use configparser::ini::Ini;
use std::path::Path;

use crate::domain::error::DashError;
use crate::ports::config_port::{ConfigPort, InvalidValue};

pub struct FileConfigAdapter {
    ini: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DashError> {
        let path = path.as_ref();
        let mut ini = Ini::new();
        ini.load(path).map_err(|reason| DashError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { ini })
    }

    pub fn from_string(content: &str) -> Result<Self, DashError> {
        let mut ini = Ini::new();
        ini.read(content.to_string())
            .map_err(|reason| DashError::ConfigParse {
                file: "<inline>".into(),
                reason,
            })?;
        Ok(Self { ini })
    }

    fn typed<T>(
        &self,
        section: &str,
        key: &str,
        expected: &'static str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>, InvalidValue> {
        match self.get_string(section, key) {
            None => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or(InvalidValue { raw, expected }),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.ini
            .get(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, InvalidValue> {
        self.typed(section, key, "an integer", |raw| raw.parse().ok())
    }

    fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, InvalidValue> {
        self.typed(section, key, "a boolean", parse_bool)
    }
}
