//! INI file configuration adapter.

use configparser::ini::Ini;
use std::path::Path;

use crate::ports::config_port::ConfigPort;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_float(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[data]
prices_dir = /var/lib/quantdash/prices

[engine]
risk_free_rate = 0.01

[single_asset]
ticker = EURUSD=X
strategy = momentum
momentum_window = 5
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("data", "prices_dir"),
            Some("/var/lib/quantdash/prices".to_string())
        );
        assert_eq!(
            adapter.get_string("single_asset", "ticker"),
            Some("EURUSD=X".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[engine]\nrisk_free_rate = 0.01\n").unwrap();
        assert_eq!(adapter.get_string("engine", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_value_and_defaults() {
        let adapter =
            FileConfigAdapter::from_string("[single_asset]\nmomentum_window = 5\n").unwrap();
        assert_eq!(adapter.get_int("single_asset", "momentum_window", 0), 5);
        assert_eq!(adapter.get_int("single_asset", "missing", 42), 42);
    }

    #[test]
    fn get_int_returns_default_for_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[single_asset]\nmomentum_window = abc\n").unwrap();
        assert_eq!(adapter.get_int("single_asset", "momentum_window", 42), 42);
    }

    #[test]
    fn get_float_returns_value_and_defaults() {
        let adapter = FileConfigAdapter::from_string("[engine]\nrisk_free_rate = 0.015\n").unwrap();
        assert_eq!(adapter.get_float("engine", "risk_free_rate", 0.0), 0.015);
        assert_eq!(adapter.get_float("engine", "missing", 99.9), 99.9);
    }

    #[test]
    fn get_float_returns_default_for_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[engine]\nrisk_free_rate = one_percent\n").unwrap();
        assert_eq!(adapter.get_float("engine", "risk_free_rate", 0.01), 0.01);
    }

    #[test]
    fn get_bool_recognizes_spellings() {
        let adapter =
            FileConfigAdapter::from_string("[engine]\na = true\nb = yes\nc = 1\nd = no\n").unwrap();
        assert!(adapter.get_bool("engine", "a", false));
        assert!(adapter.get_bool("engine", "b", false));
        assert!(adapter.get_bool("engine", "c", false));
        assert!(!adapter.get_bool("engine", "d", true));
        assert!(adapter.get_bool("engine", "missing", true));
    }

    #[test]
    fn get_date_parses_iso_dates() {
        let adapter = FileConfigAdapter::from_string("[dates]\nstart = 2024-01-15\n").unwrap();
        assert_eq!(
            adapter.get_date("dates", "start"),
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
    }

    #[test]
    fn get_date_is_none_for_missing_or_malformed() {
        let adapter = FileConfigAdapter::from_string("[dates]\nstart = 15/01/2024\n").unwrap();
        assert_eq!(adapter.get_date("dates", "start"), None);
        assert_eq!(adapter.get_date("dates", "end"), None);
    }

    #[test]
    fn from_file_reads_config() {
        let content = "[data]\nprices_dir = /tmp/prices\n";
        let file = create_temp_config(content);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "prices_dir"),
            Some("/tmp/prices".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/quantdash.ini");
        assert!(result.is_err());
    }
}
