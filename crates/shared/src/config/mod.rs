// Configuration module
// Reads INI-style configuration files with environment variable overrides

use std::collections::HashMap;
use std::path::Path;

use configparser::ini::Ini;
use parking_lot::Mutex;

/// Global configuration singleton
static CONFIG: once_cell::sync::Lazy<Mutex<Config>> =
    once_cell::sync::Lazy::new(|| Mutex::new(Config::new()));

/// Get a reference to the global config instance
pub fn get_config() -> &'static Mutex<Config> {
    &CONFIG
}

/// Configuration file parser
/// Keys are looked up regardless of the section they were declared in.
pub struct Config {
    values: HashMap<String, String>,
    filename: String,
    env_prefix: String,
}

impl Config {
    pub fn new() -> Self {
        Config {
            values: HashMap::new(),
            filename: String::new(),
            env_prefix: String::new(),
        }
    }

    /// Load configuration from a file
    /// env_prefix is used to check environment variables (e.g., "Probe_")
    pub fn set_source(&mut self, filename: &str, env_prefix: &str) -> bool {
        self.filename = filename.to_string();
        self.env_prefix = env_prefix.to_string();
        self.reload()
    }

    /// Reload the configuration file.
    /// Returns false if the file is missing or malformed; values from a
    /// previous load are discarded either way.
    pub fn reload(&mut self) -> bool {
        self.values.clear();

        if !Path::new(&self.filename).is_file() {
            return false;
        }

        let mut ini = Ini::new_cs();
        let sections = match ini.load(&self.filename) {
            Ok(sections) => sections,
            Err(e) => {
                tracing::warn!("Could not parse configuration {}: {}", self.filename, e);
                return false;
            }
        };

        for (_, entries) in sections {
            for (key, value) in entries {
                let Some(mut value) = value else { continue };

                if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
                    value = value[1..value.len() - 1].to_string();
                }

                self.values.insert(key, value);
            }
        }

        true
    }

    /// Source file of the last load
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Check if a key is set
    pub fn is_set(&self, key: &str) -> bool {
        self.get_env_or_config(key).is_some()
    }

    /// Get a string value with a default
    pub fn get_string_default(&self, key: &str, default: &str) -> String {
        self.get_env_or_config(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Get a string value (empty string default)
    pub fn get_string(&self, key: &str) -> String {
        self.get_string_default(key, "")
    }

    /// Get a boolean value with a default
    pub fn get_bool_default(&self, key: &str, default: bool) -> bool {
        match self.get_env_or_config(key) {
            Some(val) => {
                let lower = val.to_lowercase();
                matches!(lower.as_str(), "1" | "true" | "yes")
            }
            None => default,
        }
    }

    /// Get an integer value with a default
    pub fn get_int_default(&self, key: &str, default: i32) -> i32 {
        match self.get_env_or_config(key) {
            Some(val) => val.trim().parse().unwrap_or(default),
            None => default,
        }
    }

    /// Get a float value with a default
    pub fn get_float_default(&self, key: &str, default: f32) -> f32 {
        match self.get_env_or_config(key) {
            Some(val) => val.trim().parse().unwrap_or(default),
            None => default,
        }
    }

    /// Try environment variable first, then config file
    fn get_env_or_config(&self, key: &str) -> Option<String> {
        if !self.env_prefix.is_empty() {
            let env_key = format!("{}{}", self.env_prefix, key.replace('.', "_"));
            if let Ok(val) = std::env::var(&env_key) {
                return Some(val);
            }
        }

        self.values.get(key).cloned()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_config(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(format!("tilegrid-{}-{}.conf", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.get_int_default("nonexistent", 42), 42);
        assert_eq!(config.get_string_default("nonexistent", "hello"), "hello");
        assert!(config.get_bool_default("nonexistent", true));
    }

    #[test]
    fn test_missing_file() {
        let mut config = Config::new();
        assert!(!config.set_source("/nonexistent/tilegrid/probe.conf", ""));
        assert!(!config.is_set("LogLevel"));
    }

    #[test]
    fn test_load_values_across_sections() {
        let path = write_temp_config(
            "sections",
            "# probe settings\nLogLevel = 3\n\n[Probe]\nLogsDir = \"logs\"\nDefaultPlane = 2\nVerbose = yes\nScale = 1.5\n",
        );

        let mut config = Config::new();
        assert!(config.set_source(&path, ""));
        assert_eq!(config.get_int_default("LogLevel", 0), 3);
        assert_eq!(config.get_string("LogsDir"), "logs");
        assert_eq!(config.get_int_default("DefaultPlane", 0), 2);
        assert!(config.get_bool_default("Verbose", false));
        assert_eq!(config.get_float_default("Scale", 0.0), 1.5);
        assert_eq!(config.get_int_default("LogsDir", 7), 7);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_env_override() {
        let path = write_temp_config("env", "LogLevel = 1\n");
        let prefix = format!("TilegridTest{}_", std::process::id());

        let mut config = Config::new();
        assert!(config.set_source(&path, &prefix));
        assert_eq!(config.get_int_default("LogLevel", 0), 1);

        // SAFETY: the variable name is unique to this test process
        unsafe { std::env::set_var(format!("{}LogLevel", prefix), "4") };
        assert_eq!(config.get_int_default("LogLevel", 0), 4);
        unsafe { std::env::remove_var(format!("{}LogLevel", prefix)) };

        let _ = std::fs::remove_file(path);
    }
}
