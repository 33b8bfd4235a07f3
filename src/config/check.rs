//! Detect and fill keys missing from a config file written by an older
//! release. Existing values are never overwritten.

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn default_mapping() -> AppResult<Mapping> {
    let value = serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(e.to_string()))?;
    match value {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("default config is not a mapping".into())),
    }
}

fn parse_mapping(content: &str) -> AppResult<Mapping> {
    match serde_yaml::from_str::<Value>(content) {
        Ok(Value::Mapping(m)) => Ok(m),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(AppError::Config("config file is not a YAML mapping".into())),
        Err(e) => Err(AppError::Config(e.to_string())),
    }
}

/// Keys present in the default config but absent from `content`.
pub fn missing_fields(content: &str) -> AppResult<Vec<String>> {
    let current = parse_mapping(content)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add the missing keys with their default values. Returns what was added.
pub fn fill_missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let mut current = parse_mapping(&content)?;
    let defaults = default_mapping()?;

    let mut added = Vec::new();
    for (k, v) in defaults {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
            current.insert(k, v);
        }
    }

    if added.is_empty() {
        info("Configuration is up to date.");
        return Ok(added);
    }

    let yaml = serde_yaml::to_string(&Value::Mapping(current))
        .map_err(|_| AppError::ConfigSave)?;
    fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;
    success(format!("Added missing configuration keys: {}", added.join(", ")));
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_keys_added_in_newer_releases() {
        let old = "database: /tmp/a.sqlite\nschool_name: Hill View\n";
        let missing = missing_fields(old).unwrap();
        assert!(missing.contains(&"bulk_scope".to_string()));
        assert!(missing.contains(&"load_latency_ms".to_string()));
        assert!(!missing.contains(&"school_name".to_string()));
    }

    #[test]
    fn fill_keeps_existing_values() {
        let path = std::env::temp_dir().join("rollcall_check_fill.conf");
        fs::write(&path, "database: /tmp/a.sqlite\nstaff_roster_size: 30\n").unwrap();

        let added = fill_missing_fields(&path).unwrap();
        assert!(added.contains(&"school_name".to_string()));

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.staff_roster_size, 30);
        assert!(missing_fields(&fs::read_to_string(&path).unwrap())
            .unwrap()
            .is_empty());
        fs::remove_file(&path).ok();
    }
}
