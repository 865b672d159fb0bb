//! RON file helpers shared by the data registries and settings.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;

/// Read and parse a RON file.
pub fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: display,
        details: e.to_string(),
    })
}

/// Serialize a value as pretty RON and write it, creating parent directories.
pub fn write_ron<T: Serialize>(path: &Path, value: &T) -> Result<(), DataLoadError> {
    let display = path.display().to_string();

    let serialized = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|e| DataLoadError::SerializeError {
            path: display.clone(),
            details: e.to_string(),
        })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DataLoadError::WriteError {
            path: display.clone(),
            details: e.to_string(),
        })?;
    }

    fs::write(path, serialized).map_err(|e| DataLoadError::WriteError {
        path: display,
        details: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        value: f32,
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("arena_survival_{}_{}", name, std::process::id()))
            .join("sample.ron")
    }

    #[test]
    fn missing_file_is_reported() {
        let result = read_ron::<Sample>(Path::new("definitely/not/here.ron"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound(_))));
    }

    #[test]
    fn written_file_reads_back() {
        let path = temp_path("roundtrip");
        let sample = Sample {
            name: "swordsman".to_string(),
            value: 1.5,
        };

        write_ron(&path, &sample).expect("write should succeed");
        let loaded: Sample = read_ron(&path).expect("read should succeed");
        assert_eq!(loaded, sample);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "(name: \"broken\", value: ").unwrap();

        let result = read_ron::<Sample>(&path);
        assert!(matches!(result, Err(DataLoadError::ParseError { .. })));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
