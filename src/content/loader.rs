//! Loader for the RON tuning file at startup.

use ron::Options;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::data::TuningFile;

/// Error type for content loading failures.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("Failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },
}

impl ContentLoadError {
    pub fn file(&self) -> &str {
        match self {
            ContentLoadError::Io { file, .. } | ContentLoadError::Parse { file, .. } => file,
        }
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

pub fn parse_tuning(source: &str, file_name: &str) -> Result<TuningFile, ContentLoadError> {
    ron_options()
        .from_str(source)
        .map_err(|e| ContentLoadError::Parse {
            file: file_name.to_string(),
            message: e.to_string(),
        })
}

pub fn load_tuning_file(path: &Path) -> Result<TuningFile, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        file: file_name.clone(),
        source,
    })?;
    parse_tuning(&contents, &file_name)
}
