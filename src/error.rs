// SPDX-License-Identifier: MPL-2.0
use crate::window::SurfaceError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("State Error: {0}")]
    State(String),
    #[error("Surface Error: {0}")]
    Surface(#[from] SurfaceError),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let err: Error = std::io::Error::other("boom").into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            other => panic!("expected Io variant, got {other:?}"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn surface_error_converts_and_formats() {
        let err: Error = SurfaceError::Unavailable.into();
        assert!(matches!(err, Error::Surface(SurfaceError::Unavailable)));
        assert!(format!("{}", err).starts_with("Surface Error:"));
    }
}
