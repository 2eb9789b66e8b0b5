//! Configuration for loading libnfc

use std::path::PathBuf;

/// Where to load libnfc from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibnfcConfig {
    /// Explicit path to the shared library; the platform candidates are tried when `None`
    pub library_path: Option<PathBuf>,
}

impl LibnfcConfig {
    /// Environment variable overriding the library path
    pub const ENV_LIBRARY_PATH: &'static str = "LIBNFC_PATH";

    /// Library names tried, in order, when no path is configured
    pub const CANDIDATES: &'static [&'static str] = &[
        "libnfc.so.6",
        "libnfc.so",
        "libnfc.6.dylib",
        "libnfc.dylib",
        "libnfc.dll",
    ];

    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration from the environment (`LIBNFC_PATH`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<std::ffi::OsString>) -> Self {
        Self {
            library_path: lookup(Self::ENV_LIBRARY_PATH)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Set the library path
    pub fn with_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_from_lookup() {
        let config = LibnfcConfig::from_lookup(|key| {
            (key == "LIBNFC_PATH").then(|| OsString::from("/opt/libnfc/lib/libnfc.so"))
        });
        assert_eq!(
            config.library_path,
            Some(PathBuf::from("/opt/libnfc/lib/libnfc.so"))
        );
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let config = LibnfcConfig::from_lookup(|_| Some(OsString::new()));
        assert_eq!(config, LibnfcConfig::default());
    }

    #[test]
    fn test_builder() {
        let config = LibnfcConfig::new().with_library_path("/usr/lib/libnfc.so.6");
        assert_eq!(
            config.library_path.as_deref(),
            Some(std::path::Path::new("/usr/lib/libnfc.so.6"))
        );
    }
}
