use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, StageError};

pub const DEFAULT_ARCHIVE: &str = "wxWidgets-3.3.1.zip";
pub const DEFAULT_EXTRACT_ROOT: &str = "wxwidgets-extract";
pub const DEFAULT_DESTINATION: &str = "target/release/wxWidgets";
pub const DEFAULT_MARKER: &str = "configure";

/// Paths the stager works on. Relative paths resolve against the working directory.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageConfig {
    /// Zip archive to unpack.
    pub archive: PathBuf,
    /// Scratch directory receiving the raw archive contents.
    pub extract_root: PathBuf,
    /// Final location of the staged source tree.
    pub destination: PathBuf,
    /// File that must sit at the top of the source tree.
    pub marker: String,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            archive: PathBuf::from(DEFAULT_ARCHIVE),
            extract_root: PathBuf::from(DEFAULT_EXTRACT_ROOT),
            destination: PathBuf::from(DEFAULT_DESTINATION),
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

impl StageConfig {
    /// Load a config from a TOML file. Missing keys keep their defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| StageError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&text).map_err(|e| StageError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn archive(mut self, archive: impl Into<PathBuf>) -> Self {
        self.archive = archive.into();
        self
    }

    pub fn extract_root(mut self, extract_root: impl Into<PathBuf>) -> Self {
        self.extract_root = extract_root.into();
        self
    }

    pub fn destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Reject configurations that would make a run destroy its own input.
    ///
    /// Paths are compared after making them absolute, dropping `.`/`..` and
    /// canonicalizing the longest existing prefix, so `.` and symlinked
    /// parents are caught as well.
    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            return Err(StageError::InvalidConfig("marker must not be empty".into()));
        }
        let mut components = Path::new(&self.marker).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(StageError::InvalidConfig(format!(
                "marker '{}' must be a single file name",
                self.marker
            )));
        }

        let archive = comparable_path(&self.archive)?;
        let extract_root = comparable_path(&self.extract_root)?;
        let destination = comparable_path(&self.destination)?;

        let nested = [
            (&destination, &extract_root, "destination", "extraction root"),
            (&extract_root, &destination, "extraction root", "destination"),
            (&archive, &extract_root, "archive", "extraction root"),
            (&archive, &destination, "archive", "destination"),
        ];
        for (inner, outer, inner_name, outer_name) in nested {
            if inner.starts_with(outer) {
                return Err(StageError::InvalidConfig(format!(
                    "{inner_name} '{}' lies inside {outer_name} '{}'",
                    inner.display(),
                    outer.display()
                )));
            }
        }
        Ok(())
    }
}

/// Absolute, lexically normalized form of `path` with its longest existing
/// prefix canonicalized.
fn comparable_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| {
        StageError::InvalidConfig(format!("cannot resolve '{}': {e}", path.display()))
    })?;

    let mut normal = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normal.pop();
            }
            other => normal.push(other.as_os_str()),
        }
    }

    let mut existing = normal.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(mut canonical) = existing.canonicalize() {
            canonical.extend(missing.iter().rev());
            return Ok(canonical);
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => return Ok(normal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_bundled_archive() {
        let config = StageConfig::default();
        assert_eq!(config.archive, Path::new("wxWidgets-3.3.1.zip"));
        assert_eq!(config.extract_root, Path::new("wxwidgets-extract"));
        assert_eq!(config.destination, Path::new("target/release/wxWidgets"));
        assert_eq!(config.marker, "configure");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stage.toml");
        std::fs::write(&path, "archive = \"lib-9.9.9.zip\"\n").unwrap();

        let config = StageConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.archive, Path::new("lib-9.9.9.zip"));
        assert_eq!(config.marker, "configure");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stage.toml");
        std::fs::write(&path, "archvie = \"typo.zip\"\n").unwrap();

        let err = StageConfig::from_toml_file(&path).unwrap_err();
        assert!(matches!(err, StageError::ConfigParse { .. }));
    }

    #[test]
    fn missing_config_file() {
        let err = StageConfig::from_toml_file("/nonexistent/stage.toml").unwrap_err();
        assert!(matches!(err, StageError::ConfigRead { .. }));
    }

    #[test]
    fn marker_must_be_file_name() {
        for marker in ["", ".", "..", "sub/configure"] {
            let config = StageConfig::default().marker(marker);
            assert!(
                matches!(config.validate(), Err(StageError::InvalidConfig(_))),
                "marker {marker:?} should be rejected"
            );
        }
    }

    #[test]
    fn nested_paths_are_rejected() {
        let config = StageConfig::default()
            .extract_root("scratch")
            .destination("scratch/out");
        assert!(config.validate().is_err());

        let config = StageConfig::default()
            .extract_root("out/scratch")
            .destination("out");
        assert!(config.validate().is_err());
    }

    #[test]
    fn current_dir_components_do_not_hide_nesting() {
        let config = StageConfig::default().extract_root(".");
        assert!(matches!(config.validate(), Err(StageError::InvalidConfig(_))));

        let config = StageConfig::default()
            .extract_root("./target")
            .destination("target/release/x");
        assert!(matches!(config.validate(), Err(StageError::InvalidConfig(_))));

        let config = StageConfig::default()
            .extract_root("scratch/../target")
            .destination("target/release/x");
        assert!(matches!(config.validate(), Err(StageError::InvalidConfig(_))));
    }

    #[test]
    fn archive_inside_extract_root_is_rejected() {
        let config = StageConfig::default()
            .archive("scratch/lib.zip")
            .extract_root("scratch");
        assert!(matches!(config.validate(), Err(StageError::InvalidConfig(_))));

        let config = StageConfig::default()
            .archive("./scratch/lib.zip")
            .extract_root("scratch/");
        assert!(matches!(config.validate(), Err(StageError::InvalidConfig(_))));
    }

    #[test]
    fn archive_inside_destination_is_rejected() {
        let config = StageConfig::default().archive("target/release/wxWidgets/wx.zip");
        assert!(matches!(config.validate(), Err(StageError::InvalidConfig(_))));
    }

    #[test]
    fn sibling_paths_pass() {
        let dir = tempfile::tempdir().unwrap();
        let config = StageConfig::default()
            .archive(dir.path().join("lib.zip"))
            .extract_root(dir.path().join("lib-extract"))
            .destination(dir.path().join("lib-extract-out"));
        config.validate().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_alias_is_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("scratch");
        std::fs::create_dir(&scratch).unwrap();
        std::os::unix::fs::symlink(&scratch, dir.path().join("alias")).unwrap();

        let config = StageConfig::default()
            .archive(dir.path().join("lib.zip"))
            .extract_root(&scratch)
            .destination(dir.path().join("alias/out"));
        assert!(matches!(config.validate(), Err(StageError::InvalidConfig(_))));
    }
}
