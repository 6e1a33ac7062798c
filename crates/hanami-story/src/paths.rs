use std::path::PathBuf;

use directories::ProjectDirs;

/// Platform-specific application directories (XDG on Unix-like systems,
/// the usual AppData locations on Windows).
pub struct ProjectPaths {
    dirs: ProjectDirs,
}

impl ProjectPaths {
    /// Resolve directories for the given application name. Returns None when
    /// no home directory can be determined.
    pub fn new(name: &str) -> Option<Self> {
        ProjectDirs::from("", "", name).map(|dirs| ProjectPaths { dirs })
    }

    pub fn config_dir(&self) -> PathBuf {
        self.dirs.config_dir().to_path_buf()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dirs.data_dir().to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_paths_resolve() {
        let paths = ProjectPaths::new("hanami");
        assert!(paths.is_some());
    }

    #[test]
    fn config_dir_contains_name() {
        if let Some(paths) = ProjectPaths::new("hanami") {
            assert!(paths.config_dir().to_string_lossy().contains("hanami"));
        }
    }

    #[test]
    fn data_dir_contains_name() {
        if let Some(paths) = ProjectPaths::new("hanami") {
            assert!(paths.data_dir().to_string_lossy().contains("hanami"));
        }
    }
}
