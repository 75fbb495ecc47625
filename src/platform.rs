use std::path::{Path, PathBuf};

use crate::error::Error;

/// Operating system identifier used by path resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    MacOs,
    Windows,
    Linux,
}

impl Os {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            // Unknown platforms get Linux-style paths rather than an error.
            Self::Linux
        }
    }
}

/// Read-only snapshot of the platform facts path resolution depends on.
///
/// Resolution itself performs no I/O; tests build this struct directly
/// against a temp directory instead of mutating `HOME`.
#[derive(Debug, Clone)]
pub struct Platform {
    pub os: Os,
    pub home: Option<PathBuf>,
    pub appdata: Option<PathBuf>,
    pub xdg_config_home: Option<PathBuf>,
    pub cwd: PathBuf,
}

impl Platform {
    /// Snapshot the current process environment.
    pub fn current() -> Self {
        Self {
            os: Os::current(),
            home: dirs::home_dir(),
            appdata: std::env::var_os("APPDATA").map(PathBuf::from),
            xdg_config_home: std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Convenience constructor for tests: everything rooted under `home`,
    /// project scope rooted under `cwd`.
    pub fn rooted(home: &Path, cwd: &Path) -> Self {
        Self {
            os: Os::Linux,
            home: Some(home.to_path_buf()),
            appdata: None,
            xdg_config_home: None,
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn home(&self) -> Result<&Path, Error> {
        self.home
            .as_deref()
            .ok_or_else(|| Error::Config("cannot determine the user home directory".into()))
    }

    /// Platform application-support directory:
    /// macOS `~/Library/Application Support`, Windows `%APPDATA%`,
    /// everything else `$XDG_CONFIG_HOME` or `~/.config`.
    pub fn app_support_dir(&self) -> Result<PathBuf, Error> {
        match self.os {
            Os::MacOs => Ok(self.home()?.join("Library").join("Application Support")),
            Os::Windows => match &self.appdata {
                Some(appdata) => Ok(appdata.clone()),
                None => Ok(self.home()?.join("AppData").join("Roaming")),
            },
            Os::Linux => self.config_dir(),
        }
    }

    /// `$XDG_CONFIG_HOME` when set, `~/.config` otherwise. Used as-is on
    /// every OS by the clients that follow the XDG convention everywhere.
    pub fn config_dir(&self) -> Result<PathBuf, Error> {
        match &self.xdg_config_home {
            Some(xdg) => Ok(xdg.clone()),
            None => Ok(self.home()?.join(".config")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(os: Os) -> Platform {
        Platform {
            os,
            home: Some(PathBuf::from("/home/u")),
            appdata: None,
            xdg_config_home: None,
            cwd: PathBuf::from("/work"),
        }
    }

    #[test]
    fn app_support_dir_per_os() {
        assert_eq!(
            facts(Os::MacOs).app_support_dir().expect("macos path"),
            PathBuf::from("/home/u/Library/Application Support")
        );
        assert_eq!(
            facts(Os::Windows).app_support_dir().expect("windows path"),
            PathBuf::from("/home/u/AppData/Roaming")
        );
        assert_eq!(
            facts(Os::Linux).app_support_dir().expect("linux path"),
            PathBuf::from("/home/u/.config")
        );
    }

    #[test]
    fn xdg_override_wins() {
        let mut p = facts(Os::Linux);
        p.xdg_config_home = Some(PathBuf::from("/custom/cfg"));
        assert_eq!(p.config_dir().expect("config dir"), PathBuf::from("/custom/cfg"));
    }

    #[test]
    fn windows_appdata_env_wins_over_fallback() {
        let mut p = facts(Os::Windows);
        p.appdata = Some(PathBuf::from("C:/Users/u/AppData/Roaming"));
        assert_eq!(
            p.app_support_dir().expect("appdata"),
            PathBuf::from("C:/Users/u/AppData/Roaming")
        );
    }

    #[test]
    fn missing_home_is_a_config_error() {
        let p = Platform {
            os: Os::Linux,
            home: None,
            appdata: None,
            xdg_config_home: None,
            cwd: PathBuf::from("/work"),
        };
        assert!(matches!(p.home(), Err(Error::Config(_))));
    }
}
