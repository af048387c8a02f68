//! Platform detection from an explicit environment snapshot.
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::PlatformError;

/// How a Windows environment was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowsFlavor {
    /// Linux userland running under the Windows Subsystem for Linux.
    Wsl,
    /// A Windows-native shell (MSYS, Cygwin, Git Bash, cmd).
    Native,
}

/// Detected platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS.
    MacOs,
    /// Linux outside of WSL.
    Linux,
    /// Windows, native or through WSL.
    Windows(WindowsFlavor),
    /// Anything the environment did not identify.
    Unknown,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
            Self::Windows(WindowsFlavor::Wsl) => write!(f, "wsl"),
            Self::Windows(WindowsFlavor::Native) => write!(f, "windows"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            "windows" => Ok(Self::Windows(WindowsFlavor::Native)),
            "wsl" => Ok(Self::Windows(WindowsFlavor::Wsl)),
            "unknown" => Ok(Self::Unknown),
            _ => Err(PlatformError::UnknownTag(s.to_string())),
        }
    }
}

/// Non-empty lookup in an environment snapshot.
fn var<'a>(env: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

impl Platform {
    /// Detect the platform from an environment snapshot.
    ///
    /// Pure function: nothing is read from the running process, so every
    /// branch can be exercised with a hand-built map.
    #[must_use]
    pub fn detect(env: &HashMap<String, String>) -> Self {
        if var(env, "WSL_DISTRO_NAME").is_some() || var(env, "WSL_INTEROP").is_some() {
            return Self::Windows(WindowsFlavor::Wsl);
        }

        let ostype = var(env, "OSTYPE").unwrap_or_default().to_ascii_lowercase();
        if ostype.starts_with("darwin") {
            Self::MacOs
        } else if ostype.starts_with("linux") {
            Self::Linux
        } else if ["msys", "cygwin", "win32"]
            .iter()
            .any(|p| ostype.starts_with(p))
            || var(env, "OS") == Some("Windows_NT")
        {
            Self::Windows(WindowsFlavor::Native)
        } else {
            Self::Unknown
        }
    }

    /// Snapshot the process environment for [`Platform::detect`].
    ///
    /// `OSTYPE` is a shell variable that is rarely exported, so it is filled
    /// from the compile-time target OS when absent.
    #[must_use]
    pub fn process_env() -> HashMap<String, String> {
        let mut env: HashMap<String, String> = std::env::vars().collect();
        if var(&env, "OSTYPE").is_none() {
            let ostype = match std::env::consts::OS {
                "macos" => Some("darwin"),
                "linux" => Some("linux-gnu"),
                "windows" => Some("win32"),
                _ => None,
            };
            if let Some(ostype) = ostype {
                env.insert("OSTYPE".to_string(), ostype.to_string());
            }
        }
        env
    }

    /// Whether this is any Windows flavour.
    #[must_use]
    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows(_))
    }

    /// Whether this is WSL.
    #[must_use]
    pub const fn is_wsl(self) -> bool {
        matches!(self, Self::Windows(WindowsFlavor::Wsl))
    }

    /// Config section tags activated by this platform.
    ///
    /// `common` is always active; WSL activates both `linux` and `wsl`
    /// because its home directory is a Linux one.
    #[must_use]
    pub fn categories(self) -> Vec<String> {
        let tags: &[&str] = match self {
            Self::MacOs => &["common", "macos"],
            Self::Linux => &["common", "linux"],
            Self::Windows(WindowsFlavor::Wsl) => &["common", "linux", "wsl"],
            Self::Windows(WindowsFlavor::Native) => &["common", "windows"],
            Self::Unknown => &["common"],
        };
        tags.iter().map(|t| (*t).to_string()).collect()
    }
}
