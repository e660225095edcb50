use std::path::PathBuf;

/// Where scan sources and the denylist get their platform paths from.
///
/// Every method is a read-only view of the environment. Core algorithms only
/// see this trait, so tests and embedders can point a scan at any tree.
pub trait PathRoots: Send + Sync {
    fn home_dir(&self) -> Option<PathBuf>;

    /// Used to resolve `{username}` in denylist entries.
    fn username(&self) -> Option<String>;

    /// OS and user temp directories. May contain duplicates.
    fn temp_dirs(&self) -> Vec<PathBuf>;

    /// Machine-wide temp directory (`C:\Windows\Temp`).
    fn system_temp_dir(&self) -> Option<PathBuf>;

    /// Volume roots such as `C:\`. Recycle bins live directly below them.
    fn volume_roots(&self) -> Vec<PathBuf>;

    /// `%LOCALAPPDATA%`; browsers keep their caches here.
    fn local_app_data(&self) -> Option<PathBuf> {
        self.home_dir().map(|h| h.join("AppData").join("Local"))
    }
}

/// Reads the live process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRoots;

impl SystemRoots {
    fn env_dir(var: &str) -> Option<PathBuf> {
        std::env::var_os(var)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}

impl PathRoots for SystemRoots {
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn username(&self) -> Option<String> {
        ["USERNAME", "USER"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|name| !name.is_empty())
    }

    fn temp_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = ["TEMP", "TMP"]
            .iter()
            .filter_map(|var| Self::env_dir(var))
            .collect();
        dirs.push(std::env::temp_dir());
        if let Some(system) = self.system_temp_dir().filter(|p| p.exists()) {
            dirs.push(system);
        }
        dirs
    }

    #[cfg(windows)]
    fn system_temp_dir(&self) -> Option<PathBuf> {
        let system_root =
            Self::env_dir("SystemRoot").unwrap_or_else(|| PathBuf::from(r"C:\Windows"));
        Some(system_root.join("Temp"))
    }

    #[cfg(not(windows))]
    fn system_temp_dir(&self) -> Option<PathBuf> {
        Some(PathBuf::from("/var/tmp"))
    }

    #[cfg(windows)]
    fn volume_roots(&self) -> Vec<PathBuf> {
        (b'A'..=b'Z')
            .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
            .filter(|root| root.exists())
            .collect()
    }

    #[cfg(not(windows))]
    fn volume_roots(&self) -> Vec<PathBuf> {
        vec![PathBuf::from("/")]
    }
}

/// Fully explicit roots, for tests and for callers that sandbox a scan.
#[derive(Debug, Clone, Default)]
pub struct FixedRoots {
    pub home: Option<PathBuf>,
    pub username: Option<String>,
    pub temp_dirs: Vec<PathBuf>,
    pub system_temp: Option<PathBuf>,
    pub volumes: Vec<PathBuf>,
}

impl FixedRoots {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
            ..Self::default()
        }
    }
}

impl PathRoots for FixedRoots {
    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn username(&self) -> Option<String> {
        self.username.clone()
    }

    fn temp_dirs(&self) -> Vec<PathBuf> {
        self.temp_dirs.clone()
    }

    fn system_temp_dir(&self) -> Option<PathBuf> {
        self.system_temp.clone()
    }

    fn volume_roots(&self) -> Vec<PathBuf> {
        self.volumes.clone()
    }
}
