use std::path::{Path, PathBuf};

use crate::{parse_profile, Profile, ProfileError};

const DEFAULT_WORKSPACE_PATH: &str = ".config/skypad";
pub const PROFILE_FILE_NAME: &str = "skypad.yaml";

/// Locates and loads the profile.
///
/// Lookup order: an explicit path, `./skypad.yaml`, then
/// `$HOME/.config/skypad/skypad.yaml`. With no file found the built-in
/// defaults apply.
pub struct Workspace {
    profile_path: Option<PathBuf>,
}

impl Workspace {
    pub fn new(explicit: Option<&Path>) -> Result<Self, ProfileError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ProfileError::ProfileNotFound(path.display().to_string()));
            }
            return Ok(Self {
                profile_path: Some(path.to_owned()),
            });
        }

        let local = std::env::current_dir()?.join(PROFILE_FILE_NAME);
        if local.is_file() {
            return Ok(Self {
                profile_path: Some(local),
            });
        }

        let home = Self::default_path().map(|p| p.join(PROFILE_FILE_NAME));
        Ok(Self {
            profile_path: home.ok().filter(|p| p.is_file()),
        })
    }

    /// Path of the profile in use, if any.
    pub fn profile_path(&self) -> Option<&Path> {
        self.profile_path.as_deref()
    }

    pub fn load_profile(&self) -> Result<Profile, ProfileError> {
        match &self.profile_path {
            Some(path) => {
                let input = std::fs::read_to_string(path)?;
                parse_profile(&input)
            }
            None => Ok(Profile::default()),
        }
    }

    pub fn default_path() -> Result<PathBuf, ProfileError> {
        let path = std::env::var("HOME")
            .map(PathBuf::from)
            .map(|p| p.join(DEFAULT_WORKSPACE_PATH))
            .map_err(|_| ProfileError::EnvVarNotSet("HOME".to_string()))?;

        Ok(path)
    }
}
