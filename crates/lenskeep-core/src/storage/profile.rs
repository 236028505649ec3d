//! Profile store: discovery, persistence and selection of profiles

use crate::{
    Result,
    models::Profile,
    storage::PROFILE_FILE_NAME,
};
use std::path::{Path, PathBuf};

/// Sole owner of the profile collection and the profile documents on disk.
///
/// Each profile lives in `<cache_root>/<name>/profile.json`. At most one
/// profile is "current"; it is tracked as an index into the collection, so
/// mutating the current profile mutates the listed entity.
pub struct ProfileStore {
    cache_root: PathBuf,
    profiles: Vec<Profile>,
    current: Option<usize>,
}

impl ProfileStore {
    /// Open a store rooted at `cache_root`, creating the directory if
    /// absent and loading every profile found under it.
    pub fn open(cache_root: impl Into<PathBuf>) -> Result<Self> {
        let cache_root = cache_root.into();
        std::fs::create_dir_all(&cache_root)?;

        let mut store = Self {
            cache_root,
            profiles: Vec::new(),
            current: None,
        };
        store.profiles = store.discover_profiles()?;
        Ok(store)
    }

    /// Scan the cache root for profile directories and decode their
    /// documents. Entries that are not profile directories are skipped;
    /// a document that cannot be read or decoded is logged and skipped
    /// without aborting the scan.
    pub fn discover_profiles(&self) -> Result<Vec<Profile>> {
        let mut profiles = Vec::new();

        for entry in std::fs::read_dir(&self.cache_root)? {
            let entry = entry?;
            let entry_path = entry.path();
            if !self.is_profile_dir(&entry_path) {
                continue;
            }

            let profile_file = entry_path.join(PROFILE_FILE_NAME);
            match read_profile_file(&profile_file) {
                Ok(profile) => profiles.push(profile),
                Err(e) => {
                    tracing::warn!(
                        "Skipping unreadable profile document {}: {}",
                        profile_file.display(),
                        e
                    );
                }
            }
        }

        // Directory enumeration order is platform-dependent; sort for a
        // stable listing.
        profiles.sort_by(Profile::cmp_by_name);
        Ok(profiles)
    }

    /// True only for a direct child of the cache root that is a directory
    /// and contains a profile document. Both paths are canonicalized
    /// first, so symlinks and `..` segments cannot escape the root and a
    /// sibling whose name merely shares the root's prefix is rejected.
    pub fn is_profile_dir(&self, path: &Path) -> bool {
        let Ok(root) = std::fs::canonicalize(&self.cache_root) else {
            return false;
        };
        let Ok(resolved) = std::fs::canonicalize(path) else {
            return false;
        };

        if resolved.parent() != Some(root.as_path()) {
            return false;
        }

        resolved.is_dir() && resolved.join(PROFILE_FILE_NAME).is_file()
    }

    /// True iff `name` is usable as a new profile name: allowed character
    /// set and nothing already present at `cache_root/name`.
    pub fn is_valid_profile_name(&self, name: &str) -> bool {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
            && !self.cache_root.join(name).exists()
    }

    /// Persist `profile` and append it to the collection. A failed write
    /// leaves the collection untouched.
    pub fn add_profile(&mut self, profile: Profile) -> Result<()> {
        self.write_profile(&profile)?;
        self.profiles.push(profile);
        Ok(())
    }

    /// Serialize the profile's current in-memory state to its document
    /// file, creating the profile directory (and the cache root) if
    /// needed. Write errors propagate to the caller.
    pub fn write_profile(&self, profile: &Profile) -> Result<()> {
        let profile_dir = self.cache_root.join(&profile.name);
        std::fs::create_dir_all(&profile_dir)?;

        let profile_path = profile_dir.join(PROFILE_FILE_NAME);
        let content = serde_json::to_string_pretty(profile)?;
        std::fs::write(profile_path, content)?;

        Ok(())
    }

    /// Persist `profile`. Callers are expected to pass the current
    /// profile; anything else is logged as a consistency warning, but the
    /// write still proceeds.
    pub fn update_profile(&self, profile: &Profile) -> Result<()> {
        if self.current_profile() != Some(profile) {
            tracing::warn!(
                "Updating profile '{}' which is not the current profile",
                profile.name
            );
        }
        self.write_profile(profile)
    }

    /// Delete the profile's directory subtree, remove the profile from
    /// the collection, and clear the current-profile selection if it
    /// pointed at the removed entry. Filesystem failures during deletion
    /// are logged and do not prevent the in-memory removal.
    pub fn remove_profile(&mut self, profile: &Profile) {
        self.delete_profile_files(profile);

        if let Some(index) = self.profiles.iter().position(|p| p == profile) {
            self.profiles.remove(index);
            match self.current {
                Some(current) if current == index => self.current = None,
                Some(current) if current > index => self.current = Some(current - 1),
                _ => {}
            }
        }
    }

    fn delete_profile_files(&self, profile: &Profile) {
        let profile_dir = self.cache_root.join(&profile.name);

        if !profile_dir.exists() {
            tracing::warn!(
                "Profile directory {} does not exist, skipping deletion",
                profile_dir.display()
            );
            return;
        }

        if let Err(e) = std::fs::remove_dir_all(&profile_dir) {
            tracing::error!(
                "Failed to remove profile directory {}: {}",
                profile_dir.display(),
                e
            );
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn profile_by_name(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Select the profile with the given name as current. An unknown name
    /// clears the selection.
    pub fn set_current_profile(&mut self, name: &str) {
        self.current = self.profiles.iter().position(|p| p.name == name);
    }

    pub fn current_profile(&self) -> Option<&Profile> {
        self.current.and_then(|i| self.profiles.get(i))
    }

    pub fn current_profile_mut(&mut self) -> Option<&mut Profile> {
        self.current.and_then(|i| self.profiles.get_mut(i))
    }

    /// Set the current profile's `logged_in` flag and persist it. No-op
    /// when no profile is current.
    pub fn set_current_profile_logged_in(&mut self, logged_in: bool) -> Result<()> {
        let Some(index) = self.current else {
            return Ok(());
        };
        self.profiles[index].logged_in = logged_in;
        self.write_profile(&self.profiles[index])
    }
}

fn read_profile_file(path: &Path) -> Result<Profile> {
    let content = std::fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&content)?;
    Ok(profile)
}
