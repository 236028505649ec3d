pub mod profile;

pub use profile::ProfileStore;

use std::path::PathBuf;

/// File name of the profile document inside each profile directory.
pub const PROFILE_FILE_NAME: &str = "profile.json";

pub fn get_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .expect("Could not find cache directory")
        .join("lenskeep")
}

pub fn init_cache_dir() -> crate::Result<PathBuf> {
    let cache_dir = get_cache_dir();
    std::fs::create_dir_all(&cache_dir)?;
    Ok(cache_dir)
}
