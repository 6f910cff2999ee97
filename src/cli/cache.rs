//! Cache management command implementations

use crate::cache::CacheStorage;
use crate::config::Config;
use crate::error::Result;

pub fn path(config_path: Option<&str>) -> Result<()> {
    println!("{}", Config::cache_root(config_path)?.display());
    Ok(())
}

pub fn clear(config_path: Option<&str>) -> Result<()> {
    let store = CacheStorage::open_at(&Config::cache_root(config_path)?);
    let removed = store.clear()?;
    println!("Cleared {removed} cached file(s)");
    Ok(())
}
