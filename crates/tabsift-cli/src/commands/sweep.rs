use std::path::PathBuf;
use tabsift_core::session::SessionStore;

pub fn run(store: Option<PathBuf>) -> Result<(), tabsift_core::error::TabsiftError> {
    let store = super::open_store(store)?;
    let removed = store.sweep_expired()?;
    println!(
        "Removed {} expired analysis session(s) from {}",
        removed,
        store.dir().display()
    );
    Ok(())
}
