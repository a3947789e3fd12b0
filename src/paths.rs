use std::path::PathBuf;

/// Base directory for settings and logs: next to the executable when that
/// can be resolved, else the working directory. The `IMGPRESS_HOME`
/// environment variable overrides both.
pub fn writable_base() -> PathBuf {
    if let Some(home) = std::env::var_os("IMGPRESS_HOME") {
        return PathBuf::from(home);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.to_path_buf();
        }
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Resolves a path relative to the writable base, creating intermediate
/// directories as needed (e.g. `logs/` for a log file).
pub fn writable_path(relative: &str) -> PathBuf {
    let full = writable_base().join(relative);
    if let Some(parent) = full.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    full
}
