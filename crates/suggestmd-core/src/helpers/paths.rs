use std::path::PathBuf;

/// Expand a leading `~` to the home directory. Paths without a tilde, or when
/// no home directory can be determined, are returned unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(rest.trim_start_matches('/'));
        }
    }
    PathBuf::from(path)
}
