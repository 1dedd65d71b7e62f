use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the application home directory.
///
/// `explicit` wins when given (a leading `~` is expanded against `$HOME`, relative paths are
/// made absolute against the current directory). Otherwise `$HOME/<default_subdir>` is used.
pub fn resolve_home_dir(
    explicit: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let path = match explicit {
        Some(raw) => expand_tilde(raw.trim())?,
        None => user_home()?.join(default_subdir),
    };

    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .context("cannot read current directory")?
            .join(path)
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("cannot create home dir {}", path.display()))?;
    }
    Ok(path)
}

fn user_home() -> Result<PathBuf> {
    #[cfg(windows)]
    let var = "APPDATA";
    #[cfg(not(windows))]
    let var = "HOME";

    std::env::var_os(var)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("{var} is not set; configure server.home_dir explicitly"))
}

fn expand_tilde(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return user_home();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => Ok(user_home()?.join(rest)),
        None => Ok(Path::new(raw).to_path_buf()),
    }
}
