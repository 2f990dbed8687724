use std::iter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Check that `script` may be written without clobbering the model or the
/// profile it was compiled from.
pub fn guard_script_output(script: &Path, model: &Path, profile: Option<&Path>) -> Result<()> {
    if script.is_dir() {
        bail!("script output {} is a directory", script.display());
    }
    let target = resolve(script)?;

    for (role, source) in iter::once(("model", model)).chain(profile.map(|p| ("profile", p))) {
        if resolve(source)? == target {
            bail!(
                "refusing to overwrite {role} {} with the compiled script",
                source.display()
            );
        }
    }
    Ok(())
}

/// Absolute, symlink-free form of `path`. A file that does not exist yet is
/// resolved through its parent directory.
fn resolve(path: &Path) -> Result<PathBuf> {
    if let Ok(real) = path.canonicalize() {
        return Ok(real);
    }
    let absolute = std::path::absolute(path)
        .with_context(|| format!("cannot resolve {}", path.display()))?;
    let (Some(dir), Some(name)) = (absolute.parent(), absolute.file_name()) else {
        return Ok(absolute);
    };
    match dir.canonicalize() {
        Ok(real_dir) => Ok(real_dir.join(name)),
        Err(_) => Ok(absolute),
    }
}
