use diffmap_core::{AnalysisBundle, Result};
use std::path::{Path, PathBuf};

/// Writes the bundle as pretty-printed JSON to `path`.
pub fn write_bundle(bundle: &AnalysisBundle, path: &Path) -> Result<()> {
    let json = bundle.to_json_pretty()?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), "Wrote analysis bundle");
    Ok(())
}

/// Timestamped path inside `dir` using the standard export file name.
pub fn default_export_path(bundle: &AnalysisBundle, dir: &Path) -> PathBuf {
    dir.join(bundle.export_file_name())
}
