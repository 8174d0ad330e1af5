use anyhow::Result;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Compute the blake3 hash of a file's contents.
pub fn file_fingerprint(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(hasher.finalize().to_hex().to_string())
}

/// Get the file extension (without the dot, lowercased).
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

/// Pick an inbox path for `filename`, suffixing a short content fingerprint
/// when the plain name is already taken. Keeps two in-flight uploads with
/// the same name from clobbering each other.
pub fn collision_free_path(dir: &Path, filename: &str, fingerprint: &str) -> PathBuf {
    let plain = dir.join(filename);
    if !plain.exists() {
        return plain;
    }

    let tag: String = fingerprint.chars().take(8).collect();
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    let suffixed = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}-{}.{}", stem, tag, ext),
        None => format!("{}-{}", stem, tag),
    };
    dir.join(suffixed)
}
