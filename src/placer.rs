use crate::errors::PlacementError;
use crate::models::{Classification, Placement};
use std::path::{Path, PathBuf};

/// Moves a classified file into `<organized-root>/<category>/<new_filename>`.
pub struct Placer {
    organized_root: PathBuf,
    overwrite: bool,
}

impl Placer {
    pub fn new<P: Into<PathBuf>>(organized_root: P, overwrite: bool) -> Self {
        Self {
            organized_root: organized_root.into(),
            overwrite,
        }
    }

    pub fn organized_root(&self) -> &Path {
        &self.organized_root
    }

    /// Destination a classification would be shelved at, without moving
    /// anything. Used for dry-run previews.
    pub fn destination_for(&self, classification: &Classification) -> PathBuf {
        self.organized_root
            .join(&classification.category)
            .join(&classification.new_filename)
    }

    /// Move the file at `current` into its category folder.
    ///
    /// Directory creation is idempotent and safe under concurrent calls for
    /// the same category. The move is a rename: either it fully succeeds or
    /// the source stays where it was.
    pub async fn place(
        &self,
        current: &Path,
        classification: &Classification,
    ) -> Result<Placement, PlacementError> {
        // The classifier already rejects these; re-check as a last line of
        // defense before touching the filesystem
        let name = classification.new_filename.as_str();
        if name.contains(['/', '\\', '\0']) || name == "." || name == ".." {
            return Err(PlacementError::Move {
                from: current.to_path_buf(),
                reason: format!("filename is not a plain file name: {:?}", name),
            });
        }

        let target_dir = self.organized_root.join(&classification.category);
        tokio::fs::create_dir_all(&target_dir)
            .await
            .map_err(|e| PlacementError::Move {
                from: current.to_path_buf(),
                reason: format!("failed to create {}: {}", target_dir.display(), e),
            })?;

        let destination = target_dir.join(&classification.new_filename);
        if !self.overwrite && destination.exists() {
            return Err(PlacementError::DestinationExists { path: destination });
        }

        tokio::fs::rename(current, &destination)
            .await
            .map_err(|e| PlacementError::Move {
                from: current.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(Placement { destination })
    }
}
