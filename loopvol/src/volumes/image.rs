//! Backing image store.
//!
//! Maps a volume identifier to `<staging_dir>/<identifier>.img` and creates a
//! sparse image there on first use.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use loopvol_shared::constants::image::{EXTENSION, SIZE_BYTES};
use loopvol_shared::errors::{LoopvolError, LoopvolResult};

/// Backing image for one volume.
///
/// An image created by [`ImageStore::ensure_image`] is removed again on drop
/// unless [`VolumeImage::persist`] is called, so a half-provisioned volume
/// (created but never bound or formatted) does not survive a failed attach.
/// Images that already existed are never removed.
#[derive(Debug)]
pub struct VolumeImage {
    path: PathBuf,
    created: bool,
    persistent: bool,
}

impl VolumeImage {
    /// Get the image path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if this call allocated the image (it still needs formatting).
    pub fn was_created(&self) -> bool {
        self.created
    }

    /// Keep the image on disk and return its path.
    pub fn persist(mut self) -> PathBuf {
        self.persistent = true;
        self.path.clone()
    }
}

impl Drop for VolumeImage {
    fn drop(&mut self) {
        if !self.created || self.persistent {
            return;
        }

        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::info!("Rolled back image {}", self.path.display()),
            Err(e) => tracing::warn!("Failed to roll back image {}: {}", self.path.display(), e),
        }
    }
}

/// Creates and locates backing images under a staging directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    staging_dir: PathBuf,
}

impl ImageStore {
    pub fn new(staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
        }
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Path of the backing image for `volume_id`.
    ///
    /// Pure function of the identifier. Identifiers that are empty or would
    /// resolve outside the staging directory are rejected.
    pub fn image_path(&self, volume_id: &str) -> LoopvolResult<PathBuf> {
        validate_volume_id(volume_id)?;
        Ok(self
            .staging_dir
            .join(format!("{}.{}", volume_id, EXTENSION)))
    }

    /// Return the image for `volume_id`, allocating it if absent.
    ///
    /// A new image is a sparse file of exactly 3 GiB. An existing file is
    /// returned untouched whatever its size or content.
    pub fn ensure_image(&self, volume_id: &str) -> LoopvolResult<VolumeImage> {
        let path = self.image_path(volume_id)?;

        std::fs::create_dir_all(&self.staging_dir).map_err(|e| {
            LoopvolError::Unexpected(format!(
                "Failed to create staging directory {}: {}",
                self.staging_dir.display(),
                e
            ))
        })?;

        // create_new makes the existence check and the creation one step
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                tracing::debug!("Image {} already exists", path.display());
                return Ok(VolumeImage {
                    path,
                    created: false,
                    persistent: true,
                });
            }
            Err(e) => {
                return Err(LoopvolError::Unexpected(format!(
                    "Failed to create image {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        // From here on the drop guard removes the file if allocation fails
        let image = VolumeImage {
            path,
            created: true,
            persistent: false,
        };

        file.set_len(SIZE_BYTES).map_err(|e| {
            LoopvolError::Unexpected(format!(
                "Failed to allocate image {}: {}",
                image.path.display(),
                e
            ))
        })?;

        tracing::info!(
            "Created sparse image {} ({} bytes)",
            image.path.display(),
            SIZE_BYTES
        );

        Ok(image)
    }
}

fn validate_volume_id(volume_id: &str) -> LoopvolResult<()> {
    if volume_id.is_empty() {
        return Err(LoopvolError::InvalidArgument(
            "must specify project_id".to_string(),
        ));
    }

    // The extension keeps "." and ".." inside the staging dir
    if volume_id.contains(['/', '\0']) {
        return Err(LoopvolError::InvalidArgument(format!(
            "project_id '{}' is not a valid file name",
            volume_id.escape_default()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loopvol_shared::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_image_path_is_derived_from_id() {
        let store = ImageStore::new("/var/lib/loopvol");
        assert_eq!(
            store.image_path("p1").unwrap(),
            PathBuf::from("/var/lib/loopvol/p1.img")
        );
        assert_eq!(store.image_path("p1").unwrap(), store.image_path("p1").unwrap());
    }

    #[test]
    fn test_image_path_rejects_invalid_ids() {
        let store = ImageStore::new("/tmp");
        for id in ["", "a/b", "../etc/passwd", "nul\0byte"] {
            let err = store.image_path(id).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "id {:?}", id);
        }
    }

    #[test]
    fn test_dot_ids_stay_in_staging_dir() {
        let store = ImageStore::new("/var/lib/loopvol");
        assert_eq!(
            store.image_path(".").unwrap(),
            PathBuf::from("/var/lib/loopvol/..img")
        );
        assert_eq!(
            store.image_path("..").unwrap(),
            PathBuf::from("/var/lib/loopvol/...img")
        );
    }

    #[test]
    fn test_ensure_image_creates_sparse_file_once() {
        let temp_dir = TempDir::new().unwrap();
        let store = ImageStore::new(temp_dir.path());

        let first = store.ensure_image("p1").unwrap();
        assert!(first.was_created());
        let path = first.persist();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), SIZE_BYTES);

        let second = store.ensure_image("p1").unwrap();
        assert!(!second.was_created());
        assert_eq!(second.path(), path.as_path());
    }

    #[test]
    fn test_ensure_image_keeps_existing_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let store = ImageStore::new(temp_dir.path());
        let path = temp_dir.path().join("p2.img");
        std::fs::write(&path, b"not an image").unwrap();

        let image = store.ensure_image("p2").unwrap();
        assert!(!image.was_created());
        drop(image);

        assert_eq!(std::fs::read(&path).unwrap(), b"not an image");
    }

    #[test]
    fn test_unpersisted_new_image_is_rolled_back() {
        let temp_dir = TempDir::new().unwrap();
        let store = ImageStore::new(temp_dir.path());

        let image = store.ensure_image("p3").unwrap();
        let path = image.path().to_path_buf();
        assert!(path.exists());

        drop(image);
        assert!(!path.exists());
    }

    #[test]
    fn test_ensure_image_creates_staging_dir() {
        let temp_dir = TempDir::new().unwrap();
        let staging = temp_dir.path().join("nested").join("images");
        let store = ImageStore::new(&staging);

        let image = store.ensure_image("p4").unwrap();
        assert!(image.was_created());
        assert!(staging.join("p4.img").exists());
        image.persist();
    }

    #[test]
    fn test_ensure_image_invalid_id_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let store = ImageStore::new(temp_dir.path());

        assert!(store.ensure_image("").is_err());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
