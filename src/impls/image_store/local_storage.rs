use crate::core::ports::image_store::ImageStore;
use crate::error::Error;
use log::debug;
use std::fs::remove_file;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Images served from a local directory under `<url_host>/static/`.
pub struct LocalImageStorage {
    prefix: String,
    dir: PathBuf,
}

impl LocalImageStorage {
    pub fn new(url_host: &str, dir: impl Into<PathBuf>) -> Self {
        Self {
            prefix: format!("{}/static/", url_host.trim_end_matches('/')),
            dir: dir.into(),
        }
    }

    /// Local path of an image URL, `None` if the URL does not point into this storage.
    pub fn local_path(&self, url: &str) -> Option<PathBuf> {
        let relative = Path::new(url.strip_prefix(&self.prefix)?);
        if relative.as_os_str().is_empty() || !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }
        Some(self.dir.join(relative))
    }
}

impl ImageStore for LocalImageStorage {
    async fn remove(&self, url: &str) -> Result<(), Error> {
        let Some(path) = self.local_path(url) else {
            debug!("skip image outside of static storage: {}", url);
            return Ok(());
        };
        match remove_file(&path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
