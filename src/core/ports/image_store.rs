use crate::error::Error;

/// Storage holding the image files referenced by surveys, addressed by their public URL.
pub trait ImageStore {
    /// Removes the file behind `url`. A file that is already gone is not an error.
    async fn remove(&self, url: &str) -> Result<(), Error>;
}
