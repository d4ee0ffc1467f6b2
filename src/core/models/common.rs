use crate::error::Error;
use std::ops::Range;

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    page: i64,
    size: i64,
}

impl Pagination {
    pub fn new(page: i64, size: i64) -> Result<Self, Error> {
        if page < 1 || size < 1 {
            return Err(Error::BusinessError(format!("invalid pagination: page={} size={}", page, size)));
        }
        Ok(Self { page, size })
    }

    /// Slice bounds of this page over `total` items, `None` when the page starts past the end.
    pub fn bounds(&self, total: usize) -> Option<Range<usize>> {
        let start = usize::try_from((self.page - 1).saturating_mul(self.size)).ok()?;
        if start >= total {
            return None;
        }
        let end = usize::try_from(self.page.saturating_mul(self.size)).map_or(total, |e| e.min(total));
        Some(start..end)
    }
}
