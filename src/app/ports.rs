use crate::error::FetchFailure;

/// Source of listing pages.
///
/// Implementations own their retry policy; a returned `FetchFailure` means
/// every attempt has already been spent.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchFailure>;
}

impl<F: PageFetcher + ?Sized> PageFetcher for &F {
    fn fetch(&self, url: &str) -> Result<String, FetchFailure> {
        (**self).fetch(url)
    }
}

impl<F: PageFetcher + ?Sized> PageFetcher for Box<F> {
    fn fetch(&self, url: &str) -> Result<String, FetchFailure> {
        (**self).fetch(url)
    }
}
