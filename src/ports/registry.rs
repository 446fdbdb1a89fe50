//! Version resolver port for turning version ranges into exact versions.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`VersionResolver::resolve`].
pub type ResolveFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Resolves a package's version range to one concrete published version.
pub trait VersionResolver: Send + Sync {
    /// Resolves `range` for the package `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is unreachable or no published
    /// version satisfies the range.
    fn resolve(&self, name: &str, range: &str) -> ResolveFuture<'_>;
}
