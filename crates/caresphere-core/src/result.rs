//! Result type aliases for the CareSphere content service.

use crate::CareError;

/// A specialized `Result` type for CareSphere operations.
pub type CareResult<T> = Result<T, CareError>;

/// A boxed future returning a `CareResult`.
pub type BoxFuture<'a, T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = CareResult<T>> + Send + 'a>>;
