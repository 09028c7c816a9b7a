mod api;
mod vaxport;

pub use api::{ApiError, OrInternal};
pub use vaxport::VaxportError;
pub(crate) use vaxport::is_unique_violation;
