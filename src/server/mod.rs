pub mod router;
pub mod routes;

pub use router::{VaxportState, vaxport_router};
