pub mod handlers;
pub mod routes;

pub use routes::{create_router, create_router_with_sink, routes};
