//! HTTP surface

mod routes;

pub use routes::router;
