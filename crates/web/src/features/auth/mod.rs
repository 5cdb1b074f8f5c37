mod handlers;
mod routes;
mod services;

pub use handlers::*;
pub use routes::routes;
