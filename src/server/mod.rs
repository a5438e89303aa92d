pub mod app;
pub mod deserializers;
pub mod errors;
mod routes;
