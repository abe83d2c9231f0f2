/*
* Data API: the single read-only `GET /data` endpoint.
*/

pub mod handler;
pub mod routes;

pub use routes::data_routes;
