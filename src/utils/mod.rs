// Start of file: /src/utils/mod.rs

/*
    * Cross-cutting helpers: layer error mapping and the error envelope
    * middleware.
*/

pub mod error_handler;
pub mod response_handler;

// End of file: /src/utils/mod.rs
