pub mod api;
pub mod dto;
pub mod error;
pub mod model;
pub mod parser;
