//! Startup services for the prediction server.

pub mod model;
