//! Pipeline services
//!
//! The three core stages (collector, training, publisher) plus the two narrow
//! interfaces they talk through: the store's REST API and the artifact object
//! store. Both interfaces are traits so the stages can run against doubles in
//! tests.

pub mod collector;
pub mod object_store;
pub mod publisher;
pub mod store_api;
pub mod training;
