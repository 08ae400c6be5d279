//! Client for a recipe / inventory / shopping-list REST API with optimistic
//! local mutations.

pub mod gateway;
pub mod grouping;
pub mod model;
pub mod mutation;
pub mod notify;
pub mod remote;
pub mod session;
pub mod store;
pub mod telemetry;
