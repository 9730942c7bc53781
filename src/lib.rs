//! Client for the Kounta point-of-sale REST API.
//!
//! [`KountaClient`] maps each API call onto one request through a
//! [`Transport`]; [`ReqwestTransport`] is the production implementation.
//! Orders come back as [`Order`] values carrying their own tax and discount
//! aggregates.

pub mod application;
pub mod config;
pub mod domain;
pub mod endpoints;
pub mod errors;
pub mod infrastructure;
pub mod models;

pub use application::{KountaClient, Pages};
pub use config::KountaConfig;
pub use domain::{
    ApiRequest, ApiResponse, Order, OrderCustomer, OrderLine, OrderLineProduct, OrderPayment,
    OrderPaymentMethod, RequestBody, ResourceId, Transport,
};
pub use errors::{KountaError, KountaResult};
pub use infrastructure::ReqwestTransport;
pub use models::*;
