pub mod reqwest_transport;

pub use reqwest_transport::{ReqwestTransport, MAX_REDIRECTS};
