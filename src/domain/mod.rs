pub mod ids;
pub(crate) mod nullable;
pub mod order;
pub mod ports;

pub use ids::ResourceId;
pub use order::{
    Order, OrderCustomer, OrderLine, OrderLineProduct, OrderPayment, OrderPaymentMethod,
};
pub use ports::{ApiRequest, ApiResponse, RequestBody, Transport, NEXT_PAGE_HEADER};
