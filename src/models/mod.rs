pub mod catalog;
pub mod company;
pub mod shift;
pub mod token;
pub mod webhook;

pub use catalog::{Category, Product};
pub use company::{Company, Site, Staff};
pub use shift::{Shift, ShiftBreak};
pub use token::TokenResponse;
pub use webhook::{
    parse_order_notification, parse_shift_notification, WebHook, WebHookFilter,
    TOPIC_ORDER_COMPLETED,
};
