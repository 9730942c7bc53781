pub mod kounta_client;
pub mod pagination;

pub use kounta_client::KountaClient;
pub use pagination::Pages;
