pub mod auth_client;
pub mod search_client;

pub use auth_client::AuthClient;
pub use search_client::SearchClient;
