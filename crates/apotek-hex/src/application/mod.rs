pub mod auth_service;
pub mod cart_service;
pub mod order_service;
pub mod password;
pub mod product_service;
pub mod review_service;
pub mod token;
pub mod transaction_service;
pub mod user_service;
