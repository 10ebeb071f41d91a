pub mod admin;
pub mod feed;
pub mod notifications;
pub mod post;
pub mod store;
pub mod user;
