pub mod article;
pub mod audit;
pub mod banner;
pub mod config;
pub mod consts;
pub mod dates;
pub mod dom;
pub mod engine;
pub mod events;
pub mod export;
pub mod fetch;
pub mod server;
pub mod sources;
pub mod store;
