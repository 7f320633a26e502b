pub mod admin;
pub mod auth;
pub mod cache;
pub mod cart;
pub mod catalog;
pub mod contact;
pub mod orders;
pub mod payment;
pub mod session;
pub mod shared;
pub mod tickets;
pub mod user;
