mod analysis;
mod auth;
mod board;
pub mod dispatch;
mod download;
mod exam;
mod shared;
mod upload;
