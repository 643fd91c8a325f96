pub mod activity;
pub mod card;
pub mod collection;
pub mod config;
pub mod init;
pub mod search;
pub mod theme;
