pub mod chat;
pub mod configure;
pub mod context;
pub mod download;
pub mod form;
pub mod init;
pub mod preview;
pub mod render;
pub mod serve;
pub mod sites;
