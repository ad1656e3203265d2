pub mod config;
pub mod logging;

pub mod catalog;
pub mod downloader;
pub mod link_list;
pub mod progress;
pub mod url_model;
