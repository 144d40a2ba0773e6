pub mod crawl_use_case;
pub mod ports;
