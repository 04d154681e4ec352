pub mod app;
pub mod core;
pub mod logtail;
pub mod registry;
pub mod scan;
pub mod snapshot;
pub mod summary;
