mod fs;
mod http;
mod registry;

pub use fs::FsAdapter;
pub use http::HttpAdapter;
pub use registry::AttachedRegistry;
