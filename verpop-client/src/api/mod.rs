pub mod registry;

pub use registry::BrowserRegistry;
