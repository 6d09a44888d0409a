pub mod debounce;
pub mod search;
pub mod suggestions;
pub mod url_params;

pub use search::use_package_search;
pub use suggestions::use_suggestions;
pub use url_params::{UrlState, provide_url_state, use_url_state};
