pub mod buttons;
pub mod chart;
pub mod error_display;
pub mod package_header;
pub mod search_box;
pub mod version_filter;
pub mod versions_table;

pub use buttons::{Button, ButtonVariant};
pub use chart::PopularityChart;
pub use error_display::ErrorDisplay;
pub use package_header::PackageHeader;
pub use search_box::SearchBox;
pub use version_filter::VersionFilter;
pub use versions_table::VersionsTable;
