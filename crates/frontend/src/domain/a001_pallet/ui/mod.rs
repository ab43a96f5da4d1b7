pub mod registration;
pub mod search;
pub mod stats;
pub mod viewer;

pub use registration::PalletRegistration;
pub use search::PalletSearch;
pub use stats::WarehouseStatsCard;
pub use viewer::WarehouseViewer;
