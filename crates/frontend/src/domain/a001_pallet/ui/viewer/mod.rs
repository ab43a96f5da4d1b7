//! Warehouse occupancy grid
//!
//! - view_model.rs: grid derived from the shared snapshot, slot selection
//! - view.rs: sections, niches (top level first), floor spots

mod view;
mod view_model;

pub use view::WarehouseViewer;
pub use view_model::WarehouseViewerVm;
