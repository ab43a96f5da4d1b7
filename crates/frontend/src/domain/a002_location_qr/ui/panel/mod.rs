//! Location QR codes: generate for the whole layout or a selection, then print
//!
//! - model.rs: API calls and selection parsing
//! - view_model.rs: section filter, selection, commands
//! - view.rs: Leptos component

mod model;
mod view;
mod view_model;

pub use view::LocationQrPanel;
pub use view_model::LocationQrVm;
