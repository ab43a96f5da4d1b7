//! Pallet registration form
//!
//! Simplified MVVM pattern implementation:
//! - model.rs: API call and form DTO
//! - view_model.rs: form state, local validation, submit command
//! - view.rs: Leptos component (pure UI)

mod model;
mod view;
mod view_model;

pub use view::PalletRegistration;
pub use view_model::PalletRegistrationVm;
