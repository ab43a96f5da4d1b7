//! Pallet lookup by scan code, with removal of the found pallet

mod model;
mod view;
mod view_model;

pub use view::PalletSearch;
pub use view_model::PalletSearchVm;
