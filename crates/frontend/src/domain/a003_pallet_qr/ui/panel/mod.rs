mod model;
mod view;
mod view_model;

pub use view::PalletQrPanel;
pub use view_model::PalletQrVm;
