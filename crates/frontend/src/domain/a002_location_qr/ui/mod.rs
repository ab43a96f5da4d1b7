pub mod panel;

pub use panel::LocationQrPanel;
