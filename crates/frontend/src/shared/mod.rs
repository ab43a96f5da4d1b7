pub mod api_utils;
pub mod components;
pub mod icons;
pub mod print_window;
pub mod reason_text;
pub mod warehouse_state;
