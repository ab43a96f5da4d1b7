pub mod events;
pub mod grid;
pub mod layout;
pub mod location;
pub mod qr;
pub mod reason;
pub mod stats;
