pub mod a001_pallet;
pub mod a002_location_qr;
pub mod a003_pallet_qr;
pub mod common;
