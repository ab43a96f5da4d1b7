mod view;

pub use view::WarehouseStatsCard;
