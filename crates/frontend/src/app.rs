use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::shared::warehouse_state::WarehouseState;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    // Shared snapshot of layout and pallets, refreshed on every store change
    let warehouse = WarehouseState::new();
    warehouse.start();
    provide_context(warehouse);

    view! {
        <Shell />
    }
}
