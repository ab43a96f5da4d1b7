use crate::shared::components::stat_card::StatCard;
use crate::shared::warehouse_state::WarehouseState;
use leptos::prelude::*;
use thaw::*;

/// Totales del inventario, recalculados a partir del snapshot local
#[component]
#[allow(non_snake_case)]
pub fn WarehouseStatsCard() -> impl IntoView {
    let warehouse =
        leptos::context::use_context::<WarehouseState>().expect("WarehouseState not found");

    let stats = Memo::new(move |_| warehouse.stats());
    let capacity = move || warehouse.layout.with(|l| l.as_ref().map(|l| l.capacity()));

    let total_pallets = Signal::derive(move || stats.get().map(|s| s.total_pallets));
    let total_quantity = Signal::derive(move || stats.get().map(|s| s.total_quantity));
    let empty_spots = Signal::derive(move || stats.get().map(|s| s.empty_spots));
    // Más palets que ubicaciones: el dato se muestra tal cual y se marca
    let overfull = Signal::derive(move || stats.get().is_some_and(|s| s.empty_spots < 0));
    let capacity_subtitle =
        Signal::derive(move || capacity().map(|c| format!("de {} ubicaciones", c)));

    view! {
        <Card>
            <h2 class="panel-title">"Estadísticas del Inventario"</h2>
            <div class="stats-grid">
                <StatCard label="Palets Totales" icon_name="pallets" value=total_pallets />
                <StatCard label="Artículos Totales" icon_name="items" value=total_quantity />
                <StatCard
                    label="Espacios Vacíos"
                    icon_name="empty"
                    value=empty_spots
                    alert=overfull
                    subtitle=capacity_subtitle
                />
            </div>
        </Card>
    }
}
