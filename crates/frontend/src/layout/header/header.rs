use crate::shared::icons::icon;
use crate::shared::warehouse_state::WarehouseState;
use leptos::prelude::*;
use thaw::*;

/// Шапка приложения: название и индикатор живого обновления
#[component]
#[allow(non_snake_case)]
pub fn Header() -> impl IntoView {
    let warehouse =
        leptos::context::use_context::<WarehouseState>().expect("WarehouseState not found");

    let live = move || warehouse.live.get();

    view! {
        <header class="header">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <Flex gap=FlexGap::Medium align=FlexAlign::Center>
                    {icon("warehouse")}
                    <div>
                        <h1 class="header__title">"Sistema de Gestión de Almacén"</h1>
                        <p class="header__subtitle">"Arca Grupo Carranza"</p>
                    </div>
                </Flex>
                <div title=move || if live() { "Actualización en tiempo real activa" } else { "Sin conexión en tiempo real" }>
                    {move || {
                        if live() {
                            view! {
                                <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Success>"En vivo"</Badge>
                            }
                            .into_any()
                        } else {
                            view! {
                                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>"Desconectado"</Badge>
                            }
                            .into_any()
                        }
                    }}
                </div>
            </Flex>
        </header>
    }
}
