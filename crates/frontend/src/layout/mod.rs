pub mod global_context;
pub mod header;
pub mod toast;

use crate::domain::a001_pallet::ui::{
    PalletRegistration, PalletSearch, WarehouseStatsCard, WarehouseViewer,
};
use crate::domain::a002_location_qr::ui::LocationQrPanel;
use crate::domain::a003_pallet_qr::ui::PalletQrPanel;
use leptos::prelude::*;
use thaw::*;

/// Single-page shell: stats on top, the three work panels, then the grid.
///
/// ```text
/// +------------------------------------------+
/// |                 Header                   |
/// +------------------------------------------+
/// |                 Stats                    |
/// +--------------+-------------+-------------+
/// | Registration |   Search    |  QR codes   |
/// +--------------+-------------+-------------+
/// |              Warehouse grid              |
/// +------------------------------------------+
/// ```
#[component]
#[allow(non_snake_case)]
pub fn Shell() -> impl IntoView {
    view! {
        <div class="app-layout">
            <header::Header />

            <main class="app-main">
                <WarehouseStatsCard />

                <div class="panels">
                    <PalletRegistration />
                    <PalletSearch />
                    <Flex vertical=true gap=FlexGap::Medium>
                        <h2 class="panel-title">"Generador de QR"</h2>
                        <LocationQrPanel />
                        <PalletQrPanel />
                    </Flex>
                </div>

                <WarehouseViewer />
            </main>

            <toast::ToastHost />
        </div>
    }
}
