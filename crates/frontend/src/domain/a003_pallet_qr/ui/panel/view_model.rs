use super::model;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::print_window::open_for_print;
use crate::shared::warehouse_state::WarehouseState;
use contracts::domain::a003_pallet_qr::aggregate::PalletQr;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct PalletQrVm {
    pub codes: RwSignal<Vec<PalletQr>>,
    pub is_busy: RwSignal<bool>,
    ctx: AppGlobalContext,
}

impl PalletQrVm {
    pub fn new() -> Self {
        let vm = Self {
            codes: RwSignal::new(Vec::new()),
            is_busy: RwSignal::new(false),
            ctx: use_context::<AppGlobalContext>().expect("AppGlobalContext not found"),
        };
        // Регистрация палета помечает его код как использованный
        let warehouse = use_context::<WarehouseState>().expect("WarehouseState not found");
        Effect::new(move |_| {
            warehouse.pallets.track();
            vm.load();
        });
        vm
    }

    pub fn load(&self) {
        let codes = self.codes;
        wasm_bindgen_futures::spawn_local(async move {
            match model::list_recent().await {
                Ok(list) => codes.set(list),
                Err(e) => log::error!("list pallet QR codes: {}", e),
            }
        });
    }

    pub fn generate_command(&self) {
        let vm = *self;
        vm.is_busy.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match model::generate().await {
                Ok(_) => {
                    vm.ctx
                        .notify_success("QR de palet generado", "Nuevo QR aleatorio creado para palet");
                    vm.load();
                }
                Err(e) => {
                    log::error!("generate pallet QR: {}", e);
                    vm.ctx.notify_error("Error", "No se pudo generar el QR de palet");
                }
            }
            vm.is_busy.set(false);
        });
    }

    pub fn print_command(&self) {
        let vm = *self;
        vm.is_busy.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = match model::print_unused().await {
                Ok(html) => open_for_print(&html),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                log::error!("print pallet QR codes: {}", e);
                vm.ctx.notify_error("Error", "No se pudieron imprimir los códigos QR");
            }
            vm.is_busy.set(false);
        });
    }
}
