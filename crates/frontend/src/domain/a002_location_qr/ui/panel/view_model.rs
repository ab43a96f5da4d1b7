use super::model::{self, GenerateOutcome};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::print_window::open_for_print;
use crate::shared::warehouse_state::WarehouseState;
use contracts::domain::a002_location_qr::aggregate::{LocationQr, PrintLocationQrRequest};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct LocationQrVm {
    /// Пустая строка: все секции
    pub section: RwSignal<String>,
    pub selection_text: RwSignal<String>,
    pub codes: RwSignal<Vec<LocationQr>>,
    pub is_busy: RwSignal<bool>,
    warehouse: WarehouseState,
    ctx: AppGlobalContext,
}

impl LocationQrVm {
    pub fn new() -> Self {
        let vm = Self {
            section: RwSignal::new(String::new()),
            selection_text: RwSignal::new(String::new()),
            codes: RwSignal::new(Vec::new()),
            is_busy: RwSignal::new(false),
            warehouse: use_context::<WarehouseState>().expect("WarehouseState not found"),
            ctx: use_context::<AppGlobalContext>().expect("AppGlobalContext not found"),
        };
        // Перезагрузка списка при смене секции, включая первый запуск
        Effect::new(move |_| {
            vm.section.track();
            vm.load();
        });
        vm
    }

    /// Буквы секций из раскладки, включая пол
    pub fn section_letters(&self) -> Vec<char> {
        self.warehouse
            .layout
            .with(|l| l.as_ref().map(|l| l.letters()).unwrap_or_default())
    }

    pub fn load(&self) {
        let codes = self.codes;
        let section = model::section_filter(&self.section.get_untracked());
        wasm_bindgen_futures::spawn_local(async move {
            match model::list(section).await {
                Ok(list) => codes.set(list),
                Err(e) => log::error!("list location QR codes: {}", e),
            }
        });
    }

    pub fn generate_all_command(&self) {
        self.generate(None, None);
    }

    pub fn generate_selection_command(&self) {
        let selection = model::parse_selection(&self.selection_text.get_untracked());
        if selection.is_empty() {
            self.ctx
                .notify_error("Sin ubicaciones", "Escribe al menos una ubicación.");
            return;
        }
        self.generate(Some(selection), None);
    }

    /// Печать выбранной секции (или всех кодов)
    pub fn print_section_command(&self) {
        let request = PrintLocationQrRequest {
            section: model::section_filter(&self.section.get_untracked()),
            locations: None,
        };
        self.print(request);
    }

    /// Печать списка ячеек; недостающие коды сначала создаются
    pub fn print_selection_command(&self) {
        let selection = model::parse_selection(&self.selection_text.get_untracked());
        if selection.is_empty() {
            self.ctx
                .notify_error("Error", "No hay ubicaciones seleccionadas para imprimir");
            return;
        }
        let request = PrintLocationQrRequest {
            section: None,
            locations: Some(selection.clone()),
        };
        self.generate(Some(selection), Some(request));
    }

    fn generate(&self, locations: Option<Vec<String>>, then_print: Option<PrintLocationQrRequest>) {
        let vm = *self;
        let ctx = self.ctx;
        vm.is_busy.set(true);

        wasm_bindgen_futures::spawn_local(async move {
            match model::generate(locations).await {
                Ok(GenerateOutcome::Generated(result)) => {
                    if then_print.is_none() {
                        ctx.notify_success(
                            "QR de ubicaciones generados",
                            format!(
                                "Se generaron QR para {} ubicaciones ({} ya existían).",
                                result.created, result.existing
                            ),
                        );
                    }
                    vm.load();
                    vm.is_busy.set(false);
                    if let Some(request) = then_print {
                        vm.print(request);
                    }
                }
                Ok(GenerateOutcome::Rejected(rejection)) => {
                    ctx.notify_error("Error", rejection.message);
                    vm.is_busy.set(false);
                }
                Err(e) => {
                    log::error!("generate location QR codes: {}", e);
                    ctx.notify_error("Error", "No se pudieron generar los QR de ubicaciones");
                    vm.is_busy.set(false);
                }
            }
        });
    }

    fn print(&self, request: PrintLocationQrRequest) {
        let is_busy = self.is_busy;
        let ctx = self.ctx;
        is_busy.set(true);

        wasm_bindgen_futures::spawn_local(async move {
            let result = match model::print(&request).await {
                Ok(html) => open_for_print(&html),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                log::error!("print location QR codes: {}", e);
                ctx.notify_error("Error", "No se pudieron imprimir los códigos QR");
            }
            is_busy.set(false);
        });
    }
}
