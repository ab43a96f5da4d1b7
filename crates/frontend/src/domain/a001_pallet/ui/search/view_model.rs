use super::model;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::warehouse_state::WarehouseState;
use contracts::domain::a001_pallet::aggregate::Pallet;
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Idle,
    Found(Pallet),
    NotFound,
}

#[derive(Clone, Copy)]
pub struct PalletSearchVm {
    pub query: RwSignal<String>,
    pub result: RwSignal<SearchResult>,
    pub is_busy: RwSignal<bool>,
    warehouse: WarehouseState,
    ctx: AppGlobalContext,
}

impl PalletSearchVm {
    pub fn new() -> Self {
        Self {
            query: RwSignal::new(String::new()),
            result: RwSignal::new(SearchResult::Idle),
            is_busy: RwSignal::new(false),
            warehouse: use_context::<WarehouseState>().expect("WarehouseState not found"),
            ctx: use_context::<AppGlobalContext>().expect("AppGlobalContext not found"),
        }
    }

    pub fn can_search(&self) -> bool {
        !self.is_busy.get() && self.query.with(|q| !q.trim().is_empty())
    }

    pub fn search_command(&self) {
        let code = self.query.get_untracked().trim().to_string();
        if code.is_empty() {
            return;
        }
        let result = self.result;
        let is_busy = self.is_busy;
        let ctx = self.ctx;
        is_busy.set(true);

        wasm_bindgen_futures::spawn_local(async move {
            match model::find_by_scan_code(&code).await {
                Ok(Some(pallet)) => result.set(SearchResult::Found(pallet)),
                Ok(None) => result.set(SearchResult::NotFound),
                Err(e) => {
                    log::error!("search pallet: {}", e);
                    result.set(SearchResult::Idle);
                    ctx.notify_error("Error", "Ocurrió un error al buscar el palet.");
                }
            }
            is_busy.set(false);
        });
    }

    /// Retirar el palet encontrado y liberar su ubicación
    pub fn remove_command(&self) {
        let SearchResult::Found(pallet) = self.result.get_untracked() else {
            return;
        };
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!(
                    "¿Retirar el palet {} de {}?",
                    pallet.scan_code, pallet.location
                ))
                .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let result = self.result;
        let is_busy = self.is_busy;
        let warehouse = self.warehouse;
        let ctx = self.ctx;
        is_busy.set(true);

        wasm_bindgen_futures::spawn_local(async move {
            match model::remove_by_scan_code(&pallet.scan_code).await {
                Ok(removed) => {
                    if removed {
                        ctx.notify_success(
                            "Palet retirado",
                            format!("La ubicación {} ha quedado libre.", pallet.location),
                        );
                    }
                    result.set(SearchResult::NotFound);
                    warehouse.refresh();
                }
                Err(e) => {
                    log::error!("remove pallet: {}", e);
                    ctx.notify_error("Error", "Ocurrió un error al retirar el palet.");
                }
            }
            is_busy.set(false);
        });
    }
}
