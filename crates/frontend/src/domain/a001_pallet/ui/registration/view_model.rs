use super::model::{self, LocationHint, RegisterOutcome, RegistrationForm};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::reason_text::reason_text;
use crate::shared::warehouse_state::WarehouseState;
use contracts::shared::reason::ReasonCode;
use leptos::prelude::*;

fn rejection_title(reason: ReasonCode) -> &'static str {
    if reason.is_location_error() {
        "Ubicación no válida"
    } else {
        "Error de validación"
    }
}

/// ViewModel формы регистрации палета
#[derive(Clone, Copy)]
pub struct PalletRegistrationVm {
    // Поля формы
    pub scan_code: RwSignal<String>,
    pub description: RwSignal<String>,
    pub quantity: RwSignal<String>,
    pub location: RwSignal<String>,

    pub is_submitting: RwSignal<bool>,
    warehouse: WarehouseState,
    ctx: AppGlobalContext,
}

impl PalletRegistrationVm {
    pub fn new() -> Self {
        Self {
            scan_code: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            quantity: RwSignal::new(String::new()),
            location: RwSignal::new(String::new()),
            is_submitting: RwSignal::new(false),
            warehouse: use_context::<WarehouseState>().expect("WarehouseState not found"),
            ctx: use_context::<AppGlobalContext>().expect("AppGlobalContext not found"),
        }
    }

    /// Снимок полей формы (отслеживаемый)
    pub fn form(&self) -> RegistrationForm {
        RegistrationForm {
            scan_code: self.scan_code.get(),
            description: self.description.get(),
            quantity: self.quantity.get(),
            location: self.location.get(),
        }
    }

    fn reset(&self) {
        self.scan_code.set(String::new());
        self.description.set(String::new());
        self.quantity.set(String::new());
        self.location.set(String::new());
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitting.get() && self.form().is_complete()
    }

    /// Текст подсказки и признак ошибки для поля ячейки
    pub fn location_hint(&self) -> Option<(String, bool)> {
        let raw = self.location.get();
        let pallets = self.warehouse.pallets;
        self.warehouse.layout.with(|layout| {
            let layout = layout.as_ref()?;
            let hint = pallets.with(|p| model::location_hint(layout, p, &raw))?;
            Some(match hint {
                LocationHint::Free(location) => (format!("{} está libre.", location), false),
                LocationHint::Occupied { location, scan_code } => (
                    format!("{} está ocupada por el palet {}.", location, scan_code),
                    true,
                ),
                LocationHint::Invalid { location, reason } => {
                    (reason_text(reason, &location, layout), true)
                }
            })
        })
    }

    /// Проверить форму локально и отправить на сервер
    pub fn submit_command(&self) {
        let ctx = self.ctx;
        let Some(layout) = self.warehouse.layout.get_untracked() else {
            ctx.notify_error("Error", "La configuración del almacén aún no se ha cargado.");
            return;
        };

        let current = untrack(|| self.form());
        let dto = match current.to_dto() {
            Ok(dto) => dto,
            Err(reason) => {
                ctx.notify_error(
                    "Error de validación",
                    reason_text(reason, current.location.trim(), &layout),
                );
                return;
            }
        };
        if let Err(reason) = dto.validate(&layout) {
            ctx.notify_error(rejection_title(reason), reason_text(reason, &dto.location, &layout));
            return;
        }

        let vm = *self;
        let is_submitting = self.is_submitting;
        let warehouse = self.warehouse;
        is_submitting.set(true);

        wasm_bindgen_futures::spawn_local(async move {
            match model::register(&dto).await {
                Ok(RegisterOutcome::Registered(pallet)) => {
                    ctx.notify_success(
                        "Palet registrado",
                        format!(
                            "Palet {} registrado en {} con {} unidades de \"{}\".",
                            pallet.scan_code, pallet.location, pallet.quantity, pallet.description
                        ),
                    );
                    vm.reset();
                    warehouse.refresh();
                }
                Ok(RegisterOutcome::Rejected(rejection)) => {
                    log::warn!("registration rejected: {}", rejection.reason);
                    ctx.notify_error(
                        rejection_title(rejection.reason),
                        reason_text(rejection.reason, &dto.location, &layout),
                    );
                }
                Err(e) => {
                    log::error!("register pallet: {}", e);
                    ctx.notify_error("Error", "Ocurrió un error al registrar el palet.");
                }
            }
            is_submitting.set(false);
        });
    }
}
