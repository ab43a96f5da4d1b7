//! Общее состояние склада на клиенте: раскладка и полный список палет.
//!
//! Список заменяется целиком при каждом событии от сервера
//! (`GET /api/a001/pallet/events`), последняя загрузка побеждает.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_utils::{api_url, get_json};
use contracts::domain::a001_pallet::aggregate::Pallet;
use contracts::shared::events::StoreEvent;
use contracts::shared::layout::WarehouseLayout;
use contracts::shared::stats::{compute_stats, WarehouseStats};
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

#[derive(Clone, Copy)]
pub struct WarehouseState {
    pub layout: RwSignal<Option<WarehouseLayout>>,
    pub pallets: RwSignal<Vec<Pallet>>,
    pub loading: RwSignal<bool>,
    /// Поток событий открыт
    pub live: RwSignal<bool>,
    /// Номер последней запущенной загрузки; ответы старых загрузок отбрасываются
    generation: RwSignal<u32>,
    ctx: Option<AppGlobalContext>,
}

impl WarehouseState {
    pub fn new() -> Self {
        Self {
            layout: RwSignal::new(None),
            pallets: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            live: RwSignal::new(false),
            generation: RwSignal::new(0),
            ctx: use_context::<AppGlobalContext>(),
        }
    }

    /// Загрузить раскладку и палеты, затем подписаться на изменения
    pub fn start(&self) {
        self.load_layout();
        self.refresh();
        self.subscribe();
    }

    pub fn load_layout(&self) {
        let layout = self.layout;
        let ctx = self.ctx;
        wasm_bindgen_futures::spawn_local(async move {
            match get_json::<WarehouseLayout>("/api/warehouse/layout").await {
                Ok(l) => layout.set(Some(l)),
                Err(e) => {
                    log::error!("load layout: {}", e);
                    if let Some(ctx) = ctx {
                        ctx.notify_error("Error", "No se pudo cargar la configuración del almacén.");
                    }
                }
            }
        });
    }

    /// Перечитать список палет целиком
    pub fn refresh(&self) {
        let pallets = self.pallets;
        let loading = self.loading;
        let generation = self.generation;
        let ctx = self.ctx;

        let current = generation.get_untracked().wrapping_add(1);
        generation.set(current);
        loading.set(true);

        wasm_bindgen_futures::spawn_local(async move {
            let result = get_json::<Vec<Pallet>>("/api/a001/pallet").await;
            if generation.get_untracked() != current {
                return;
            }
            match result {
                Ok(list) => pallets.set(list),
                Err(e) => {
                    log::error!("load pallets: {}", e);
                    if let Some(ctx) = ctx {
                        ctx.notify_error("Error", "Error al cargar los palets del almacén.");
                    }
                }
            }
            loading.set(false);
        });
    }

    /// Подписка EventSource; каждое событие означает «перечитать всё».
    ///
    /// Подписка живёт столько же, сколько страница, поэтому замыкания не освобождаются.
    fn subscribe(&self) {
        let source = match web_sys::EventSource::new(&api_url("/api/a001/pallet/events")) {
            Ok(s) => s,
            Err(e) => {
                log::error!("open event stream: {:?}", e);
                return;
            }
        };

        let this = *self;
        let on_change = Closure::<dyn FnMut(web_sys::MessageEvent)>::new(move |ev: web_sys::MessageEvent| {
            log::debug!("store event: {:?}", ev.data().as_string());
            this.refresh();
        });
        for kind in StoreEvent::KINDS {
            if let Err(e) =
                source.add_event_listener_with_callback(kind, on_change.as_ref().unchecked_ref())
            {
                log::error!("listen for {}: {:?}", kind, e);
            }
        }
        on_change.forget();

        // После переподключения события могли быть пропущены
        let mut first_open = true;
        let on_open = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
            this.live.set(true);
            if !first_open {
                this.refresh();
            }
            first_open = false;
        });
        source.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        let on_error = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
            this.live.set(false);
        });
        source.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    }

    /// Статистика по текущему снимку; None, пока раскладка не загружена
    pub fn stats(&self) -> Option<WarehouseStats> {
        let pallets = self.pallets;
        self.layout
            .with(|layout| layout.as_ref().map(|l| pallets.with(|p| compute_stats(p, l))))
    }
}

impl Default for WarehouseState {
    fn default() -> Self {
        Self::new()
    }
}
