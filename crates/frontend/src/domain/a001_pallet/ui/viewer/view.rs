use super::view_model::{occupancy_text, slot_title, WarehouseViewerVm};
use contracts::shared::grid::{GridFloor, GridNiche, GridSlot};
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn WarehouseViewer() -> impl IntoView {
    let vm = WarehouseViewerVm::new();

    let sections_view = move || {
        vm.grid.get().map(|grid| {
            let occupied = grid.occupied();
            let total = grid.slots().count();
            let sections = grid
                .sections
                .into_iter()
                .map(|section| {
                    view! {
                        <div class="grid-section">
                            <h3 class="grid-section__title">{format!("Sección {}", section.letter)}</h3>
                            <div class="grid-section__niches">
                                {section
                                    .niches
                                    .into_iter()
                                    .map(|niche| niche_view(vm, niche))
                                    .collect_view()}
                            </div>
                        </div>
                    }
                })
                .collect_view();

            view! {
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                    {occupancy_text(occupied, total)}
                </Badge>
                <div class="grid-sections">{sections}</div>
                {floor_view(vm, grid.floor)}
            }
        })
    };

    let orphans_view = move || {
        let orphans = vm.orphans.get();
        (!orphans.is_empty()).then(|| {
            view! {
                <MessageBar intent=MessageBarIntent::Warning>
                    <div>
                        <p>"Palets con ubicación fuera de la configuración actual:"</p>
                        <ul>
                            {orphans
                                .into_iter()
                                .map(|p| view! { <li>{format!("{} en {}", p.scan_code, p.location)}</li> })
                                .collect_view()}
                        </ul>
                    </div>
                </MessageBar>
            }
        })
    };

    let selected_view = move || {
        vm.selected.get().map(|slot| {
            let body = match slot.pallet {
                Some(p) => view! {
                    <Table>
                        <TableBody>
                            <TableRow>
                                <TableCell><TableCellLayout>"Código QR"</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout><strong>{p.scan_code}</strong></TableCellLayout></TableCell>
                            </TableRow>
                            <TableRow>
                                <TableCell><TableCellLayout>"Descripción"</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{p.description}</TableCellLayout></TableCell>
                            </TableRow>
                            <TableRow>
                                <TableCell><TableCellLayout>"Cantidad"</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{p.quantity}</TableCellLayout></TableCell>
                            </TableRow>
                        </TableBody>
                    </Table>
                }
                .into_any(),
                None => view! {
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Ubicación libre"</Badge>
                }
                .into_any(),
            };
            view! {
                <Card>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>{slot.location}</Label>
                        {body}
                    </Flex>
                </Card>
            }
        })
    };

    view! {
        <Card>
            <h2 class="panel-title">"Visor de Almacén"</h2>
            {move || vm.grid.with(Option::is_none).then(|| view! { <Spinner /> })}
            {sections_view}
            {selected_view}
            {orphans_view}
        </Card>
    }
}

fn niche_view(vm: WarehouseViewerVm, niche: GridNiche) -> impl IntoView {
    view! {
        <div class="grid-niche">
            <div class="grid-niche__label">{niche.label}</div>
            {niche
                .levels
                .into_iter()
                .map(|level| {
                    let class = if level.is_tray { "grid-level grid-level--tray" } else { "grid-level" };
                    view! {
                        <div class=class>
                            <span class="grid-level__number">{format!("N{}", level.number)}</span>
                            <div class="grid-level__slots">
                                {level.slots.into_iter().map(|slot| slot_view(vm, slot)).collect_view()}
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

fn floor_view(vm: WarehouseViewerVm, floor: GridFloor) -> impl IntoView {
    view! {
        <div class="grid-section grid-section--floor">
            <h3 class="grid-section__title">{format!("Sección {}", floor.letter)}</h3>
            <div class="grid-floor">
                {floor.spots.into_iter().map(|slot| slot_view(vm, slot)).collect_view()}
            </div>
        </div>
    }
}

fn slot_view(vm: WarehouseViewerVm, slot: GridSlot) -> impl IntoView {
    let title = slot_title(&slot);
    let location = slot.location.clone();
    let base = if slot.pallet.is_some() { "grid-slot grid-slot--occupied" } else { "grid-slot" };
    let class = move || {
        if vm.is_selected(&location) {
            format!("{} grid-slot--selected", base)
        } else {
            base.to_string()
        }
    };
    let label = slot.label.clone();

    view! {
        <button class=class title=title on:click=move |_| vm.toggle(slot.clone())>
            {label}
        </button>
    }
}
