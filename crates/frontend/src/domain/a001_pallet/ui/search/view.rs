use super::view_model::{PalletSearchVm, SearchResult};
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn PalletSearch() -> impl IntoView {
    let vm = PalletSearchVm::new();

    let result_view = move || match vm.result.get() {
        SearchResult::Idle => None,
        SearchResult::NotFound => Some(
            view! {
                <MessageBar intent=MessageBarIntent::Warning>
                    <div>"Palet no encontrado."</div>
                </MessageBar>
            }
            .into_any(),
        ),
        SearchResult::Found(pallet) => Some(
            view! {
                <Table>
                    <TableBody>
                        <TableRow>
                            <TableCell><TableCellLayout>"Código QR"</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout><strong>{pallet.scan_code}</strong></TableCellLayout></TableCell>
                        </TableRow>
                        <TableRow>
                            <TableCell><TableCellLayout>"Descripción"</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{pallet.description}</TableCellLayout></TableCell>
                        </TableRow>
                        <TableRow>
                            <TableCell><TableCellLayout>"Cantidad"</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{pallet.quantity}</TableCellLayout></TableCell>
                        </TableRow>
                        <TableRow>
                            <TableCell><TableCellLayout>"Ubicación"</TableCellLayout></TableCell>
                            <TableCell>
                                <TableCellLayout>
                                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                                        {pallet.location}
                                    </Badge>
                                </TableCellLayout>
                            </TableCell>
                        </TableRow>
                    </TableBody>
                </Table>
                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Small
                    disabled=move || vm.is_busy.get()
                    on_click=move |_| vm.remove_command()
                >
                    {icon("trash")}
                    " Retirar palet"
                </Button>
            }
            .into_any(),
        ),
    };

    view! {
        <Card>
            <h2 class="panel-title">"Buscar Palet"</h2>
            <Flex vertical=true gap=FlexGap::Medium>
                <div class="form__group">
                    <Label>"Código QR a buscar:"</Label>
                    <Input
                        value=vm.query
                        placeholder="Introduce o escanea el código QR"
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                vm.search_command();
                            }
                        }
                    >
                        <InputSuffix slot>{icon("search")}</InputSuffix>
                    </Input>
                </div>
                <Button
                    appearance=ButtonAppearance::Primary
                    loading=vm.is_busy
                    disabled=move || !vm.can_search()
                    on_click=move |_| vm.search_command()
                    attr:style="width: 100%;"
                >
                    "Buscar"
                </Button>
                {result_view}
            </Flex>
        </Card>
    }
}
