use super::view_model::LocationQrVm;
use crate::shared::icons::icon;
use contracts::shared::qr::payload_label;
use leptos::prelude::*;
use thaw::*;

/// Сколько кодов показывать в списке под кнопками
const PREVIEW_LIMIT: usize = 12;

#[component]
#[allow(non_snake_case)]
pub fn LocationQrPanel() -> impl IntoView {
    let vm = LocationQrVm::new();

    let codes_view = move || {
        let codes = vm.codes.get();
        if codes.is_empty() {
            return view! { <Label>"Sin códigos generados."</Label> }.into_any();
        }
        let total = codes.len();
        let shown = codes
            .into_iter()
            .take(PREVIEW_LIMIT)
            .map(|code| {
                view! {
                    <TableRow>
                        <TableCell>
                            <TableCellLayout>{payload_label(&code.payload).to_string()}</TableCellLayout>
                        </TableCell>
                    </TableRow>
                }
            })
            .collect_view();
        view! {
            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                {format!("{} códigos", total)}
            </Badge>
            <Table>
                <TableBody>{shown}</TableBody>
            </Table>
        }
        .into_any()
    };

    view! {
        <Card>
            <h3 class="panel-title">"QR de Ubicaciones"</h3>
            <Flex vertical=true gap=FlexGap::Medium>
                <Button
                    appearance=ButtonAppearance::Primary
                    loading=vm.is_busy
                    disabled=move || vm.is_busy.get()
                    on_click=move |_| vm.generate_all_command()
                >
                    {icon("qr")}
                    " Generar todos los QR fijos de ubicaciones"
                </Button>

                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <Select value=vm.section>
                        <option value="">"Todos"</option>
                        {move || {
                            vm.section_letters()
                                .into_iter()
                                .map(|letter| {
                                    view! {
                                        <option value=letter.to_string()>{format!("Sección {}", letter)}</option>
                                    }
                                })
                                .collect_view()
                        }}
                    </Select>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=move || vm.is_busy.get()
                        on_click=move |_| vm.print_section_command()
                    >
                        {icon("printer")}
                        " Imprimir"
                    </Button>
                </Flex>

                <div class="form__group">
                    <Label>"Seleccionar ubicaciones individuales:"</Label>
                    <Input value=vm.selection_text placeholder="Ej: A1-2-3, B3-1-4, C2-1-2, D15..." />
                </div>
                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=move || vm.is_busy.get()
                        on_click=move |_| vm.generate_selection_command()
                    >
                        "Generar selección"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=move || vm.is_busy.get()
                        on_click=move |_| vm.print_selection_command()
                    >
                        {icon("printer")}
                        " Imprimir selección"
                    </Button>
                </Flex>

                {codes_view}
            </Flex>
        </Card>
    }
}
