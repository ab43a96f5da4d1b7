use super::model::usage_label;
use super::view_model::PalletQrVm;
use crate::shared::icons::icon;
use contracts::shared::qr::payload_label;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn PalletQrPanel() -> impl IntoView {
    let vm = PalletQrVm::new();

    let codes_view = move || {
        vm.codes
            .get()
            .into_iter()
            .map(|code| {
                let color = if code.is_used { BadgeColor::Subtle } else { BadgeColor::Success };
                view! {
                    <TableRow>
                        <TableCell>
                            <TableCellLayout>
                                <code>{payload_label(&code.payload).to_string()}</code>
                            </TableCellLayout>
                        </TableCell>
                        <TableCell>
                            <TableCellLayout>
                                <Badge appearance=BadgeAppearance::Tint color=color>
                                    {usage_label(code.is_used)}
                                </Badge>
                            </TableCellLayout>
                        </TableCell>
                    </TableRow>
                }
            })
            .collect_view()
    };

    view! {
        <Card>
            <h3 class="panel-title">"QR de Palets"</h3>
            <Flex vertical=true gap=FlexGap::Medium>
                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Primary
                        loading=vm.is_busy
                        disabled=move || vm.is_busy.get()
                        on_click=move |_| vm.generate_command()
                    >
                        {icon("qr")}
                        " Generar QR aleatorio para nuevo palet"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=move || vm.is_busy.get()
                        on_click=move |_| vm.print_command()
                    >
                        {icon("printer")}
                        " Imprimir disponibles"
                    </Button>
                </Flex>

                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Últimos QR generados"</TableHeaderCell>
                            <TableHeaderCell>"Estado"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>{codes_view}</TableBody>
                </Table>

                <MessageBar intent=MessageBarIntent::Info>
                    <div>
                        <strong>"Flujo de trabajo:"</strong>
                        <ol>
                            <li>"Generar QR aleatorio para nuevo palet"</li>
                            <li>"Escanear QR del palet"</li>
                            <li>"Escanear QR de la ubicación (verificar si está vacía)"</li>
                            <li>"Confirmar ocupación del hueco en la app"</li>
                        </ol>
                    </div>
                </MessageBar>
            </Flex>
        </Card>
    }
}
