use super::view_model::PalletRegistrationVm;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn PalletRegistration() -> impl IntoView {
    let vm = PalletRegistrationVm::new();

    let hint_view = move || {
        vm.location_hint().map(|(text, is_error)| {
            let intent = if is_error { MessageBarIntent::Error } else { MessageBarIntent::Success };
            view! {
                <MessageBar intent=intent>
                    <div>{text}</div>
                </MessageBar>
            }
        })
    };

    view! {
        <Card>
            <h2 class="panel-title">"Registrar Palet"</h2>
            <Flex vertical=true gap=FlexGap::Medium>
                <div class="form__group">
                    <Label>"Código QR del Palet:"</Label>
                    <Input value=vm.scan_code placeholder="Introduce o escanea el código QR">
                        <InputSuffix slot>{icon("qr")}</InputSuffix>
                    </Input>
                </div>

                <div class="form__group">
                    <Label>"Descripción:"</Label>
                    <Input value=vm.description placeholder="Ej. Ladrillos, Cemento, etc." />
                </div>

                <div class="form__group">
                    <Label>"Cantidad:"</Label>
                    <Input
                        value=vm.quantity
                        input_type=InputType::Number
                        placeholder="Ej. 100"
                    />
                </div>

                <div class="form__group">
                    <Label>"Ubicación (Ej. A2-3-1 o D5):"</Label>
                    <Input value=vm.location placeholder="Sección-Nicho-Nivel-Palet">
                        <InputSuffix slot>{icon("qr")}</InputSuffix>
                    </Input>
                    {hint_view}
                </div>

                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.submit_command()
                    loading=vm.is_submitting
                    disabled=Signal::derive(move || !vm.can_submit())
                    attr:style="width: 100%;"
                >
                    {move || if vm.is_submitting.get() { "Registrando..." } else { "Registrar" }}
                </Button>
            </Flex>
        </Card>
    }
}
