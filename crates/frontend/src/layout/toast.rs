use crate::layout::global_context::{AppGlobalContext, ToastKind};
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn ToastHost() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    move || {
        ctx.toast.get().map(|toast| {
            let intent = match toast.kind {
                ToastKind::Success => MessageBarIntent::Success,
                ToastKind::Error => MessageBarIntent::Error,
            };
            view! {
                <div class="toast" role="status">
                    <MessageBar intent=intent>
                        <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                            <div>
                                <strong>{toast.title}</strong>
                                <div>{toast.text}</div>
                            </div>
                            <Button
                                appearance=ButtonAppearance::Transparent
                                size=ButtonSize::Small
                                shape=ButtonShape::Square
                                on_click=move |_| ctx.dismiss()
                            >
                                "×"
                            </Button>
                        </Flex>
                    </MessageBar>
                </div>
            }
        })
    }
}
