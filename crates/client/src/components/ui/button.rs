use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// The main call to action ("Wave at Me").
    #[default]
    Wave,
    /// Secondary wallet actions ("Connect Wallet").
    Wallet,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            Self::Wave => "wave-button",
            Self::Wallet => "wave-button wallet-button",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    #[props(optional)]
    pub variant: Option<ButtonVariant>,
    #[props(optional)]
    pub onclick: Option<EventHandler<MouseEvent>>,
    pub children: Element,
}

#[component]
pub fn Button(props: ButtonProps) -> Element {
    let class = props.variant.unwrap_or_default().class();

    rsx! {
        button {
            class,
            r#type: "button",
            onclick: move |evt| {
                if let Some(handler) = &props.onclick {
                    handler.call(evt);
                }
            },
            {props.children}
        }
    }
}
