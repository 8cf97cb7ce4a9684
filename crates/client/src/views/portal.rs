//! The portal page: greeting, wave form, connect button and the wave list.

use std::rc::Rc;

use alloy_primitives::U256;
use dioxus::prelude::*;

use crate::actions;
use crate::components::ui::{Button, ButtonVariant, TextInput};
use crate::components::waves::WaveList;
use crate::feed::{run_reducer, wave_feed};
use crate::hooks::{use_refresh_resource, use_refreshable_resource};
use crate::logging::HostAlert;
use crate::stores::{publish_waves, set_current_account, CURRENT_ACCOUNT};
use crate::wave_client::WaveClient;

/// Root view. On mount it resolves an already authorized account and, if one
/// exists, loads the wave list and keeps it live until the view is dropped.
#[component]
pub fn WavePortal() -> Element {
    let client = use_hook(|| Rc::new(WaveClient::from_env()));

    let mount_client = client.clone();
    use_future(move || {
        let client = mount_client.clone();
        async move {
            let Some(account) = actions::find_authorized_account(&client).await else {
                return;
            };
            set_current_account(account);

            let (sender, receiver) = wave_feed();
            futures_util::join!(
                run_reducer(receiver, publish_waves),
                actions::load_waves(&client, sender),
            );
        }
    });

    let total_client = client.clone();
    let total = use_refreshable_resource(move || {
        let client = total_client.clone();
        async move {
            match client.total_waves().await {
                Ok(total) => Some(total),
                Err(e) => {
                    crate::log_debug!("Could not read total waves: {e}");
                    None
                }
            }
        }
    });

    let connect_client = client.clone();
    let connected = CURRENT_ACCOUNT.read().is_some();

    rsx! {
        div { class: "main-container",
            div { class: "data-container",
                div { class: "header", "👋 Hey there!" }

                div { class: "bio",
                    "Connect your Ethereum wallet and wave at me!"
                }

                if let Some(Some(total)) = total.read().as_ref() {
                    div { class: "tally", "{total} waves so far" }
                }

                WaveForm { client: client.clone() }

                if !connected {
                    Button {
                        variant: ButtonVariant::Wallet,
                        onclick: move |_| {
                            let client = connect_client.clone();
                            spawn(async move {
                                if let Some(account) = actions::connect_wallet(&client, &HostAlert).await {
                                    set_current_account(account);
                                }
                            });
                        },
                        "Connect Wallet"
                    }
                }

                WaveList {}
            }
        }
    }
}

#[derive(Props, Clone)]
pub struct WaveFormProps {
    pub client: Rc<WaveClient>,
}

impl PartialEq for WaveFormProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}

/// Message input plus the wave button. The input is cleared only when
/// [`actions::submit_wave`] returns `true`, i.e. once the wave is mined.
#[component]
pub fn WaveForm(props: WaveFormProps) -> Element {
    let mut message = use_signal(String::new);
    let mut refresh_total = use_refresh_resource::<Option<U256>>();
    let client = props.client.clone();

    rsx! {
        TextInput {
            value: message(),
            placeholder: "Say something nice".to_string(),
            oninput: move |e: FormEvent| message.set(e.value()),
        }

        Button {
            variant: ButtonVariant::Wave,
            onclick: move |_| {
                let client = client.clone();
                let text = message();
                spawn(async move {
                    if actions::submit_wave(&client, Some(text)).await {
                        message.set(String::new());
                        refresh_total.refresh();
                    }
                });
            },
            "Wave at Me"
        }
    }
}
