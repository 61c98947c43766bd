//! Terminal Page
//!
//! The conversational intake widget: a fake terminal that walks through
//! the questions in [`IntakeFlow`], shows the running transcript, and on
//! confirm hands the answers to the checkout orchestration.

use leptos::prelude::*;

use checkout_core::{FlowStage, IntakeFlow, Question};

use crate::components::TerminalHeader;
use crate::orchestration;

#[component]
pub fn TerminalPage() -> impl IntoView {
    let (flow, set_flow) = signal(IntakeFlow::new());
    let (text, set_text) = signal(String::new());
    let (notice, set_notice) = signal(Option::<String>::None);
    let (sending, set_sending) = signal(false);
    let (done, set_done) = signal(false);

    let submit_line = move || {
        let line = text.get();
        set_flow.update(|f| {
            let _ = f.submit(&line);
        });
        // invalid input keeps the typed text on screen
        if flow.with(|f| f.error().is_none()) {
            set_text.set(String::new());
        }
    };

    let reset = move |_| {
        set_flow.update(IntakeFlow::reset);
        set_text.set(String::new());
        set_notice.set(None);
        set_done.set(false);
    };

    let send = move |_| {
        if sending.get() || done.get() {
            return;
        }
        let Some(answers) = flow.with(|f| f.answers()) else {
            return;
        };

        set_sending.set(true);
        set_notice.set(None);

        leptos::task::spawn_local(async move {
            match orchestration::run_checkout(answers).await {
                Ok(()) => set_done.set(true),
                Err(e) => set_notice.set(Some(e)),
            }
            set_sending.set(false);
        });
    };

    view! {
        <section class="terminal-wrap">
            <div class="terminal">
                <TerminalHeader />
                <div class="terminal-body">
                    <p>"Hey there! We're excited to link 🔗"</p>
                    <p class="rule">
                        "------------------------------------------------------------------------"
                    </p>

                    // append-only transcript of answered questions
                    <For
                        each=move || flow.with(|f| f.completed().cloned().collect::<Vec<_>>())
                        key=|q| q.key
                        children=move |q: Question| {
                            view! {
                                <p>
                                    {q.prompt.clone()}
                                    {q.postfix
                                        .clone()
                                        .map(|p| view! { <span class="accent">{p}</span> })}
                                </p>
                                <p class="answer">"✓ " {q.value.clone()}</p>
                            }
                        }
                    />

                    <Show
                        when=move || flow.with(|f| f.stage() == FlowStage::Collecting)
                        fallback=move || {
                            view! {
                                <p>"Great! Here's what we've got:"</p>
                                <For
                                    each=move || {
                                        flow.with(|f| f.completed().cloned().collect::<Vec<_>>())
                                    }
                                    key=|q| q.key
                                    children=move |q: Question| {
                                        view! {
                                            <p>
                                                <span class="field-key">
                                                    {q.key.label()} ":"
                                                </span>
                                                " "
                                                {q.value.clone()}
                                            </p>
                                        }
                                    }
                                />
                                <p>"Looking good?"</p>
                                <Show
                                    when=move || done.get()
                                    fallback=move || {
                                        view! {
                                            <div class="actions">
                                                <button class="btn" on:click=reset>
                                                    "Restart"
                                                </button>
                                                <button
                                                    class="btn btn-primary"
                                                    on:click=send
                                                    disabled=move || sending.get()
                                                >
                                                    {move || {
                                                        if sending.get() { "Sending..." } else { "Send it!" }
                                                    }}
                                                </button>
                                            </div>
                                        }
                                    }
                                >
                                    <p class="answer">"✓ Done! Please check your email"</p>
                                </Show>
                            }
                        }
                    >
                        // active prompt
                        {move || {
                            flow.with(|f| {
                                f.current()
                                    .map(|q| {
                                        view! {
                                            <p>
                                                {q.prompt.clone()}
                                                {q.postfix
                                                    .clone()
                                                    .map(|p| {
                                                        view! { <span class="accent">{p}</span> }
                                                    })}
                                            </p>
                                        }
                                    })
                            })
                        }}

                        // input echo line
                        <p class="cur-line">
                            <span class="prompt-arrow">"➜"</span>
                            " "
                            <span class="prompt-path">"~"</span>
                            " "
                            <span class="prompt-hint">
                                {move || {
                                    flow.with(|f| {
                                        f.current()
                                            .map(|q| format!("Enter {}: ", q.key.label()))
                                    })
                                }}
                            </span>
                            {move || text.get()}
                            <span class="cursor" />
                        </p>
                        <input
                            class="sr-only"
                            type="text"
                            autocomplete="off"
                            prop:value=move || text.get()
                            on:input=move |ev| set_text.set(event_target_value(&ev))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    submit_line();
                                }
                            }
                        />
                    </Show>

                    {move || {
                        flow.with(|f| {
                            f.error().map(|e| view! { <p class="error">{e.to_string()}</p> })
                        })
                    }}
                    {move || notice.get().map(|n| view! { <p class="error">{n}</p> })}
                </div>
            </div>
        </section>
    }
}
