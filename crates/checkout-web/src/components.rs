//! UI Components

use leptos::prelude::*;

/// Terminal window title bar with the usual traffic lights
#[component]
pub fn TerminalHeader() -> impl IntoView {
    view! {
        <div class="terminal-header">
            <div class="dot dot-red" />
            <div class="dot dot-yellow" />
            <div class="dot dot-green" />
            <span class="terminal-title">"contact@dev"</span>
        </div>
    }
}
