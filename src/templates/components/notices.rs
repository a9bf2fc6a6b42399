use crate::resolver::DiagnosticLog;
use maud::{html, Markup};

/// Banner shown while pages are rendered from the bundled sample data. It
/// stays until the user dismisses it or the page is reloaded.
pub fn degraded_notice(log: &DiagnosticLog) -> Markup {
    html! {
        div id="degraded-notice" class="notice notice-warning" role="status" {
            div {
                p class="font-semibold" { "The listing database could not be reached." }
                p class="text-sm" {
                    @if log.mentions_offline() {
                        "No connection to the listing service. Check your connection and try again."
                    } @else {
                        "Showing sample listings instead."
                    }
                }
            }
            button type="button" onclick="window.location.reload()" { "Reload" }
            button type="button" aria-label="Dismiss"
                onclick="document.getElementById('degraded-notice').remove()" { "Dismiss" }
        }
    }
}

pub fn diagnostics_panel(log: &DiagnosticLog) -> Markup {
    html! {
        @if !log.is_empty() {
            details class="diagnostics text-xs text-gray-500 mt-8" {
                summary { "Diagnostics (" (log.len()) ")" }
                ol {
                    @for entry in log.entries() {
                        li { code { (entry) } }
                    }
                }
                @if log.dropped() > 0 {
                    p { (log.dropped()) " earlier entries dropped" }
                }
            }
        }
    }
}
