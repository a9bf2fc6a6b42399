use crate::templates::desktop_layout;
use maud::{html, Markup};

/// A basic error page for any status code.
pub fn error_page(status: u16, message: &str) -> Markup {
    desktop_layout(
        &format!("Error {status}"),
        html! {
            main class="container mx-auto max-w-2xl mt-16 p-4" {
                h1 class="text-3xl font-bold mb-4" { "Error " (status) }
                p class="text-lg text-gray-600" { (message) }
                p class="mt-6" { a href="/" { "← Back to listings" } }
            }
        },
    )
}
