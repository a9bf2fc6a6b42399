// templates/pages/property.rs

use crate::domain::NormalizedListing;
use crate::resolver::DiagnosticLog;
use crate::templates::{
    components::{degraded_notice, diagnostics_panel},
    desktop_layout,
};
use maud::{html, Markup};

pub fn property_page(listing: &NormalizedListing, degraded: bool, log: &DiagnosticLog) -> Markup {
    desktop_layout(
        &listing.title,
        html! {
            @if degraded {
                (degraded_notice(log))
            }
            main class="container mx-auto px-4 py-8" {
                a href="/all-properties" class="text-gray-700" { "← Back" }

                section class="gallery grid grid-cols-1 lg:grid-cols-4 gap-4 mt-4" {
                    div class="lg:col-span-3" {
                        img src=(listing.image) alt=(listing.title) class="rounded-2xl w-full";
                    }
                    div class="grid grid-cols-4 lg:grid-cols-1 gap-3" {
                        @for (idx, url) in listing.gallery.iter().take(4).enumerate() {
                            img src=(url) alt={ "Photo " (idx + 1) } class="rounded-xl";
                        }
                    }
                }

                section class="bg-white rounded-2xl p-6 mt-8 border" {
                    div class="flex justify-between" {
                        div {
                            h1 class="text-3xl font-bold mb-3" { (listing.title) }
                            @if !listing.location.is_empty() {
                                p class="text-gray-600" { (listing.location) }
                            }
                        }
                        div class="text-right" {
                            span class="badge bg-blue-600 text-white" { (listing.badge()) }
                            div class="text-3xl font-bold text-blue-600" { "฿" (listing.price) }
                            @if listing.is_price_per_month {
                                span class="text-gray-500 text-sm" { "/ month" }
                            }
                        }
                    }

                    table class="min-w-full mt-6" {
                        thead {
                            tr {
                                th { "Area" }
                                th { "Bedrooms" }
                                th { "Bathrooms" }
                                th { "Parking" }
                                th { "Condition" }
                            }
                        }
                        tbody {
                            tr {
                                td { (listing.details.area) " m²" }
                                td { (listing.details.bedrooms) }
                                td { (listing.details.bathrooms) }
                                td { (listing.details.parking) }
                                td { (listing.condition) }
                            }
                        }
                    }
                }

                @let highlights = listing.highlight_lines();
                @if !highlights.is_empty() {
                    section class="mt-8" {
                        h2 class="text-2xl font-bold mb-4" { "Highlights" }
                        ul { @for line in &highlights { li { (line) } } }
                    }
                }

                @if !listing.description.is_empty() {
                    section class="mt-8" {
                        h2 class="text-2xl font-bold mb-4" { "Description" }
                        p { (listing.description) }
                    }
                }

                @if !listing.surroundings.is_empty() {
                    section class="mt-8" {
                        h2 class="text-2xl font-bold mb-4" { "Around the area" }
                        p { (listing.surroundings) }
                    }
                }

                (facility_list("Unit facilities", &listing.facilities))
                (facility_list("Project facilities", &listing.project_facilities))

                section class="mt-8" {
                    h2 class="text-2xl font-bold mb-4" { "Location" }
                    @if let Some(coords) = &listing.coordinates {
                        iframe src=(coords.osm_embed_url()) width="100%" height="350" loading="lazy" title="Map" {}
                        a href=(coords.osm_link()) target="_blank" rel="noopener" { "Open larger map" }
                    } @else {
                        p class="text-gray-500" { "No map location for this listing." }
                    }
                }

                @if let Some(agent) = &listing.agent_info {
                    aside class="bg-white rounded-2xl p-6 mt-8 border" {
                        h2 class="text-xl font-bold mb-2" { "Agent" }
                        @if !agent.company_name.is_empty() { p { (agent.company_name) } }
                        @if !agent.license_number.is_empty() {
                            p class="text-sm text-gray-500" { "License " (agent.license_number) }
                        }
                        @if !agent.service_areas.is_empty() {
                            p class="text-sm" { "Serves: " (agent.service_areas.join(", ")) }
                        }
                    }
                }

                (diagnostics_panel(log))
            }
        },
    )
}

fn facility_list(heading: &str, items: &[String]) -> Markup {
    html! {
        @if !items.is_empty() {
            section class="mt-8" {
                h2 class="text-2xl font-bold mb-4" { (heading) }
                ul class="grid grid-cols-2 gap-2" {
                    @for item in items { li { (item) } }
                }
            }
        }
    }
}

pub fn not_found_page(degraded: bool, log: &DiagnosticLog) -> Markup {
    desktop_layout(
        "Listing not found",
        html! {
            @if degraded {
                (degraded_notice(log))
            }
            main class="container mx-auto max-w-lg mt-16 p-4 text-center" {
                h2 class="text-2xl font-bold mb-4" { "Listing not found" }
                p class="text-gray-600 mb-6" { "Sorry, we could not find the property you are looking for." }
                a href="/" class="primary" { "Back to listings" }
                (diagnostics_panel(log))
            }
        },
    )
}
