use crate::domain::NormalizedListing;
use maud::{html, Markup};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Detail page link for a listing, with the id encoded as one path segment.
pub fn listing_href(id: &str) -> String {
    format!("/property/{}", utf8_percent_encode(id, NON_ALPHANUMERIC))
}

pub fn listing_card(listing: &NormalizedListing) -> Markup {
    html! {
        a href=(listing_href(&listing.id)) class="block" {
            div class="bg-white rounded-xl overflow-hidden shadow-sm border border-gray-100" {
                div class="relative h-48" {
                    img src=(listing.image) alt=(listing.title) class="object-cover w-full h-full" loading="lazy";
                    div class="absolute top-4 left-4 flex gap-2" {
                        span class="badge bg-blue-600 text-white" { (listing.badge()) }
                        @if listing.is_top_pick {
                            span class="badge bg-amber-500 text-white" { "Top pick" }
                        }
                    }
                }
                div class="p-4" {
                    h3 class="font-semibold text-lg" { (listing.title) }
                    @if !listing.location.is_empty() {
                        p class="text-sm text-gray-500" { (listing.location) }
                    }
                    p class="text-blue-600 font-bold mt-2" {
                        "฿" (listing.price)
                        @if listing.is_price_per_month { " / month" }
                    }
                    ul class="flex gap-3 text-sm text-gray-600 mt-2" {
                        li { (listing.details.area) " m²" }
                        li { (listing.details.bedrooms) " bed" }
                        li { (listing.details.bathrooms) " bath" }
                        li { (listing.details.parking) " parking" }
                    }
                }
            }
        }
    }
}
