// templates/pages/listings.rs

use crate::domain::{ListingFilter, ListingQuery, NormalizedListing, SortOrder};
use crate::resolver::Resolution;
use crate::templates::{
    components::{degraded_notice, diagnostics_panel, listing_card},
    desktop_layout,
};
use maud::{html, Markup};

const FILTERS: &[(ListingFilter, &str)] = &[
    (ListingFilter::Buy, "Buy"),
    (ListingFilter::Rent, "Rent"),
    (ListingFilter::Sell, "Sell"),
    (ListingFilter::NearBts, "Near BTS"),
    (ListingFilter::NearRedLine, "Near Red Line"),
    (ListingFilter::NearUniversity, "Near university"),
];

const SORTS: &[(SortOrder, &str)] = &[
    (SortOrder::PriceAsc, "Price: low to high"),
    (SortOrder::PriceDesc, "Price: high to low"),
    (SortOrder::Newest, "Newest"),
    (SortOrder::Oldest, "Oldest"),
];

pub fn listings_page(
    resolution: &Resolution<Vec<NormalizedListing>>,
    shown: &[NormalizedListing],
    query: &ListingQuery,
) -> Markup {
    desktop_layout(
        "All properties",
        html! {
            @if resolution.is_degraded() {
                (degraded_notice(&resolution.diagnostics))
            }
            main class="container mx-auto px-4 py-6" {
                (filter_bar(query))

                div class="mb-8" {
                    h1 class="text-2xl font-bold mb-2" { "Newest listings, ready to move in or invest" }
                    p class="text-gray-600" { (shown.len()) " listings" }
                }

                @if shown.is_empty() {
                    p class="text-gray-500" { "No listings match these filters." }
                } @else {
                    div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-6" {
                        @for listing in shown {
                            (listing_card(listing))
                        }
                    }
                }

                (diagnostics_panel(&resolution.diagnostics))
            }
        },
    )
}

fn filter_bar(query: &ListingQuery) -> Markup {
    let active = query.filter.map(ListingFilter::as_str);
    let sorted_by = query.sort.map(SortOrder::as_str);

    html! {
        form method="get" action="/all-properties" class="flex flex-wrap gap-3 mb-8 items-center" {
            input type="search" name="q" placeholder="Search project or location"
                value=[query.search.as_deref()];

            select name="filter" {
                option value="" selected[active.is_none()] { "All types" }
                @for (filter, label) in FILTERS {
                    option value=(filter.as_str()) selected[active == Some(filter.as_str())] { (label) }
                }
            }

            input type="number" name="min_price" min="0" step="1000" value=(query.min_price);
            input type="number" name="max_price" min="0" step="1000" value=(query.max_price);

            select name="sort" {
                option value="" selected[sorted_by.is_none()] { "Sort" }
                @for (order, label) in SORTS {
                    option value=(order.as_str()) selected[sorted_by == Some(order.as_str())] { (label) }
                }
            }

            button type="submit" class="primary" { "Apply" }
            a href="/all-properties" { "Reset" }
        }
    }
}
