mod api_tests;
mod listing_page_tests;
mod property_page_tests;
