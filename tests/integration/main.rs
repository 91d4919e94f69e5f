//! Integration tests against wiremock servers

mod discovery_tests;
mod fetch_tests;
mod sitemap_tests;
