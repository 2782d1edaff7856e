//! Integration tests for Link-Indexer
//!
//! These tests use wiremock to stand in for sitemap hosts, the indexing API,
//! the token endpoint and the messaging service.

mod pipeline_tests;
mod sitemap_tests;
mod support;
