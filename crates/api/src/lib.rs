//! `isoforge-api` — HTTP surface for the compliance assistant.

pub mod app;
