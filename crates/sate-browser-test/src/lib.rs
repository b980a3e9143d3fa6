//! # sate-browser-test
//!
//! Browser automation primitives for end-to-end tests, built on chromiumoxide.
//!
//! The crate is deliberately small: it launches headless Chrome, opens pages,
//! locates elements, reads what a user would see, performs clicks and typing,
//! and waits for conditions by polling rather than sleeping.
//!
//! ## Architecture
//!
//! - **TestBrowser**: Chrome process lifecycle
//! - **Page**: one tab; navigation, element lookup, waits
//! - **Element**: text/attribute/state reads, click, typing
//! - **ConsoleCapture**: console output collected per page
//! - **DialogCapture**: `alert`/`confirm` handling per page
//! - **WaitConfig** / **settle**: bounded polling
//!
//! ## Example Usage
//!
//! ```ignore
//! use sate_browser_test::{TestBrowser, TestBrowserConfig, WaitConfig};
//!
//! let browser = TestBrowser::launch(TestBrowserConfig::default()).await?;
//! let page = browser.new_page().await?;
//! page.navigate("file:///srv/sate/index.html", WaitConfig::default()).await?;
//!
//! page.find_by_id("studentName").await?.type_text("Ana Costa").await?;
//! page.find(".login-btn").await?.click().await?;
//! page.wait_for_selector("#examScreen", WaitConfig::default()).await?;
//!
//! browser.close().await?;
//! ```
//!
//! ## Testing Strategy
//!
//! Unit tests cover everything that does not need Chrome (waits, selector
//! escaping, capture bookkeeping). Tests that launch Chrome are `#[ignore]`d;
//! run them with `cargo test -p sate-browser-test -- --ignored`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod console;
pub mod dialog;
pub mod element;
pub mod error;
pub mod page;
pub mod wait;

pub use browser::{TestBrowser, TestBrowserConfig};
pub use console::{ConsoleCapture, ConsoleLevel, ConsoleMessage};
pub use dialog::{DialogCapture, DialogOutcome, DialogPolicy, DialogRecord};
pub use element::{class_list_contains, Element};
pub use error::{BrowserError, Result};
pub use page::{id_selector, Page};
pub use wait::{settle, wait_for_result, Settled, WaitConfig, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};
