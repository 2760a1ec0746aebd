//! Utility helpers for tests.
//!
//! [`layout`] builds small hand-made worlds; [`scene`] inspects the
//! presentation calls a simulation produced.

pub mod layout;
pub mod scene;

pub use layout::LayoutBuilder;

/// Assert that all strings in `keys` are present in `text`.
///
/// # Panics
/// Panics with a helpful message if any key is missing.
pub fn assert_all_present(text: &str, keys: &[&str]) {
    for key in keys {
        assert!(text.contains(key), "{key} not found in {text:?}");
    }
}
