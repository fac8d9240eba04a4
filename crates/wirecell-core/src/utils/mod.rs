//! Small helpers shared by the plugin loader, the config loader and components.
pub mod fs;

pub use fs::{find_in_dirs, has_path_separator};

/// Split a `"first:second"` reference at the first colon.
///
/// A reference without a colon yields an empty second half, so `"Foo"` and
/// `"Foo:"` are the same reference.
pub fn parse_pair(reference: &str) -> (&str, &str) {
    match reference.split_once(':') {
        Some((first, second)) => (first, second),
        None => (reference, ""),
    }
}

#[cfg(test)]
mod tests;
