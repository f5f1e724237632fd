//! Kernel utilities shared across feature slices: layered config loading,
//! URL-safe ID generation, resource-ID guards, and (behind the `server`
//! feature) the shared API state and system router.
//!
//! ## ID generation
//! ```rust
//! # use dhub_kernel::safe_nanoid;
//! let id = safe_nanoid!();
//! assert_eq!(id.len(), 12);
//! ```
pub mod config;
pub mod prelude;
pub mod security;
#[cfg(feature = "server")]
pub mod server;

/// Characters allowed in generated IDs. Visually ambiguous ones
/// (I, O, l, 0, 1) are left out so IDs survive being read aloud.
pub const SAFE_ALPHABET: &[char; 55] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub use dhub_domain as domain;
pub use nanoid::nanoid;

/// Generates a `NanoID` drawn from [`SAFE_ALPHABET`]; 12 characters unless a
/// length is given.
#[macro_export]
macro_rules! safe_nanoid {
    () => {
        $crate::nanoid!(12, $crate::SAFE_ALPHABET)
    };
    ($size:expr) => {
        $crate::nanoid!($size, $crate::SAFE_ALPHABET)
    };
}
