//! Macro for implementing Display and FromStr for status enums
//!
//! Status values travel as strings in reports, snapshots, config files and
//! query parameters. This macro keeps the textual form in one place.
//!
//! # Example
//!
//! ```rust
//! use slotwatch_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Policy {
//!     Reusable,
//!     Exclusive,
//! }
//!
//! impl_domain_status_conversions!(Policy {
//!     Reusable => "reusable",
//!     Exclusive => "exclusive",
//! });
//!
//! assert_eq!(Policy::Exclusive.to_string(), "exclusive");
//! ```

/// Implements Display and FromStr traits for status enums
///
/// This macro generates:
/// - Display trait: writes the mapped string
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// Mapped strings must be lowercase for parsing to round-trip.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
