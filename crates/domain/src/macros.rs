//! Macros for identifier newtypes and wire-named enums
//!
//! # Example
//!
//! ```rust
//! use agenda_domain::{impl_entity_id, impl_wire_name_conversions};
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! pub struct RoomId(String);
//! impl_entity_id!(RoomId);
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Shift {
//!     Morning,
//!     Evening,
//! }
//!
//! impl_wire_name_conversions!(Shift {
//!     Morning => "manha",
//!     Evening => "noite",
//! });
//! ```

/// Implements constructors, accessors, `Display` and `From` conversions for
/// an opaque string identifier.
///
/// The target must be a tuple struct wrapping a single `String`.
#[macro_export]
macro_rules! impl_entity_id {
    ($name:ident) => {
        impl $name {
            /// Wrap a backend identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

/// Implements Display and FromStr for enums that map onto backend names
///
/// - Display writes the wire name
/// - FromStr parses case-insensitively and names the enum on failure
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
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
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
