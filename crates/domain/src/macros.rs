//! Macro for implementing Display and FromStr for wire-name enums
//!
//! The remote API spells enum values in camelCase (`callTimestamp`) or upper
//! case (`ASC`). The macro keeps the exact wire spelling for `Display` and
//! parses case-insensitively, which is what the CLI needs for flags.
//!
//! # Example
//!
//! ```rust
//! use ats2_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Direction {
//!     Inbound,
//!     Outbound,
//! }
//!
//! impl_wire_name_conversions!(Direction {
//!     Inbound => "inbound",
//!     Outbound => "outbound",
//! });
//!
//! assert_eq!(Direction::Inbound.to_string(), "inbound");
//! assert_eq!("OUTBOUND".parse::<Direction>().unwrap(), Direction::Outbound);
//! ```

/// Implements Display and FromStr traits for enums with a fixed wire name
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their wire names
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire spelling of the value
            pub const fn as_wire(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_wire())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestKey {
        CallerName,
        Date,
    }

    impl_wire_name_conversions!(TestKey {
        CallerName => "callerName",
        Date => "date",
    });

    #[test]
    fn test_display_keeps_wire_case() {
        assert_eq!(TestKey::CallerName.to_string(), "callerName");
        assert_eq!(TestKey::Date.as_wire(), "date");
    }

    #[test]
    fn test_fromstr_is_case_insensitive() {
        assert_eq!(TestKey::from_str("callerName").unwrap(), TestKey::CallerName);
        assert_eq!(TestKey::from_str("CALLERNAME").unwrap(), TestKey::CallerName);
        assert_eq!(TestKey::from_str("Date").unwrap(), TestKey::Date);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestKey::from_str("duration");
        assert!(result.unwrap_err().contains("Invalid TestKey: duration"));
        assert!(TestKey::from_str("").is_err());
    }
}
