//! Fixed tag vocabularies offered by the include/exclude selectors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! tag_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal, defaults = [$($default:ident),*] {
            $($variant:ident => $tag:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            Serialize, Deserialize, clap::ValueEnum,
        )]
        pub enum $name {
            $(
                #[serde(rename = $tag)]
                #[value(name = $tag)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const DEFAULTS: &'static [$name] = &[$($name::$default),*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $tag,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($tag => Ok($name::$variant),)+
                    other => Err(ValidationError::UnknownTag {
                        kind: $kind,
                        tag: other.to_string(),
                    }),
                }
            }
        }
    };
}

tag_vocabulary! {
    /// Tags the service should keep when extracting content.
    IncludeTag, "include", defaults = [H1, H2, H3, P] {
        H1 => "h1",
        H2 => "h2",
        H3 => "h3",
        P => "p",
        A => "a",
        Img => "img",
        Div => "div",
        Span => "span",
    }
}

tag_vocabulary! {
    /// Tags the service should strip before extracting content.
    ExcludeTag, "exclude", defaults = [Script, Style] {
        Script => "script",
        Style => "style",
        Nav => "nav",
        Footer => "footer",
        Header => "header",
    }
}

/// The tags to send for one selector: the explicit choice, or the form
/// defaults when nothing was chosen and defaults are enabled.
pub fn selection_or_defaults<T: Copy>(
    chosen: Vec<T>,
    defaults: &[T],
    use_defaults: bool,
) -> Vec<T> {
    if chosen.is_empty() && use_defaults {
        defaults.to_vec()
    } else {
        chosen
    }
}
