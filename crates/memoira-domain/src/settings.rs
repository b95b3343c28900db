//! Per-device display preferences.
//!
//! Each preference is persisted under its own key, independently of tasks
//! and folders. Enumerated values serialize as the short string tokens the
//! stored format uses (`"sans"`, `"base"`, `"3"`, `"md"`, ...).

use memoira_core::MemoiraError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! token_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $token:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = MemoiraError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($token => Ok($name::$variant),)+
                    other => Err(MemoiraError::Validation(format!(
                        "Invalid {}: {} (expected one of: {})",
                        stringify!($name),
                        other,
                        [$($token),+].join(", ")
                    ))),
                }
            }
        }
    };
}

token_enum!(
    /// Typeface used for note text.
    FontFamily { Sans => "sans", Serif => "serif", Mono => "mono" }
);

token_enum!(
    FontSize { Sm => "sm", Base => "base", Lg => "lg" }
);

token_enum!(
    /// Number of card columns in the grid.
    ColumnCount { One => "1", Two => "2", Three => "3" }
);

token_enum!(
    /// Size preset shared by folder chips and task cards.
    DisplaySize { Sm => "sm", Md => "md", Lg => "lg" }
);

impl Default for FontFamily {
    fn default() -> Self {
        Self::Sans
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::Base
    }
}

impl Default for ColumnCount {
    fn default() -> Self {
        Self::Three
    }
}

impl Default for DisplaySize {
    fn default() -> Self {
        Self::Md
    }
}

impl ColumnCount {
    pub fn get(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub auto_save: bool,
    pub font_family: FontFamily,
    pub font_size: FontSize,
    pub columns: ColumnCount,
    pub folder_size: DisplaySize,
    pub card_size: DisplaySize,
}
