//! Physical key and modifier names understood by Karabiner-Elements.

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Declares the closed key alphabet together with its Karabiner names.
macro_rules! key_codes {
    ($($variant:ident => $name:literal,)+) => {
        /// A physical key symbol, serialized as its Karabiner `key_code` name.
        ///
        /// The alphabet is closed: parsing any other name fails.
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum KeyCode {
            $($variant,)+
        }

        impl KeyCode {
            /// Every key in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Returns the Karabiner `key_code` name of this key.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl FromStr for KeyCode {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    _ => anyhow::bail!("Unknown key code '{}'", s),
                }
            }
        }
    };
}

key_codes! {
    A => "a",
    B => "b",
    C => "c",
    D => "d",
    E => "e",
    F => "f",
    G => "g",
    H => "h",
    I => "i",
    J => "j",
    K => "k",
    L => "l",
    M => "m",
    N => "n",
    O => "o",
    P => "p",
    Q => "q",
    R => "r",
    S => "s",
    T => "t",
    U => "u",
    V => "v",
    W => "w",
    X => "x",
    Y => "y",
    Z => "z",
    Num1 => "1",
    Num2 => "2",
    Num3 => "3",
    Num4 => "4",
    Num5 => "5",
    Num6 => "6",
    Num7 => "7",
    Num8 => "8",
    Num9 => "9",
    Num0 => "0",
    ReturnOrEnter => "return_or_enter",
    Escape => "escape",
    DeleteOrBackspace => "delete_or_backspace",
    DeleteForward => "delete_forward",
    Tab => "tab",
    Spacebar => "spacebar",
    Hyphen => "hyphen",
    EqualSign => "equal_sign",
    OpenBracket => "open_bracket",
    CloseBracket => "close_bracket",
    Backslash => "backslash",
    NonUsPound => "non_us_pound",
    Semicolon => "semicolon",
    Quote => "quote",
    GraveAccentAndTilde => "grave_accent_and_tilde",
    Comma => "comma",
    Period => "period",
    Slash => "slash",
    NonUsBackslash => "non_us_backslash",
    CapsLock => "caps_lock",
    F1 => "f1",
    F2 => "f2",
    F3 => "f3",
    F4 => "f4",
    F5 => "f5",
    F6 => "f6",
    F7 => "f7",
    F8 => "f8",
    F9 => "f9",
    F10 => "f10",
    F11 => "f11",
    F12 => "f12",
    F13 => "f13",
    F14 => "f14",
    F15 => "f15",
    F16 => "f16",
    F17 => "f17",
    F18 => "f18",
    F19 => "f19",
    F20 => "f20",
    UpArrow => "up_arrow",
    DownArrow => "down_arrow",
    LeftArrow => "left_arrow",
    RightArrow => "right_arrow",
    PageUp => "page_up",
    PageDown => "page_down",
    Home => "home",
    End => "end",
    Insert => "insert",
    PrintScreen => "print_screen",
    ScrollLock => "scroll_lock",
    Pause => "pause",
    Application => "application",
    KeypadNumLock => "keypad_num_lock",
    KeypadSlash => "keypad_slash",
    KeypadAsterisk => "keypad_asterisk",
    KeypadHyphen => "keypad_hyphen",
    KeypadPlus => "keypad_plus",
    KeypadEnter => "keypad_enter",
    Keypad1 => "keypad_1",
    Keypad2 => "keypad_2",
    Keypad3 => "keypad_3",
    Keypad4 => "keypad_4",
    Keypad5 => "keypad_5",
    Keypad6 => "keypad_6",
    Keypad7 => "keypad_7",
    Keypad8 => "keypad_8",
    Keypad9 => "keypad_9",
    Keypad0 => "keypad_0",
    KeypadPeriod => "keypad_period",
    KeypadEqualSign => "keypad_equal_sign",
    KeypadComma => "keypad_comma",
    Lang1 => "lang1",
    Lang2 => "lang2",
    JapaneseEisuu => "japanese_eisuu",
    JapaneseKana => "japanese_kana",
    LeftControl => "left_control",
    LeftShift => "left_shift",
    LeftOption => "left_option",
    LeftCommand => "left_command",
    RightControl => "right_control",
    RightShift => "right_shift",
    RightOption => "right_option",
    RightCommand => "right_command",
    Function => "fn",
    VolumeIncrement => "volume_increment",
    VolumeDecrement => "volume_decrement",
    Mute => "mute",
    DisplayBrightnessIncrement => "display_brightness_increment",
    DisplayBrightnessDecrement => "display_brightness_decrement",
    PlayOrPause => "play_or_pause",
    Fastforward => "fastforward",
    Rewind => "rewind",
    MissionControl => "mission_control",
    Launchpad => "launchpad",
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for KeyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for KeyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Modifier names accepted in `from.modifiers` and in key chord outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Matches any modifier combination (only meaningful in `from`)
    Any,
    /// Either command key
    Command,
    /// Either control key
    Control,
    /// Either option key
    Option,
    /// Either shift key
    Shift,
    /// Caps lock used as a modifier
    CapsLock,
    /// The fn key
    #[serde(rename = "fn")]
    Function,
    /// Left command key
    LeftCommand,
    /// Left control key
    LeftControl,
    /// Left option key
    LeftOption,
    /// Left shift key
    LeftShift,
    /// Right command key
    RightCommand,
    /// Right control key
    RightControl,
    /// Right option key
    RightOption,
    /// Right shift key
    RightShift,
}
