// src/types.rs

use std::time::Duration;

/// Text encoding used to decode a child's stdout/stderr.
///
/// The virtualization front end writes its own messages (catalog listing,
/// `--help`) as UTF-16LE, the scripting host writes plain ASCII, and
/// everything relayed from inside a Linux environment is UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputEncoding {
    #[default]
    Utf8,
    Utf16,
    Ascii,
}

impl OutputEncoding {
    /// Decode raw stream bytes into text.
    ///
    /// Invalid sequences are replaced rather than rejected; a trailing odd
    /// byte in UTF-16 input is dropped. Byte-order marks are stripped.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            OutputEncoding::Utf8 => {
                let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
                String::from_utf8_lossy(bytes).into_owned()
            }
            OutputEncoding::Utf16 => {
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                let units = units.strip_prefix(&[0xFEFF]).unwrap_or(&units[..]);
                String::from_utf16_lossy(units)
            }
            OutputEncoding::Ascii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { '?' })
                .collect(),
        }
    }
}

/// Timeout budgets for the two classes of remote operations.
///
/// `quick` covers directory and permission changes; `slow` covers catalog
/// listing, launching and arbitrary commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub quick: Duration,
    pub slow: Duration,
}

pub const DEFAULT_QUICK_TIMEOUT: Duration = Duration::from_millis(1_000);
pub const DEFAULT_SLOW_TIMEOUT: Duration = Duration::from_millis(100_000);

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            quick: DEFAULT_QUICK_TIMEOUT,
            slow: DEFAULT_SLOW_TIMEOUT,
        }
    }
}
