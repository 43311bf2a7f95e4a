//! Alternate-function tables: per-pin signal-to-selector mappings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An alternate-function table document (`<id>.af.toml`).
///
/// The table may list pins the chip does not physically have (AF tables are
/// shared across package variants); the compiler ignores those entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateFunctionTable {
    /// Table identifier, referenced from chip descriptions.
    pub id: String,
    /// Per-pin function maps.
    #[serde(default)]
    pub pins: Vec<PinFunctions>,
}

/// The signal routings of one physical pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinFunctions {
    /// Pin name (`PA9`, ...).
    pub pin: String,
    /// Signal name → AF selector code.
    #[serde(default)]
    pub signals: BTreeMap<String, u8>,
}

impl AlternateFunctionTable {
    /// Look up the function map of a pin.
    pub fn pin(&self, name: &str) -> Option<&PinFunctions> {
        self.pins.iter().find(|p| p.pin == name)
    }

    /// Look up the selector code routing `signal` onto `pin`, if any.
    pub fn selector(&self, pin: &str, signal: &str) -> Option<u8> {
        self.pin(pin).and_then(|p| p.signals.get(signal).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> AlternateFunctionTable {
        AlternateFunctionTable {
            id: "af0".into(),
            pins: vec![PinFunctions {
                pin: "PA9".into(),
                signals: BTreeMap::from([("USART1_TX".to_string(), 7u8)]),
            }],
        }
    }

    #[test]
    fn selector_lookup() {
        let af = table();
        assert_eq!(af.selector("PA9", "USART1_TX"), Some(7));
        assert_eq!(af.selector("PA9", "USART1_RX"), None);
        assert_eq!(af.selector("PB6", "USART1_TX"), None);
    }
}
