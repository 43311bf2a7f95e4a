//! Block identifiers: `family_version/Variant`.

use serde::{Deserialize, Serialize};

/// A parsed block identifier describing a peripheral's register layout and
/// behavior class.
///
/// `usart_v1/USART` parses to family `usart`, version `v1`, variant `USART`.
/// Splitting happens at the *last* `/` and the *last* `_`, so multi-word
/// families like `timer_adv_v2/TIM` keep their full family token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockId {
    /// Driver family token (`usart`, `gpio`, ...).
    pub family: String,
    /// Family version tag (`v1`, `v2`, ...).
    pub version: String,
    /// Register-layout variant name (`USART`, `GPIO`, ...).
    pub variant: String,
}

impl BlockId {
    /// Parse a `family_version/Variant` string.
    ///
    /// Returns `None` if any of the three components is missing or empty.
    pub fn parse(s: &str) -> Option<Self> {
        let (family_version, variant) = s.rsplit_once('/')?;
        let (family, version) = family_version.rsplit_once('_')?;
        if family.is_empty() || version.is_empty() || variant.is_empty() {
            return None;
        }
        Some(Self {
            family: family.to_string(),
            version: version.to_string(),
            variant: variant.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple() {
        let block = BlockId::parse("usart_v1/USART").unwrap();
        assert_eq!(block.family, "usart");
        assert_eq!(block.version, "v1");
        assert_eq!(block.variant, "USART");
    }

    #[test]
    fn parse_multiword_family() {
        let block = BlockId::parse("timer_adv_v2/TIM").unwrap();
        assert_eq!(block.family, "timer_adv");
        assert_eq!(block.version, "v2");
        assert_eq!(block.variant, "TIM");
    }

    #[test]
    fn parse_rejects_missing_parts() {
        assert!(BlockId::parse("usart_v1").is_none());
        assert!(BlockId::parse("usart/USART").is_none());
        assert!(BlockId::parse("_v1/USART").is_none());
        assert!(BlockId::parse("usart_/USART").is_none());
        assert!(BlockId::parse("usart_v1/").is_none());
        assert!(BlockId::parse("").is_none());
    }
}
