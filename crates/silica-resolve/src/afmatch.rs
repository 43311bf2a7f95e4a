//! Alternate-function matching: route peripheral signals onto physical pins.

use std::collections::HashMap;

use serde::Serialize;

use silica_model::AlternateFunctionTable;

use crate::family::FamilyRegistry;
use crate::resolver::ResolvedEntry;

/// One pin routed to one peripheral signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinBinding {
    /// Owning peripheral name.
    pub peripheral: String,
    /// Role tag (`TX`, `SCK`, ...).
    pub role: String,
    /// Physical pin name.
    pub pin: String,
    /// AF selector code.
    pub af: u8,
}

/// Scan the AF table for every resolved peripheral with pin roles.
///
/// Candidate signals are `{peripheral}_{role}`; only pins in the chip's
/// physical pin set participate, whatever else the AF table lists. No
/// uniqueness is enforced across pins — several pins may carry the same
/// role, and a role with no match is simply unrouted on this board.
pub fn match_pin_functions(
    entries: &[ResolvedEntry],
    physical_pins: &[String],
    af: &AlternateFunctionTable,
    registry: &FamilyRegistry,
) -> Vec<PinBinding> {
    let functions: HashMap<&str, _> = af
        .pins
        .iter()
        .map(|p| (p.pin.as_str(), &p.signals))
        .collect();

    let mut bindings = Vec::new();
    for entry in entries {
        let roles = registry.pin_roles(&entry.peripheral.family);
        if roles.is_empty() {
            continue;
        }
        for pin in physical_pins {
            let Some(signals) = functions.get(pin.as_str()) else {
                continue;
            };
            for role in roles {
                let candidate = format!("{}_{role}", entry.peripheral.name);
                if let Some(&af_code) = signals.get(&candidate) {
                    bindings.push(PinBinding {
                        peripheral: entry.peripheral.name.clone(),
                        role: role.to_string(),
                        pin: pin.clone(),
                        af: af_code,
                    });
                }
            }
        }
    }
    bindings
}
