//! Resource singletons: flat, uniquely named handles over hardware resources.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::CompileError;
use crate::family::{Expansion, EXTI_LINES};
use crate::resolver::ResolvedEntry;

/// A flat resource token representing exclusive logical ownership of one
/// hardware resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Singleton {
    /// The unique token (`USART1`, `PA9`, `DMA1_CH3`, `EXTI0`, ...).
    pub token: String,
    /// What the token stands for.
    pub owner: SingletonOwner,
}

/// The structural origin of a singleton token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SingletonOwner {
    /// A peripheral instance, token equal to its name.
    Peripheral { name: String },
    /// One pin of an expanded GPIO port.
    PortPin { port: String },
    /// One channel of an expanded DMA controller.
    DmaChannel { controller: String },
    /// A fixed external-interrupt line, present on every configuration.
    ExtiLine,
}

/// Flatten resolved peripherals into the ordered singleton list.
///
/// Expanding peripherals contribute their structural tokens in place of a
/// peripheral token; everything else contributes one token equal to its
/// name. The fixed `EXTI0..15` lines are appended last. Any collision is
/// fatal.
pub fn enumerate_singletons(
    chip: &str,
    entries: &[ResolvedEntry],
) -> Result<Vec<Singleton>, CompileError> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for entry in entries {
        match &entry.expansion {
            Expansion::Single => {
                let name = entry.peripheral.name.clone();
                add(
                    chip,
                    &mut out,
                    &mut seen,
                    Singleton {
                        token: name.clone(),
                        owner: SingletonOwner::Peripheral { name },
                    },
                )?;
            }
            Expansion::Expanded(tokens) => {
                for singleton in tokens {
                    add(chip, &mut out, &mut seen, singleton.clone())?;
                }
            }
        }
    }

    for line in 0..EXTI_LINES {
        add(
            chip,
            &mut out,
            &mut seen,
            Singleton {
                token: format!("EXTI{line}"),
                owner: SingletonOwner::ExtiLine,
            },
        )?;
    }

    Ok(out)
}

fn add(
    chip: &str,
    out: &mut Vec<Singleton>,
    seen: &mut HashSet<String>,
    singleton: Singleton,
) -> Result<(), CompileError> {
    if !seen.insert(singleton.token.clone()) {
        return Err(CompileError::DuplicateSingleton {
            chip: chip.to_string(),
            token: singleton.token,
        });
    }
    out.push(singleton);
    Ok(())
}

/// The chip's physical pin set, in port-declaration and pin-number order.
///
/// Only pins produced by GPIO port expansion are physical; anything else an
/// AF table mentions does not exist on this chip.
pub fn physical_pins(entries: &[ResolvedEntry]) -> Vec<String> {
    let mut pins = Vec::new();
    for entry in entries {
        if let Expansion::Expanded(tokens) = &entry.expansion {
            for singleton in tokens {
                if matches!(singleton.owner, SingletonOwner::PortPin { .. }) {
                    pins.push(singleton.token.clone());
                }
            }
        }
    }
    pins
}
