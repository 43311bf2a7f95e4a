//! Family handlers and the family-keyed resolution registry.
//!
//! Each driver family (`gpio`, `usart`, ...) is resolved by a handler that
//! knows its pin roles and whether the peripheral expands into structural
//! tokens. New families are added by registering a handler; the resolution
//! loop never changes.

use std::collections::HashMap;
use std::fmt;

use silica_model::{BlockId, PeripheralDescriptor};

use crate::error::CompileError;
use crate::resolver::{PeripheralKind, ResolvedPeripheral};
use crate::singleton::{Singleton, SingletonOwner};

/// Address stride between consecutive GPIO port register blocks.
pub const GPIO_PORT_STRIDE: u64 = 0x400;
/// Pins per GPIO port.
pub const GPIO_PINS_PER_PORT: u32 = 16;
/// Channels per DMA controller.
pub const DMA_CHANNELS: u8 = 8;
/// Fixed external-interrupt lines, present on every configuration.
pub const EXTI_LINES: u32 = 16;

/// How a resolved peripheral appears in the singleton list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// One token equal to the peripheral name.
    Single,
    /// Structural tokens replacing the peripheral token (GPIO pins, DMA
    /// channels).
    Expanded(Vec<Singleton>),
}

/// The outcome of resolving one declared peripheral.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The classified peripheral record.
    pub peripheral: ResolvedPeripheral,
    /// Its contribution to the singleton list.
    pub expansion: Expansion,
}

/// Chip-wide facts a handler may need while resolving one peripheral.
#[derive(Debug)]
pub struct ResolveContext<'a> {
    /// Name of the configuration being compiled.
    pub chip: &'a str,
    /// Address of the base GPIO port (`GPIOA`), if declared. Establishes
    /// the port address stride.
    pub gpio_base: Option<u64>,
}

/// Resolves peripherals of one driver family.
///
/// Object-safe so handlers can be stored in the registry.
pub trait FamilyHandler: fmt::Debug + Send + Sync {
    /// Family token this handler resolves.
    fn family(&self) -> &str;

    /// Ordered pin roles matched against the AF table. Empty for families
    /// without pin routing.
    fn pin_roles(&self) -> &[&str] {
        &[]
    }

    /// Resolve one declared peripheral of this family.
    fn resolve(
        &self,
        ctx: &ResolveContext<'_>,
        peripheral: &PeripheralDescriptor,
        block: &BlockId,
    ) -> Result<Resolution, CompileError>;
}

/// A family resolved as a plain singleton, with optional pin roles.
#[derive(Debug)]
pub struct PlainFamily {
    family: &'static str,
    roles: &'static [&'static str],
}

impl PlainFamily {
    pub fn new(family: &'static str, roles: &'static [&'static str]) -> Self {
        Self { family, roles }
    }
}

impl FamilyHandler for PlainFamily {
    fn family(&self) -> &str {
        self.family
    }

    fn pin_roles(&self) -> &[&str] {
        self.roles
    }

    fn resolve(
        &self,
        _ctx: &ResolveContext<'_>,
        peripheral: &PeripheralDescriptor,
        block: &BlockId,
    ) -> Result<Resolution, CompileError> {
        Ok(Resolution {
            peripheral: ResolvedPeripheral {
                name: peripheral.name.clone(),
                family: block.family.clone(),
                version: block.version.clone(),
                address: peripheral.address,
                kind: PeripheralKind::Plain,
            },
            expansion: Expansion::Single,
        })
    }
}

/// GPIO ports expand into 16 pin tokens `P{port}{0..15}`.
///
/// The port letter is derived from the address offset against the base
/// port, which must be declared as `GPIOA`.
#[derive(Debug)]
pub struct GpioFamily;

impl FamilyHandler for GpioFamily {
    fn family(&self) -> &str {
        "gpio"
    }

    fn resolve(
        &self,
        ctx: &ResolveContext<'_>,
        peripheral: &PeripheralDescriptor,
        block: &BlockId,
    ) -> Result<Resolution, CompileError> {
        let base = ctx.gpio_base.ok_or_else(|| CompileError::MissingPeripheral {
            chip: ctx.chip.to_string(),
            name: "GPIOA".to_string(),
        })?;

        let misaligned = || CompileError::MisalignedGpioPort {
            chip: ctx.chip.to_string(),
            peripheral: peripheral.name.clone(),
            address: peripheral.address,
        };
        let offset = match peripheral.address.checked_sub(base) {
            Some(offset) if offset % GPIO_PORT_STRIDE == 0 => offset,
            _ => return Err(misaligned()),
        };
        let index = (offset / GPIO_PORT_STRIDE) as u32;
        // Ports run A..Z; anything past that is an off-stride address.
        if index >= 26 {
            return Err(misaligned());
        }
        let port = (b'A' + index as u8) as char;

        let pins = (0..GPIO_PINS_PER_PORT)
            .map(|pin| Singleton {
                token: format!("P{port}{pin}"),
                owner: SingletonOwner::PortPin {
                    port: peripheral.name.clone(),
                },
            })
            .collect();

        Ok(Resolution {
            peripheral: ResolvedPeripheral {
                name: peripheral.name.clone(),
                family: block.family.clone(),
                version: block.version.clone(),
                address: peripheral.address,
                kind: PeripheralKind::GpioPort { port, index },
            },
            expansion: Expansion::Expanded(pins),
        })
    }
}

/// DMA controllers expand into 8 channel tokens `{name}_CH{0..7}`.
#[derive(Debug)]
pub struct DmaFamily;

impl FamilyHandler for DmaFamily {
    fn family(&self) -> &str {
        "dma"
    }

    fn resolve(
        &self,
        _ctx: &ResolveContext<'_>,
        peripheral: &PeripheralDescriptor,
        block: &BlockId,
    ) -> Result<Resolution, CompileError> {
        let channels = (0..DMA_CHANNELS)
            .map(|ch| Singleton {
                token: format!("{}_CH{ch}", peripheral.name),
                owner: SingletonOwner::DmaChannel {
                    controller: peripheral.name.clone(),
                },
            })
            .collect();

        Ok(Resolution {
            peripheral: ResolvedPeripheral {
                name: peripheral.name.clone(),
                family: block.family.clone(),
                version: block.version.clone(),
                address: peripheral.address,
                kind: PeripheralKind::DmaController {
                    channels: DMA_CHANNELS,
                },
            },
            expansion: Expansion::Expanded(channels),
        })
    }
}

/// Registry of family handlers, keyed by family token.
#[derive(Debug, Default)]
pub struct FamilyRegistry {
    handlers: HashMap<String, Box<dyn FamilyHandler>>,
}

impl FamilyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in families registered.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(GpioFamily));
        registry.register(Box::new(DmaFamily));
        registry.register(Box::new(PlainFamily::new(
            "usart",
            &["RX", "TX", "CTS", "RTS", "CK"],
        )));
        registry.register(Box::new(PlainFamily::new("spi", &["SCK", "MOSI", "MISO"])));
        registry.register(Box::new(PlainFamily::new("i2c", &["SCL", "SDA"])));
        registry.register(Box::new(PlainFamily::new(
            "sdmmc",
            &["CK", "CMD", "D0", "D1", "D2", "D3", "D4", "D5", "D6", "D7"],
        )));
        registry.register(Box::new(PlainFamily::new(
            "timer",
            &["CH1", "CH2", "CH3", "CH4"],
        )));
        registry.register(Box::new(PlainFamily::new("rng", &[])));
        registry
    }

    /// Register a handler under its family token. A later registration for
    /// the same family replaces the earlier one.
    pub fn register(&mut self, handler: Box<dyn FamilyHandler>) {
        self.handlers.insert(handler.family().to_string(), handler);
    }

    /// Look up the handler for a family, if one is registered.
    pub fn get(&self, family: &str) -> Option<&dyn FamilyHandler> {
        self.handlers.get(family).map(|h| h.as_ref())
    }

    /// The pin roles of a family; empty for unregistered families.
    pub fn pin_roles(&self, family: &str) -> &[&str] {
        self.get(family).map(|h| h.pin_roles()).unwrap_or(&[])
    }
}
