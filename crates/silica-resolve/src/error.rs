//! Compilation errors.
//!
//! Every variant names the offending configuration and entity. All are
//! fatal for that configuration: the computation is pure and deterministic,
//! so retrying without changing the input never helps.

use silica_model::ModelError;
use thiserror::Error;

/// Errors that can abort the compilation of one configuration.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("schema error: {0}")]
    Model(#[from] ModelError),

    #[error("chip '{chip}': required peripheral '{name}' is missing")]
    MissingPeripheral { chip: String, name: String },

    #[error(
        "chip '{chip}': GPIO port '{peripheral}' at {address:#x} is not on the \
         port stride from the base port"
    )]
    MisalignedGpioPort {
        chip: String,
        peripheral: String,
        address: u64,
    },

    #[error(
        "chip '{chip}': peripherals of family '{family}' declare conflicting versions \
         '{first}' and '{second}' (found on '{peripheral}')"
    )]
    FamilyVersionConflict {
        chip: String,
        family: String,
        first: String,
        second: String,
        peripheral: String,
    },

    #[error("chip '{chip}': duplicate resource token '{token}'")]
    DuplicateSingleton { chip: String, token: String },

    #[error("chip '{chip}': interrupts '{first}' and '{second}' both claim vector slot {slot}")]
    InterruptSlotCollision {
        chip: String,
        slot: u32,
        first: String,
        second: String,
    },
}
