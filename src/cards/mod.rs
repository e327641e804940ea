//! Card system: definitions, instances, and the catalogue.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data (unit, spell or secret body)
//! - `CardInstance`: A copy of a card in a deck or hand
//! - `Unit`: A card on the board with live stats and status flags
//! - `CardCatalog`: Definition lookup, with the built-in set

pub mod catalog;
pub mod definition;
pub mod instance;

pub use catalog::{ids, CardCatalog};
pub use definition::{
    Burn, CardBody, CardDefinition, CardId, CostScaling, Keywords, Rarity, SecretTrigger,
    TargetRule,
};
pub use instance::{CardInstance, InstanceId, Unit};
