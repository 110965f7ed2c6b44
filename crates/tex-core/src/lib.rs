//! Lexical core of the auto-formatting engine.
//!
//! Everything here is independent of any host editor: the static bracket and
//! operator tables, the line-oriented environment scanner, the fraction
//! boundary resolver and the TOML feature settings.

pub mod env;
pub mod fraction;
pub mod position;
pub mod settings;
pub mod tables;

pub use env::{scan_line, Environment, EnvironmentScanner, LineEnvironment, LineSource, MathFlavor};
pub use fraction::{find_numerator_start, strip_enclosing, FractionError};
pub use position::Position;
pub use settings::{FeatureToggles, Settings, SettingsError};
