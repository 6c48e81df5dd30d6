//! Domain types: bars, swing labels, order block zones.

pub mod bar;
pub mod swing;
pub mod time;
pub mod zone;

pub use bar::{validate_sequence, Bar, BarError};
pub use swing::{label_indices, SwingLabel};
pub use time::{BarTime, TimeParseError};
pub use zone::{Direction, MitigationMode, OrderBlockZone};
