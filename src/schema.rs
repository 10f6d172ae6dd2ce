use std::io::{self, Write};

use serde::{Serialize, Deserialize};

/// Central market data enum used across the collector.
///
/// This enum represents the unified record format exchanged between:
/// - Feed simulators (producers)
/// - The DataProcessor (shared sink)
/// - The consumption pass in the driver
///
/// The `type` field is automatically added by serde and is used
/// when records are echoed as JSON at debug level
/// (e.g. "bond", "interestrate").
///
/// DESIGN NOTES:
/// - The kind set is closed and small; processing dispatches via
///   pattern match instead of an open trait object.
/// - Records are immutable after construction and are moved into
///   the processor, which owns them until process exit.
///
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MarketData {
    Bond(BondData),
    InterestRate(InterestRateData),
}

// ------------------------------------------------------------
// Bond record
// ------------------------------------------------------------
//
// Represents a single simulated bond quote.
//
// No validation is performed on construction; any finite double
// is accepted as-is.
//
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BondData {
    /// Simulated bond price
    pub price: f64,
}

// ------------------------------------------------------------
// Interest rate record
// ------------------------------------------------------------
//
// Represents a single simulated interest rate observation.
//
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InterestRateData {
    /// Simulated interest rate
    pub rate: f64,
}

impl MarketData {

    /// Returns the stable lowercase kind label.
    ///
    /// CONTRACT:
    /// - Must match the serde `type` tag
    /// - Used for:
    ///   - Error logging during consumption
    ///   - Debug echo lines
    ///
    pub fn kind(&self) -> &'static str {
        match self {
            MarketData::Bond(_) => "bond",
            MarketData::InterestRate(_) => "interestrate",
        }
    }

    /// Writes one human-readable processing line for this record.
    ///
    /// OUTPUT FORMAT:
    /// - "Processing Bond Market Data: Price = <value>"
    /// - "Processing Interest Rate Market Data: Rate = <value>"
    ///
    /// ERRORS:
    /// - Only the writer's I/O error; the record itself cannot fail.
    ///
    /// The record is not mutated; repeated calls produce identical
    /// output.
    pub fn process<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            MarketData::Bond(bond) => {
                writeln!(out, "Processing Bond Market Data: Price = {}", bond.price)
            }
            MarketData::InterestRate(ir) => {
                writeln!(out, "Processing Interest Rate Market Data: Rate = {}", ir.rate)
            }
        }
    }
}
