use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Exchange-rate lookup: currency code to USD multiplier.
pub type RateTable = HashMap<String, f64>;

/// One row as scraped from the source table. A market-cap cell that fails
/// numeric parsing keeps the row but leaves the value absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub name: String,
    pub mc_usd_billion: Option<f64>,
}

/// A bank row with the derived currency columns attached. Field order is
/// the CSV column order; the rename attributes carry the canonical column
/// names used by both sinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBank {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "MC_USD_Billion")]
    pub mc_usd_billion: Option<f64>,
    #[serde(rename = "MC_GBP_Billion")]
    pub mc_gbp_billion: Option<f64>,
    #[serde(rename = "MC_EUR_Billion")]
    pub mc_eur_billion: Option<f64>,
    #[serde(rename = "MC_INR_Billion")]
    pub mc_inr_billion: Option<f64>,
}
