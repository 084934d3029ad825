use crate::error::{EtlError, Result};
use crate::types::{Bank, EnrichedBank, RateTable};
use tracing::info;

/// Loads the exchange-rate table from a URL or a local path. The source is
/// a two-column CSV with a header row: currency code, USD multiplier.
pub fn load_rate_table(source: &str) -> Result<RateTable> {
    let contents = if source.starts_with("http://") || source.starts_with("https://") {
        info!("Fetching exchange rates from {}", source);
        let client = reqwest::blocking::Client::new();
        client.get(source).send()?.error_for_status()?.text()?
    } else {
        info!("Reading exchange rates from {}", source);
        std::fs::read_to_string(source)?
    };
    parse_rate_table(&contents)
}

fn parse_rate_table(contents: &str) -> Result<RateTable> {
    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    let mut rates = RateTable::new();

    for record in reader.records() {
        let record = record?;
        let code = record.get(0).unwrap_or("").trim();
        let multiplier = record.get(1).unwrap_or("").trim();
        if code.is_empty() {
            continue;
        }
        let multiplier: f64 = multiplier.parse().map_err(|_| {
            EtlError::Structure(format!("bad multiplier for {}: {:?}", code, multiplier))
        })?;
        rates.insert(code.to_string(), multiplier);
    }

    Ok(rates)
}

/// Derives the GBP, EUR and INR columns from the USD column. A missing
/// multiplier for any target currency is fatal before any row is converted;
/// an absent USD value propagates to absent derived values.
pub fn transform(banks: Vec<Bank>, rates: &RateTable) -> Result<Vec<EnrichedBank>> {
    let gbp = target_rate(rates, "GBP")?;
    let eur = target_rate(rates, "EUR")?;
    let inr = target_rate(rates, "INR")?;

    let enriched = banks
        .into_iter()
        .map(|bank| EnrichedBank {
            mc_gbp_billion: bank.mc_usd_billion.map(|usd| round2(usd * gbp)),
            mc_eur_billion: bank.mc_usd_billion.map(|usd| round2(usd * eur)),
            mc_inr_billion: bank.mc_usd_billion.map(|usd| round2(usd * inr)),
            name: bank.name,
            mc_usd_billion: bank.mc_usd_billion,
        })
        .collect();

    Ok(enriched)
}

fn target_rate(rates: &RateTable, code: &str) -> Result<f64> {
    rates
        .get(code)
        .copied()
        .ok_or_else(|| EtlError::MissingRate(code.to_string()))
}

/// Rounds to two decimal places, ties to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
