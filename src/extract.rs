use crate::error::{EtlError, Result};
use crate::types::Bank;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

pub struct BankTableExtractor {
    client: reqwest::blocking::Client,
}

impl BankTableExtractor {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Fetches the source page and parses the market-cap table out of it.
    /// Network and non-2xx failures surface as errors; nothing is retried.
    pub fn extract(&self, url: &str) -> Result<Vec<Bank>> {
        info!("Fetching bank table from {}", url);
        let body = self.client.get(url).send()?.error_for_status()?.text()?;
        parse_bank_table(&body)
    }
}

/// Parses the first wikitable in the document into bank rows.
///
/// The first row is assumed to be the header. Rows with fewer than three
/// cells are skipped outright. The name comes from the first link in the
/// second cell when one is present, otherwise from the cell text. The
/// market cap comes from the third cell; a cell that does not parse as a
/// number yields a row with the value absent rather than an error.
pub fn parse_bank_table(html: &str) -> Result<Vec<Bank>> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse("table.wikitable").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();
    let anchor_selector = Selector::parse("a").unwrap();

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| EtlError::Structure("no wikitable found in document".to_string()))?;

    let mut banks = Vec::new();
    for row in table.select(&row_selector).skip(1) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() < 3 {
            continue;
        }

        let name = match cells[1].select(&anchor_selector).next() {
            Some(anchor) => anchor.text().collect::<String>().trim().to_string(),
            None => cells[1].text().collect::<String>().trim().to_string(),
        };
        let market_cap = parse_market_cap(&cells[2].text().collect::<String>());

        banks.push(Bank {
            name,
            mc_usd_billion: market_cap,
        });
    }

    info!("Parsed {} bank rows from source table", banks.len());
    if banks.is_empty() {
        warn!("No rows found - the page structure may have changed");
    }

    Ok(banks)
}

/// Strips thousands separators and embedded newlines before the numeric
/// conversion.
fn parse_market_cap(raw: &str) -> Option<f64> {
    raw.replace(',', "").replace('\n', "").trim().parse().ok()
}
