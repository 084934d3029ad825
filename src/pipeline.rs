use crate::constants;
use crate::error::Result;
use crate::extract::BankTableExtractor;
use crate::logging::ProgressLog;
use crate::storage;
use crate::transform;
use rusqlite::Connection;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Run parameters for one batch execution, bundled so tests can point the
/// job at a mock server and a temp directory.
#[derive(Debug, Clone)]
pub struct EtlJob {
    pub source_url: String,
    pub rate_source: String,
    pub output_csv: PathBuf,
    pub db_path: PathBuf,
    pub table_name: String,
    pub progress_log: PathBuf,
}

/// Result of a complete pipeline run.
#[derive(Debug)]
pub struct EtlReport {
    pub rows_extracted: usize,
    pub csv_path: PathBuf,
    pub table_name: String,
    pub sample_rows: Vec<String>,
}

impl EtlJob {
    /// The production job, wired to the fixed constants.
    pub fn from_constants() -> Self {
        Self {
            source_url: constants::SOURCE_URL.to_string(),
            rate_source: constants::EXCHANGE_RATE_URL.to_string(),
            output_csv: PathBuf::from(constants::OUTPUT_CSV_PATH),
            db_path: PathBuf::from(constants::DB_PATH),
            table_name: constants::TABLE_NAME.to_string(),
            progress_log: PathBuf::from(constants::PROGRESS_LOG_PATH),
        }
    }

    /// Runs extract, transform and both load stages in order, recording a
    /// progress line at each stage boundary. The first failure aborts the
    /// rest of the run; lines already written stay behind as the audit
    /// trail of how far execution got.
    #[instrument(skip(self), fields(table = %self.table_name))]
    pub fn run(&self) -> Result<EtlReport> {
        let progress = ProgressLog::new(&self.progress_log);
        progress.append("ETL Job Started")?;

        let extractor = BankTableExtractor::new();
        let banks = extractor.extract(&self.source_url)?;
        let rows_extracted = banks.len();
        progress.append(&format!(
            "Data extraction complete. Extracted {} rows.",
            rows_extracted
        ))?;

        let rates = transform::load_rate_table(&self.rate_source)?;
        let enriched = transform::transform(banks, &rates)?;
        progress.append("Data transformation complete")?;

        storage::save_csv(&enriched, &self.output_csv)?;
        progress.append(&format!(
            "Data saved to CSV at {}",
            self.output_csv.display()
        ))?;

        // The connection lives exactly as long as the load and query
        // stages; the drop closes it on the error path as well.
        let mut conn = Connection::open(&self.db_path)?;
        storage::save_table(&mut conn, &self.table_name, &enriched)?;
        progress.append(&format!("Data loaded to Database table {}", self.table_name))?;

        let query = format!(r#"SELECT * FROM "{}" LIMIT 5"#, self.table_name);
        let sample_rows = storage::run_query(&conn, &query)?
            .iter()
            .map(|row| storage::format_row(row))
            .collect();
        drop(conn);

        progress.append("ETL Job Finished")?;
        info!("Pipeline finished, {} rows", rows_extracted);

        Ok(EtlReport {
            rows_extracted,
            csv_path: self.output_csv.clone(),
            table_name: self.table_name.clone(),
            sample_rows,
        })
    }
}
