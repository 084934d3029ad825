/// Fixed run parameters. The tool takes no command-line flags; these
/// constants are the single place the source and output locations live.

/// Archived snapshot of the "List of largest banks" page, so reruns see the
/// same table.
pub const SOURCE_URL: &str =
    "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks";

/// Two-column CSV of currency code to USD multiplier.
pub const EXCHANGE_RATE_URL: &str =
    "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMSkillsNetwork-PY0221EN-Coursera/labs/v2/exchange_rate.csv";

pub const OUTPUT_CSV_PATH: &str = "./Largest_banks_data.csv";
pub const DB_PATH: &str = "Banks.db";
pub const TABLE_NAME: &str = "Largest_banks";
pub const PROGRESS_LOG_PATH: &str = "code_log.txt";
