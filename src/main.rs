use banks_etl::{logging, EtlJob};
use tracing::{error, info};

fn main() {
    logging::init_logging();

    info!("Starting largest-banks ETL job");
    let job = EtlJob::from_constants();

    match job.run() {
        Ok(report) => {
            println!("\n📊 ETL Results:");
            println!("   Rows extracted: {}", report.rows_extracted);
            println!("   CSV output: {}", report.csv_path.display());
            println!("   Database table: {}", report.table_name);

            println!("\nSample query: first 5 rows from {}", report.table_name);
            for row in &report.sample_rows {
                println!("   {}", row);
            }
        }
        Err(e) => {
            error!("ETL job failed: {}", e);
            eprintln!("❌ ETL job failed: {}", e);
            std::process::exit(1);
        }
    }
}
