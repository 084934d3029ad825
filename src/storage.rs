use crate::error::Result;
use crate::types::EnrichedBank;
use rusqlite::types::Value;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::info;

/// Writes the record set to `path`, replacing whatever was there. Header
/// row first, then one row per record in set order; absent values become
/// empty fields.
pub fn save_csv<P: AsRef<Path>>(banks: &[EnrichedBank], path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(&path)?;
    for bank in banks {
        writer.serialize(bank)?;
    }
    writer.flush()?;

    info!(
        "Wrote {} records to {}",
        banks.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Replaces `table_name` wholesale: drop, recreate, bulk-insert, all inside
/// one transaction. The caller owns the connection lifecycle.
pub fn save_table(conn: &mut Connection, table_name: &str, banks: &[EnrichedBank]) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute_batch(&format!(
        r#"
        DROP TABLE IF EXISTS "{table}";
        CREATE TABLE "{table}" (
            "Name"           TEXT,
            "MC_USD_Billion" REAL,
            "MC_GBP_Billion" REAL,
            "MC_EUR_Billion" REAL,
            "MC_INR_Billion" REAL
        );
        "#,
        table = table_name
    ))?;

    {
        let mut stmt = tx.prepare(&format!(
            r#"INSERT INTO "{}" ("Name", "MC_USD_Billion", "MC_GBP_Billion", "MC_EUR_Billion", "MC_INR_Billion")
               VALUES (?1, ?2, ?3, ?4, ?5)"#,
            table_name
        ))?;
        for bank in banks {
            stmt.execute(params![
                bank.name,
                bank.mc_usd_billion,
                bank.mc_gbp_billion,
                bank.mc_eur_billion,
                bank.mc_inr_billion,
            ])?;
        }
    }

    tx.commit()?;
    info!("Loaded {} records into table {}", banks.len(), table_name);
    Ok(())
}

/// Runs the query text as given and collects every result row. The query
/// is trusted; this is a single-user batch tool, not a service.
pub fn run_query(conn: &Connection, query: &str) -> Result<Vec<Vec<Value>>> {
    let mut stmt = conn.prepare(query)?;
    let column_count = stmt.column_count();

    let mut rows = stmt.query([])?;
    let mut results = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            values.push(row.get::<_, Value>(i)?);
        }
        results.push(values);
    }

    Ok(results)
}

/// Renders one result row the way the CLI prints it.
pub fn format_row(row: &[Value]) -> String {
    let fields: Vec<String> = row
        .iter()
        .map(|value| match value {
            Value::Null => String::new(),
            Value::Integer(i) => i.to_string(),
            Value::Real(r) => r.to_string(),
            Value::Text(t) => t.clone(),
            Value::Blob(b) => format!("<{} bytes>", b.len()),
        })
        .collect();
    fields.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_banks() -> Vec<EnrichedBank> {
        vec![
            EnrichedBank {
                name: "JPMorgan Chase".to_string(),
                mc_usd_billion: Some(432.92),
                mc_gbp_billion: Some(346.34),
                mc_eur_billion: Some(402.62),
                mc_inr_billion: Some(35910.71),
            },
            EnrichedBank {
                name: "No Value Bank".to_string(),
                mc_usd_billion: None,
                mc_gbp_billion: None,
                mc_eur_billion: None,
                mc_inr_billion: None,
            },
        ]
    }

    #[test]
    fn test_csv_round_trip_preserves_field_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banks.csv");
        let banks = sample_banks();

        save_csv(&banks, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let read_back: Vec<EnrichedBank> = reader
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(read_back, banks);
    }

    #[test]
    fn test_csv_header_and_absent_values_serialize_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banks.csv");

        save_csv(&sample_banks(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines[0],
            "Name,MC_USD_Billion,MC_GBP_Billion,MC_EUR_Billion,MC_INR_Billion"
        );
        assert_eq!(lines[2], "No Value Bank,,,,");
    }

    #[test]
    fn test_save_csv_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banks.csv");
        std::fs::write(&path, "stale contents\nmore stale\nand more\nrows\n").unwrap();

        save_csv(&sample_banks()[..1], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(!contents.contains("stale"));
    }

    #[test]
    fn test_save_table_inserts_all_records_with_nulls_for_absent() {
        let mut conn = Connection::open_in_memory().unwrap();

        save_table(&mut conn, "Largest_banks", &sample_banks()).unwrap();

        let rows = run_query(&conn, r#"SELECT * FROM "Largest_banks""#).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Value::Text("JPMorgan Chase".to_string()));
        assert_eq!(rows[0][1], Value::Real(432.92));
        assert_eq!(rows[1][1], Value::Null);
        assert_eq!(rows[1][4], Value::Null);
    }

    #[test]
    fn test_save_table_replaces_prior_contents() {
        let mut conn = Connection::open_in_memory().unwrap();
        save_table(&mut conn, "Largest_banks", &sample_banks()).unwrap();

        let second = vec![EnrichedBank {
            name: "Only Bank".to_string(),
            mc_usd_billion: Some(1.0),
            mc_gbp_billion: Some(0.8),
            mc_eur_billion: Some(0.93),
            mc_inr_billion: Some(82.1),
        }];
        save_table(&mut conn, "Largest_banks", &second).unwrap();

        let rows = run_query(&conn, r#"SELECT * FROM "Largest_banks""#).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], Value::Text("Only Bank".to_string()));
    }

    #[test]
    fn test_run_query_on_malformed_sql_is_an_error() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(run_query(&conn, "SELECT * FROM no_such_table").is_err());
    }

    #[test]
    fn test_format_row_renders_nulls_as_empty() {
        let row = vec![
            Value::Text("Bank".to_string()),
            Value::Null,
            Value::Real(80.0),
        ];
        assert_eq!(format_row(&row), "Bank |  | 80");
    }
}
