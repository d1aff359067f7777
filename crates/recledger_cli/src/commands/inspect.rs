//! Inspect command implementation.

use super::CliError;
use recledger_core::RecordService;
use recledger_store::StateStore;
use serde::Serialize;
use std::path::Path;

/// Store inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Store log path, if file-backed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Log file size in bytes, if file-backed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_size: Option<u64>,
    /// Number of stored keys.
    pub total_keys: usize,
    /// Number of keys visible to queryAll.
    pub keys_in_range: usize,
    /// Total size of the values visible to queryAll.
    pub value_bytes: usize,
    /// Inclusive lower scan bound.
    pub range_start: String,
    /// Exclusive upper scan bound.
    pub range_end: String,
}

/// Runs the inspect command.
pub fn run(
    service: &RecordService,
    store: &dyn StateStore,
    path: Option<&Path>,
    format: &str,
) -> Result<(), CliError> {
    let result = inspect(service, store, path)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn inspect(
    service: &RecordService,
    store: &dyn StateStore,
    path: Option<&Path>,
) -> Result<InspectResult, CliError> {
    let config = service.config();
    let mut keys_in_range = 0;
    let mut value_bytes = 0;
    for item in store.scan(&config.range_start, &config.range_end)? {
        let kv = item?;
        keys_in_range += 1;
        value_bytes += kv.value.len();
    }

    let log_size = match path {
        Some(p) => Some(std::fs::metadata(p).map_err(recledger_store::StoreError::from)?.len()),
        None => None,
    };

    Ok(InspectResult {
        path: path.map(|p| p.display().to_string()),
        log_size,
        total_keys: store.len()?,
        keys_in_range,
        value_bytes,
        range_start: config.range_start.clone(),
        range_end: config.range_end.clone(),
    })
}

fn print_text_output(result: &InspectResult) {
    println!("RecLedger Store Inspection");
    println!("==========================");
    println!();
    match (&result.path, result.log_size) {
        (Some(path), Some(size)) => {
            println!("Path: {}", path);
            println!("Log size: {} bytes", format_size(size));
        }
        _ => println!("Path: (in-memory)"),
    }
    println!();
    println!("Keys:");
    println!("  Total:        {}", result.total_keys);
    println!(
        "  In range:     {} [{:?}, {:?})",
        result.keys_in_range, result.range_start, result.range_end
    );
    println!("  Value bytes:  {}", format_size(result.value_bytes as u64));
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{}", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recledger_store::InMemoryStore;

    #[test]
    fn inspect_counts_range() {
        let store = InMemoryStore::with_entries([
            ("1", b"abc".to_vec()),
            ("2", b"de".to_vec()),
            ("A", b"fghij".to_vec()),
        ]);
        let result = inspect(&RecordService::default(), &store, None).unwrap();
        assert_eq!(result.total_keys, 3);
        assert_eq!(result.keys_in_range, 2);
        assert_eq!(result.value_bytes, 5);
        assert!(result.path.is_none());
    }

    #[test]
    fn json_skips_missing_path() {
        let store = InMemoryStore::new();
        let result = inspect(&RecordService::default(), &store, None).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("path"));
        assert!(json.contains("\"range_end\":\"999\""));
    }

    #[test]
    fn size_formatting() {
        assert_eq!(format_size(12), "12");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
