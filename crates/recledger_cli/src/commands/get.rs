//! Get command implementation.

use super::CliError;
use recledger_store::StateStore;

/// Prints the value stored under `key`.
pub fn run(store: &dyn StateStore, key: &str) -> Result<(), CliError> {
    let value = lookup(store, key)?;
    println!("{}", String::from_utf8_lossy(&value));
    Ok(())
}

fn lookup(store: &dyn StateStore, key: &str) -> Result<Vec<u8>, CliError> {
    store
        .get(key)?
        .ok_or_else(|| CliError::KeyNotFound(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use recledger_store::InMemoryStore;

    #[test]
    fn lookup_existing_key() {
        let store = InMemoryStore::with_entries([("1", b"{}".to_vec())]);
        assert_eq!(lookup(&store, "1").unwrap(), b"{}");
    }

    #[test]
    fn lookup_missing_key() {
        let store = InMemoryStore::new();
        assert!(matches!(lookup(&store, "1"), Err(CliError::KeyNotFound(_))));
    }
}
