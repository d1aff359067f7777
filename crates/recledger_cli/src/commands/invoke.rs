//! Init and invoke command implementations.

use super::CliError;
use recledger_core::{Contract, Invocation, Response, StateStore};
use tracing::info;

/// Runs the contract's init hook.
pub fn init(contract: &dyn Contract, store: &mut dyn StateStore) -> Result<(), CliError> {
    let response = contract.init(store);
    check("init", &response)?;
    info!("Contract initialized");
    Ok(())
}

/// Runs one invocation and prints its payload to stdout.
pub fn run(
    contract: &dyn Contract,
    store: &mut dyn StateStore,
    function: String,
    args: Vec<String>,
    pretty: bool,
) -> Result<(), CliError> {
    let invocation = Invocation { function, args };
    let response = contract.invoke(store, &invocation);
    check(&invocation.function, &response)?;

    if let Some(output) = render_payload(&response, pretty)? {
        println!("{output}");
    }
    Ok(())
}

fn check(function: &str, response: &Response) -> Result<(), CliError> {
    if response.is_ok() {
        return Ok(());
    }
    Err(CliError::Invocation {
        function: function.to_string(),
        status: response.status.code(),
        message: response.message.clone(),
    })
}

/// Formats a payload for display; `None` for an empty payload.
fn render_payload(response: &Response, pretty: bool) -> Result<Option<String>, CliError> {
    if response.payload.is_empty() {
        return Ok(None);
    }
    if pretty {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&response.payload) {
            return Ok(Some(serde_json::to_string_pretty(&value)?));
        }
    }
    Ok(Some(String::from_utf8_lossy(&response.payload).into_owned()))
}
