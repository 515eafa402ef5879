//! Errors command implementation.

use crate::cli::ErrorsArgs;
use crate::error::Result;
use crate::output::Formatter;
use verity_store::{KeyValueStorage, NewsStore};

/// Execute the errors command.
pub fn execute_errors<S: KeyValueStorage>(
    args: ErrorsArgs,
    store: &mut NewsStore<S>,
    formatter: &Formatter,
) -> Result<()> {
    if args.clear {
        let count = store.error_log().count();
        store.clear_error_log();
        println!("{}", formatter.success(&format!("Cleared {} error(s)", count)));
        return Ok(());
    }

    println!("{}", formatter.format_errors(store.error_log().recent(args.limit))?);
    Ok(())
}
