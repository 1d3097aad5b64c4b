//! Prints the JSON Schema of the server configuration file, for editor completion and
//! validation of `config.yaml`

// Only `runtime::Config` is needed here
#![allow(unused_imports, dead_code)]

use std::io::Write;

use anyhow::Context;

mod runtime;

fn main() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(runtime::Config);

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &schema)
        .context("Failed to write the configuration schema")?;
    writeln!(stdout)?;
    Ok(())
}
