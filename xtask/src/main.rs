//! Build automation tasks for zaak-index
//!
//! Currently generates the CLI reference from the clap definitions.

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for zaak-index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference in Markdown
    GenerateCliDocs {
        /// Output directory for the generated reference
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<zaak_index::Cli>();

    let content = format!(
        r#"# zaak-index CLI Reference

Generated from the CLI source code on {}.

## Overview

`zaak-index` walks a case dump, writes one `<case type>.csv` index per case
type and renames every `<stem>.bin` payload to the extension recorded in its
`<stem>.meta` sidecar. Entries that cannot be processed are listed in
`failed_<epoch>.csv`; the run itself keeps going.

## Usage

```bash
# Index everything, tables in the current directory
zaak-index /exports/dump

# Only case type 1234, tables in ./index
zaak-index /exports/dump --case-type 1234 --output-dir ./index
```

{}

## Environment Variables

- `ZAAK_INDEX_OUTPUT_DIR` - Output directory when `--output-dir` is not given
- `ZAAK_LOG_LEVEL` - trace, debug, info, warn, error
- `ZAAK_LOG_OUTPUT` - console, file, both
- `ZAAK_LOG_FORMAT` - text, json
- `ZAAK_LOG_DIR` - Directory for rotated log files
- `ZAAK_LOG_FILTER` - Extra filter directives (e.g. `zaak_index=trace`)

---

*To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
