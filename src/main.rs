use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use xltables2json::excel::Workbook;
use xltables2json::json_export::{self, TableShape};
use xltables2json::ExtractError;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Excel file path
    #[arg(required = true)]
    file_path: PathBuf,

    /// Name of the table to extract
    #[arg(required_unless_present = "list")]
    table: Option<String>,

    /// Output shape: 'r' for rows (array of arrays), 'c' for columns (object keyed by header)
    #[arg(long, short = 's', default_value = "r")]
    shape: String,

    /// Write the JSON to this file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// List the tables defined in the workbook and exit
    #[arg(long, short = 'l')]
    list: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let shape = match TableShape::from_str(&cli.shape) {
        Ok(shape) => shape,
        Err(_) => anyhow::bail!("Invalid output shape: {}", cli.shape),
    };

    if cli.list {
        let bytes = tokio::fs::read(&cli.file_path).await?;
        let workbook = Workbook::load(&bytes)?;
        for table in workbook.tables() {
            println!("{}\t{}\t{}", table.sheet_name, table.name, table.reference);
        }
        return Ok(());
    }

    let Some(table_name) = cli.table.as_deref() else {
        anyhow::bail!("A table name is required");
    };

    let table = match xltables2json::load_table_json(&cli.file_path, table_name, shape).await {
        Ok(table) => table,
        Err(error @ ExtractError::TableNotFound { .. }) => {
            eprintln!("xltables2json: {error}");
            println!("null");
            std::process::exit(1);
        }
        Err(error) => return Err(error.into()),
    };

    match &cli.output {
        Some(path) => json_export::write_json_to_file(&table, path)?,
        None => println!("{}", json_export::serialize_to_json(&table)?),
    }

    Ok(())
}
