use std::path::Path;
use sample_loader::config::{self, LoaderConfig};
use sample_loader::input::{self, InputFormat};
use sample_loader::output::is_quiet;
use sample_loader::storage::{self, schema};
use sample_loader::ui::{self, Icons, Spinner};
use sample_loader::{IntoRow, LoadReport, Loader, Record};

pub fn run_sample(database: &Path) -> anyhow::Result<()> {
    execute(database, Record::samples(), "built-in samples")?;
    Ok(())
}

pub fn run_load(database: &Path, input_path: &Path, format: Option<InputFormat>) -> anyhow::Result<()> {
    let rows = input::read_file(input_path, format)?;
    tracing::debug!("Decoded {} records from {}", rows.len(), input_path.display());
    execute(database, rows, &input_path.display().to_string())?;
    Ok(())
}

pub fn run_dump(database: &Path, json: bool) -> anyhow::Result<()> {
    if !database.exists() {
        anyhow::bail!("database not found at {}", database.display());
    }

    let records = storage::read_table(database)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("{} {} is empty.", Icons::EMPTY, schema::TABLE_NAME);
    } else {
        println!("{}", ui::records_table(&records));
    }
    Ok(())
}

pub fn run_init(path: &Path, database: Option<String>, force: bool) -> anyhow::Result<()> {
    let config = LoaderConfig {
        database: Some(
            database.unwrap_or_else(|| config::default_database_path().display().to_string()),
        ),
        input: None,
    };
    config::write_config(path, &config, force)?;
    ui::success(&format!("Wrote {}", path.display()));
    Ok(())
}

/// Shared load path: replace the table in `database` with `rows`
fn execute<I>(database: &Path, rows: I, source: &str) -> anyhow::Result<LoadReport>
where
    I: IntoIterator,
    I::Item: IntoRow,
{
    config::ensure_db_dir(database)?;

    ui::header(&format!("Loading {} into {}", source, schema::TABLE_NAME));
    ui::info(Icons::DATABASE, "Database", &database.display().to_string());

    let job = Loader::new(database).load(rows);
    let spinner = Spinner::new("Writing rows...");
    let result = job.run();
    spinner.finish_and_clear();
    let report = result?;

    ui::success(&format!("Loaded {} rows", report.rows));
    if !is_quiet() {
        let rows = report.rows.to_string();
        let elapsed = ui::progress::human_duration(report.elapsed);
        let path = report.path.display().to_string();
        println!(
            "{}",
            ui::stats_table(&[
                ("Table", schema::TABLE_NAME),
                ("Rows", rows.as_str()),
                ("File", path.as_str()),
                ("Elapsed", elapsed.as_str()),
            ])
        );
    }
    Ok(report)
}
