//! Output formatting

use clap::ValueEnum;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Print `data` as JSON or YAML, or as a table of `rows(data)`
    pub fn print<T, R, F>(&self, data: &T, rows: F) -> anyhow::Result<()>
    where
        T: Serialize,
        R: Tabled,
        F: FnOnce(&T) -> Vec<R>,
    {
        println!("{}", self.render(data, rows)?);
        Ok(())
    }

    fn render<T, R, F>(&self, data: &T, rows: F) -> anyhow::Result<String>
    where
        T: Serialize,
        R: Tabled,
        F: FnOnce(&T) -> Vec<R>,
    {
        Ok(match self {
            OutputFormat::Json => serde_json::to_string_pretty(data)?,
            OutputFormat::Yaml => serde_yaml::to_string(data)?,
            OutputFormat::Table => Table::new(rows(data)).with(Style::rounded()).to_string(),
        })
    }
}

/// Join ids or messages into one table cell
pub fn cell<T: ToString>(items: &[T]) -> String {
    if items.is_empty() {
        "-".into()
    } else {
        items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    }
}
