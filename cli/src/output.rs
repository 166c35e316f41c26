//! Result and error rendering.

use anyhow::bail;

/// How results are rendered to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            other => bail!("unknown output format: {other} (expected \"json\" or \"table\")"),
        }
    }
}

/// Print a titled result in the chosen format.
pub fn show_output(format: OutputFormat, title: &str, value: &serde_json::Value) {
    match format {
        OutputFormat::Json => {
            let wrapped = serde_json::json!({ "title": title, "result": value });
            // Pretty-printing a value we just built cannot fail.
            println!("{}", serde_json::to_string_pretty(&wrapped).unwrap_or_default());
        }
        OutputFormat::Table => {
            println!("{title}");
            println!("{}", "-".repeat(title.len()));
            if let Some(map) = value.as_object() {
                let width = map.keys().map(|k| k.len()).max().unwrap_or(0);
                for (key, val) in map {
                    let rendered = match val {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    println!("{key:<width$}  {rendered}");
                }
            } else {
                println!("{value}");
            }
        }
    }
}

/// Print a user-facing error to stderr.
pub fn show_error(message: &str) {
    eprintln!("Error: {message}");
}
