use crate::core::{import_employees, ImportConfig};
use crate::error::RosterResult;
use crate::excel::{TemplateExporter, TEMPLATE_SHEET_NAME};
use crate::writer::{OutputTarget, UploadClient, UploadConfig};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

/// Mask all but the last four characters of a token for display
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

/// Execute the import command
pub fn import(
    input: PathBuf,
    output: String,
    token: Option<String>,
    timeout_secs: u64,
    verbose: bool,
) -> RosterResult<()> {
    let target: OutputTarget = output.parse()?;

    println!("{}", "📥 Roster - Employee Import".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", target);

    if verbose {
        if let (OutputTarget::Endpoint(_), Some(t)) = (&target, &token) {
            println!("   Token:  {}", mask_token(t));
        }
        println!("{}", "📖 Reading first worksheet...".cyan());
    }

    let mut config = ImportConfig::new(input, target);
    config.token = token;
    config.timeout = Duration::from_secs(timeout_secs);

    let summary = import_employees(&config)?;

    if verbose {
        println!("   Sheet: {}", summary.sheet_name.bright_blue());
        println!("   {} rows mapped\n", summary.rows);
    }

    println!("{}", "✅ Import Complete!".bold().green());
    match &summary.target {
        OutputTarget::File(path) => {
            println!("   {} records written to {}\n", summary.written, path.display())
        }
        OutputTarget::Endpoint(url) => {
            println!("   {} records accepted by {}\n", summary.written, url)
        }
    }

    Ok(())
}

/// Execute the upload command
pub fn upload(
    file: PathBuf,
    endpoint: String,
    token: Option<String>,
    timeout_secs: u64,
) -> RosterResult<()> {
    println!("{}", "📤 Roster - Upload from Excel".bold().green());
    println!("   File:     {}", file.display());
    println!("   Endpoint: {}\n", endpoint);

    let config = UploadConfig::new(endpoint)
        .with_token(token)
        .with_timeout(Duration::from_secs(timeout_secs));

    let client = UploadClient::new(config)?;
    match client.upload_workbook(&file) {
        Ok(count) => {
            println!("{}", "✅ Upload Complete!".bold().green());
            println!("   {} employees imported\n", count);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "❌ Upload failed:".bold().red(), e);
            Err(e)
        }
    }
}

/// Execute the template command
pub fn template(output: PathBuf) -> RosterResult<()> {
    println!("{}", "📄 Roster - Import Template".bold().green());
    println!("   Output: {}\n", output.display());

    TemplateExporter::new().export(&output)?;

    println!("{}", "✅ Template written!".bold().green());
    println!(
        "   Fill in sheet '{}' and run: roster import {} employees.json\n",
        TEMPLATE_SHEET_NAME,
        output.display()
    );

    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
