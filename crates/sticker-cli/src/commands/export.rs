use anyhow::Result;

use super::AppCatalog;

pub async fn export(catalog: &AppCatalog) -> Result<()> {
    let value = catalog.export().await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub async fn status(catalog: &AppCatalog) -> Result<()> {
    let records = catalog.store().list_collections().await?;

    if records.is_empty() {
        println!("No collections stored yet.");
        return Ok(());
    }

    println!("Collections:");
    for record in records {
        let updated = record
            .updated_at()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("  {:<10} {:>8} bytes  updated {}", record.key, record.size_bytes, updated);
    }

    Ok(())
}
