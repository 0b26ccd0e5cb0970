//! Output formatting shared by the commands.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use nfse_core::invoice::InvoiceReport;
use nfse_core::models::invoice::{ExtractedFields, Field};

/// File name prefix for a single-invoice CSV export.
pub const SINGLE_EXPORT_PREFIX: &str = "dados_nf";

/// File name prefix for a batch summary CSV export.
pub const BATCH_EXPORT_PREFIX: &str = "notas_fiscais_dados";

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (header and one row)
    Csv,
    /// Plain text, one field per line
    Text,
}

/// Render a single-invoice report.
pub fn format_report(report: &InvoiceReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => fields_csv([&report.fields]),
        OutputFormat::Text => Ok(report.to_string()),
    }
}

/// CSV with the eight field labels as header and one row per record.
///
/// Absent values become empty cells.
pub fn fields_csv<'a>(rows: impl IntoIterator<Item = &'a ExtractedFields>) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(Field::ALL.iter().map(|f| f.label()))?;
    for fields in rows {
        wtr.write_record(fields.to_row())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Write a CSV export named `<prefix>_<timestamp>.csv` into `dir`.
pub fn export_csv<'a>(
    dir: &Path,
    prefix: &str,
    rows: impl IntoIterator<Item = &'a ExtractedFields>,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(timestamped_name(prefix, "csv"));
    fs::write(&path, fields_csv(rows)?)?;
    Ok(path)
}

/// `<prefix>_<YYYYmmdd_HHMMSS>.<ext>` in local time.
pub fn timestamped_name(prefix: &str, ext: &str) -> String {
    format!("{}_{}.{}", prefix, Local::now().format("%Y%m%d_%H%M%S"), ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nfse_core::models::result::ValidationProblem;
    use nfse_core::invoice::generate_report;

    fn sample() -> ExtractedFields {
        ExtractedFields::new()
            .with(Field::Empresa, "ACME, Consultoria Ltda")
            .with(Field::Cnpj, "12.345.678/0001-90")
            .with(Field::ValorServico, "1.500,00")
    }

    #[test]
    fn test_single_row_csv() {
        let csv = fields_csv([&sample()]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Empresa,CNPJ,Número NF,Data de Emissão,Valor do Serviço,Base de Cálculo,ISS,Serviço Prestado"
        );
        assert_eq!(lines[1], "\"ACME, Consultoria Ltda\",12.345.678/0001-90,,,\"1.500,00\",,,");
    }

    #[test]
    fn test_header_only_without_rows() {
        let csv = fields_csv(std::iter::empty()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_export_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_csv(dir.path(), BATCH_EXPORT_PREFIX, [&sample(), &sample()]).unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("notas_fiscais_dados_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_json_report_uses_labels() {
        let report = generate_report(
            sample(),
            vec![ValidationProblem::new(Field::NumeroNf, "Número NF not found")],
        );
        let json: serde_json::Value =
            serde_json::from_str(&format_report(&report, OutputFormat::Json).unwrap()).unwrap();

        assert_eq!(json["fields"]["CNPJ"], "12.345.678/0001-90");
        assert!(json["fields"]["ISS"].is_null());
        assert_eq!(json["problems"][0]["field"], "Número NF");
    }
}
