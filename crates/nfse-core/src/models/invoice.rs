//! Extracted invoice data for Brazilian service invoices (NFS-e).

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

use crate::invoice::rules::{parse_brl_amount, parse_issue_date};

/// The fixed set of fields extracted from every invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, Deserialize)]
pub enum Field {
    /// Issuer (prestador) legal name.
    #[serde(rename = "Empresa")]
    Empresa,
    /// Issuer taxpayer ID.
    #[serde(rename = "CNPJ")]
    Cnpj,
    /// Invoice number.
    #[serde(rename = "Número NF")]
    NumeroNf,
    /// Issue date, as printed.
    #[serde(rename = "Data de Emissão")]
    DataEmissao,
    /// Total service value, as printed.
    #[serde(rename = "Valor do Serviço")]
    ValorServico,
    /// Tax base (base de cálculo), as printed.
    #[serde(rename = "Base de Cálculo")]
    BaseCalculo,
    /// Municipal service tax (ISS) amount, as printed.
    #[serde(rename = "ISS")]
    Iss,
    /// Service description (discriminação dos serviços).
    #[serde(rename = "Serviço Prestado")]
    ServicoPrestado,
}

impl Field {
    /// All fields in canonical (export and validation) order.
    pub const ALL: [Field; 8] = [
        Field::Empresa,
        Field::Cnpj,
        Field::NumeroNf,
        Field::DataEmissao,
        Field::ValorServico,
        Field::BaseCalculo,
        Field::Iss,
        Field::ServicoPrestado,
    ];

    /// Portuguese label used in reports and exported headers.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Empresa => "Empresa",
            Field::Cnpj => "CNPJ",
            Field::NumeroNf => "Número NF",
            Field::DataEmissao => "Data de Emissão",
            Field::ValorServico => "Valor do Serviço",
            Field::BaseCalculo => "Base de Cálculo",
            Field::Iss => "ISS",
            Field::ServicoPrestado => "Serviço Prestado",
        }
    }

    /// Look up a field by its label (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.label().to_lowercase() == label.to_lowercase())
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Values extracted from one invoice.
///
/// Every field is always present as a key; a value that was not found is
/// `None`, which is distinct from a label that was found with an empty value
/// (`Some("")`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    values: [Option<String>; 8],
}

impl ExtractedFields {
    /// Create a record with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this record with `field` set to `value`.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.values[field.index()] = Some(value.into());
        self
    }

    pub(crate) fn set(&mut self, field: Field, value: Option<String>) {
        self.values[field.index()] = value;
    }

    /// Value of a field, or `None` when it was not found.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    /// Whether a value (possibly empty) was found for the field.
    pub fn is_present(&self, field: Field) -> bool {
        self.values[field.index()].is_some()
    }

    /// Iterate over all eight fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<&str>)> + '_ {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Fields for which no value was found.
    pub fn missing(&self) -> Vec<Field> {
        self.iter()
            .filter(|(_, v)| v.is_none())
            .map(|(f, _)| f)
            .collect()
    }

    /// Values in canonical order with absent fields as empty strings (for tabular export).
    pub fn to_row(&self) -> Vec<String> {
        self.iter()
            .map(|(_, v)| v.unwrap_or_default().to_string())
            .collect()
    }

    /// Service value parsed from its Brazilian notation.
    pub fn service_value(&self) -> Option<Decimal> {
        self.get(Field::ValorServico).and_then(parse_brl_amount)
    }

    /// Tax base parsed from its Brazilian notation.
    pub fn tax_base(&self) -> Option<Decimal> {
        self.get(Field::BaseCalculo).and_then(parse_brl_amount)
    }

    /// ISS amount parsed from its Brazilian notation.
    pub fn iss_amount(&self) -> Option<Decimal> {
        self.get(Field::Iss).and_then(parse_brl_amount)
    }

    /// Issue date parsed into a calendar date.
    pub fn issue_date(&self) -> Option<NaiveDate> {
        self.get(Field::DataEmissao).and_then(parse_issue_date)
    }
}

impl Serialize for ExtractedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::ALL.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.label(), &value)?;
        }
        map.end()
    }
}
