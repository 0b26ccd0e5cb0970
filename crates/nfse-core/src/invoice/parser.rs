//! Rule-table invoice parser.

use tracing::{debug, trace};

use crate::models::invoice::{ExtractedFields, Field};

use super::rules::{default_rules, FieldRule};
use super::InvoiceParser;

/// Parser that applies a prioritized rule table per field.
#[derive(Debug, Clone)]
pub struct NfseParser {
    rules: Vec<FieldRule>,
}

impl NfseParser {
    /// Create a parser with the built-in rules.
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Create a parser with only the given rules.
    pub fn with_rules(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Append a rule; it is tried after the existing rules for its field.
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rules for a field in priority order.
    pub fn rules_for(&self, field: Field) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter().filter(move |r| r.field == field)
    }

    fn extract_field(&self, field: Field, text: &str) -> Option<String> {
        self.rules_for(field).find_map(|rule| {
            let value = rule.apply(text)?;
            trace!("{} matched rule {}: {:?}", field, rule.name, value);
            Some(value)
        })
    }
}

impl Default for NfseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for NfseParser {
    fn parse(&self, text: &str) -> ExtractedFields {
        let mut fields = ExtractedFields::new();
        for field in Field::ALL {
            fields.set(field, self.extract_field(field, text));
        }

        debug!(
            "Extracted {}/{} fields from {} characters of text",
            Field::ALL.len() - fields.missing().len(),
            Field::ALL.len(),
            text.len()
        );
        fields
    }
}
