//! Completeness checks for extracted invoice fields.

use crate::models::invoice::{ExtractedFields, Field};
use crate::models::result::ValidationProblem;

use super::rules::{has_cnpj_shape, verify_cnpj_checksum};

/// Checks mandatory fields and reports every problem in one pass.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    verify_cnpj_checksum: bool,
}

impl Validator {
    /// Create a validator that checks CNPJ shape only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also verify the CNPJ check digits.
    pub fn with_cnpj_checksum(mut self, verify: bool) -> Self {
        self.verify_cnpj_checksum = verify;
        self
    }

    /// Check the fields; an empty list means the extraction is complete.
    ///
    /// Checks run in a fixed order and never stop early.
    pub fn validate(&self, fields: &ExtractedFields) -> Vec<ValidationProblem> {
        let mut problems = Vec::new();

        match fields.get(Field::Empresa) {
            None => problems.push(not_found(Field::Empresa)),
            Some(name) if name.trim().is_empty() => {
                problems.push(ValidationProblem::new(Field::Empresa, "Empresa is blank"))
            }
            Some(_) => {}
        }

        match fields.get(Field::Cnpj) {
            None => problems.push(not_found(Field::Cnpj)),
            Some(cnpj) if !has_cnpj_shape(cnpj) => problems.push(ValidationProblem::new(
                Field::Cnpj,
                format!("CNPJ '{}' is not a 14-digit taxpayer ID", cnpj),
            )),
            Some(cnpj) if self.verify_cnpj_checksum && !verify_cnpj_checksum(cnpj) => {
                problems.push(ValidationProblem::new(
                    Field::Cnpj,
                    format!("CNPJ '{}' has invalid check digits", cnpj),
                ))
            }
            Some(_) => {}
        }

        for field in [Field::NumeroNf, Field::DataEmissao] {
            if !fields.is_present(field) {
                problems.push(not_found(field));
            }
        }

        match fields.get(Field::ValorServico) {
            None => problems.push(not_found(Field::ValorServico)),
            Some(value) if !value.chars().any(|c| c.is_ascii_digit()) => {
                problems.push(ValidationProblem::new(
                    Field::ValorServico,
                    format!("Valor do Serviço '{}' contains no digits", value),
                ))
            }
            Some(_) => {}
        }

        problems
    }
}

fn not_found(field: Field) -> ValidationProblem {
    ValidationProblem::new(field, format!("{} not found", field.label()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete() -> ExtractedFields {
        ExtractedFields::new()
            .with(Field::Empresa, "ACME Consultoria Ltda")
            .with(Field::Cnpj, "12.345.678/0001-90")
            .with(Field::NumeroNf, "00012345")
            .with(Field::DataEmissao, "15/01/2024")
            .with(Field::ValorServico, "1.500,00")
            .with(Field::BaseCalculo, "1.500,00")
            .with(Field::Iss, "75,00")
            .with(Field::ServicoPrestado, "Consultoria")
    }

    #[test]
    fn test_complete_fields_have_no_problems() {
        assert!(Validator::new().validate(&complete()).is_empty());
    }

    #[test]
    fn test_optional_fields_not_checked() {
        let fields = ExtractedFields::new()
            .with(Field::Empresa, "ACME")
            .with(Field::Cnpj, "12345678000190")
            .with(Field::NumeroNf, "1")
            .with(Field::DataEmissao, "2024-01-15")
            .with(Field::ValorServico, "R$ 10,00");
        assert!(Validator::new().validate(&fields).is_empty());
    }

    #[test]
    fn test_missing_empresa() {
        let mut fields = complete();
        fields.set(Field::Empresa, None);

        let problems = Validator::new().validate(&fields);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].field, Field::Empresa);
        assert!(problems[0].message.contains("Empresa"));
    }

    #[test]
    fn test_blank_empresa_differs_from_missing() {
        let fields = complete().with(Field::Empresa, "   ");
        let problems = Validator::new().validate(&fields);
        assert_eq!(problems[0].message, "Empresa is blank");
    }

    #[test]
    fn test_all_problems_reported_in_check_order() {
        let fields = ExtractedFields::new()
            .with(Field::Cnpj, "123")
            .with(Field::ValorServico, "R$ -");

        let problems = Validator::new().validate(&fields);
        let order: Vec<Field> = problems.iter().map(|p| p.field).collect();
        assert_eq!(
            order,
            vec![
                Field::Empresa,
                Field::Cnpj,
                Field::NumeroNf,
                Field::DataEmissao,
                Field::ValorServico,
            ]
        );
        assert!(problems[1].message.contains("14-digit"));
        assert!(problems[4].message.contains("no digits"));
    }

    #[test]
    fn test_missing_cnpj_mentions_cnpj() {
        let mut fields = complete();
        fields.set(Field::Cnpj, None);
        let problems = Validator::new().validate(&fields);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].to_string(), "CNPJ not found");
    }

    #[test]
    fn test_checksum_verification_is_opt_in() {
        let fields = complete();
        assert!(Validator::new().validate(&fields).is_empty());

        let problems = Validator::new().with_cnpj_checksum(true).validate(&fields);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].message.contains("check digits"));

        let fields = complete().with(Field::Cnpj, "11.222.333/0001-81");
        assert!(Validator::new().with_cnpj_checksum(true).validate(&fields).is_empty());
    }
}
