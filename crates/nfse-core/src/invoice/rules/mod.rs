//! Rule-based field extraction for Brazilian service invoices.
//!
//! Each field has an ordered list of [`FieldRule`]s; the first rule that
//! produces a value wins. Supporting a new invoice template means adding
//! rules to the table, not changing the parser.

pub mod amounts;
pub mod cnpj;
pub mod dates;
pub mod patterns;

pub use amounts::{format_brl_amount, parse_brl_amount};
pub use cnpj::{format_cnpj, has_cnpj_shape, normalize_cnpj, verify_cnpj_checksum};
pub use dates::parse_issue_date;

use std::fmt;

use regex::{Captures, Regex};

use crate::models::invoice::Field;
use patterns::*;

/// Turns a pattern match into a field value; `None` lets the next rule try.
pub type CaptureFn = fn(&Captures<'_>) -> Option<String>;

/// A pattern plus the function that pulls the value out of its match.
#[derive(Clone)]
pub struct FieldRule {
    /// Field this rule produces.
    pub field: Field,
    /// Short identifier, used in logs.
    pub name: &'static str,
    pattern: Regex,
    capture: CaptureFn,
}

impl FieldRule {
    /// Rule that takes the first capture group, trimmed.
    pub fn new(field: Field, name: &'static str, pattern: Regex) -> Self {
        Self {
            field,
            name,
            pattern,
            capture: first_group,
        }
    }

    /// Replace the capture function.
    pub fn with_capture(mut self, capture: CaptureFn) -> Self {
        self.capture = capture;
        self
    }

    /// Apply the rule to text.
    pub fn apply(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .and_then(|caps| (self.capture)(&caps))
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// First capture group with surrounding whitespace removed. May be empty.
pub fn first_group(caps: &Captures<'_>) -> Option<String> {
    caps.get(1).map(|m| collapse_whitespace(m.as_str()))
}

/// Value printed after a label: the rest of the label's line, or the next
/// line when the label stands alone. A next line that starts with another
/// label means the value is blank, so the result is empty rather than absent.
pub fn labeled_text(caps: &Captures<'_>) -> Option<String> {
    let same_line = collapse_whitespace(caps.get(1)?.as_str());
    if !same_line.is_empty() {
        return Some(same_line);
    }

    let next_line = caps
        .get(2)
        .map(|m| m.as_str())
        .filter(|line| !LABEL_LINE.is_match(line))
        .unwrap_or_default();
    Some(collapse_whitespace(next_line))
}

/// Like [`labeled_text`], but a blank value lets the next rule try.
pub fn non_empty_labeled_text(caps: &Captures<'_>) -> Option<String> {
    labeled_text(caps).filter(|v| !v.is_empty())
}

/// Company name after a label, with any trailing label (`CNPJ: ...`) on the
/// same line cut off.
pub fn company_name(caps: &Captures<'_>) -> Option<String> {
    let name = labeled_text(caps)?;
    Some(COMPANY_NAME_TAIL.replace(&name, "").trim().to_string())
}

/// Company name on the line below a section heading. Skipped when that line
/// is a label or nothing is left after cutting trailing labels.
pub fn heading_company_name(caps: &Captures<'_>) -> Option<String> {
    let line = caps.get(1)?.as_str();
    if LABEL_LINE.is_match(line) {
        return None;
    }
    let name = COMPANY_NAME_TAIL.replace(&collapse_whitespace(line), "").trim().to_string();
    Some(name).filter(|v| !v.is_empty())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The built-in rule table, in priority order within each field.
pub fn default_rules() -> Vec<FieldRule> {
    use Field::*;

    vec![
        FieldRule::new(Empresa, "razao_social", COMPANY_LEGAL_NAME.clone()).with_capture(company_name),
        FieldRule::new(Empresa, "nome_empresarial", COMPANY_REGISTERED_NAME.clone())
            .with_capture(company_name),
        FieldRule::new(Empresa, "prestador_heading", COMPANY_AFTER_PROVIDER_HEADING.clone())
            .with_capture(heading_company_name),
        FieldRule::new(Cnpj, "cnpj_labeled", CNPJ_LABELED.clone()),
        FieldRule::new(Cnpj, "cnpj_next_line", CNPJ_NEXT_LINE.clone()),
        FieldRule::new(NumeroNf, "numero_nota", INVOICE_NUMBER.clone()),
        FieldRule::new(NumeroNf, "nfse_numero", INVOICE_NUMBER_NFSE.clone()),
        FieldRule::new(NumeroNf, "nota_fiscal_numero", INVOICE_NUMBER_NOTA.clone()),
        FieldRule::new(NumeroNf, "numero_short", INVOICE_NUMBER_SHORT.clone()),
        FieldRule::new(DataEmissao, "data_emissao", ISSUE_DATE.clone()),
        FieldRule::new(DataEmissao, "emitida_em", ISSUED_ON.clone()),
        FieldRule::new(DataEmissao, "emissao", ISSUE_DATE_SHORT.clone()),
        FieldRule::new(ValorServico, "valor_servicos", SERVICE_VALUE.clone()),
        FieldRule::new(ValorServico, "valor_total_nota", INVOICE_TOTAL.clone()),
        FieldRule::new(ValorServico, "valor_liquido", NET_VALUE.clone()),
        FieldRule::new(BaseCalculo, "base_calculo", TAX_BASE.clone()),
        FieldRule::new(Iss, "valor_iss", ISS_VALUE.clone()),
        FieldRule::new(Iss, "iss_line", ISS_LINE.clone()),
        FieldRule::new(ServicoPrestado, "discriminacao", SERVICE_DISCRIMINATION.clone())
            .with_capture(non_empty_labeled_text),
        FieldRule::new(ServicoPrestado, "descricao", SERVICE_DESCRIPTION.clone())
            .with_capture(non_empty_labeled_text),
        FieldRule::new(ServicoPrestado, "servico_prestado", SERVICE_RENDERED.clone())
            .with_capture(non_empty_labeled_text),
        FieldRule::new(ServicoPrestado, "codigo_servico", SERVICE_CODE.clone())
            .with_capture(non_empty_labeled_text),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_a_rule() {
        let rules = default_rules();
        for field in Field::ALL {
            assert!(rules.iter().any(|r| r.field == field), "no rule for {field}");
        }
    }

    #[test]
    fn test_company_name_cuts_trailing_label() {
        let rule = FieldRule::new(Field::Empresa, "t", COMPANY_LEGAL_NAME.clone())
            .with_capture(company_name);
        assert_eq!(
            rule.apply("Razao Social: ACME Ltda   CNPJ: 12.345.678/0001-90"),
            Some("ACME Ltda".to_string())
        );
    }

    #[test]
    fn test_blank_label_value_is_empty_not_absent() {
        let rule = FieldRule::new(Field::Empresa, "t", COMPANY_LEGAL_NAME.clone())
            .with_capture(company_name);
        assert_eq!(rule.apply("Razão Social:   \n\n"), Some(String::new()));
        assert_eq!(rule.apply("Nada aqui"), None);
    }

    #[test]
    fn test_cnpj_patterns() {
        let caps = CNPJ_LABELED.captures("C.N.P.J.: 11.222.333/0001-81").unwrap();
        assert_eq!(&caps[1], "11.222.333/0001-81");

        let caps = CNPJ_LABELED.captures("CPF/CNPJ 11222333000181").unwrap();
        assert_eq!(&caps[1], "11222333000181");

        let caps = CNPJ_NEXT_LINE
            .captures("CNPJ / Inscricao Municipal\n11.222.333/0001-81  1234567")
            .unwrap();
        assert_eq!(&caps[1], "11.222.333/0001-81");
    }

    #[test]
    fn test_iss_line_rule_ignores_tax_base_label() {
        assert!(ISS_LINE.captures("Base de Calculo do ISS: 1.500,00").is_none());
        let caps = ISS_LINE.captures("Total\nISS Retido: R$ 30,00").unwrap();
        assert_eq!(&caps[1], "30,00");
    }

    #[test]
    fn test_label_on_next_line_is_not_a_value() {
        let rule = FieldRule::new(Field::Empresa, "t", COMPANY_LEGAL_NAME.clone())
            .with_capture(company_name);
        assert_eq!(
            rule.apply("Razão Social:\nCNPJ: 12.345.678/0001-90"),
            Some(String::new())
        );
        assert_eq!(
            rule.apply("Razão Social:\n  ACME Consultoria Ltda\nCNPJ: 12.345.678/0001-90"),
            Some("ACME Consultoria Ltda".to_string())
        );
    }

    #[test]
    fn test_label_line_detection() {
        for line in [
            "CNPJ: 12.345.678/0001-90",
            "  Valor do Serviço: R$ 10,00",
            "Inscrição Municipal 123",
            "Endereço: Rua das Flores, 250",
            "Nº da Nota 77",
            "ISSQN 40,00",
        ] {
            assert!(LABEL_LINE.is_match(line), "{line}");
        }
        for line in ["ACME Consultoria Ltda", "Consultoria em TI", "Datacenter Ltda"] {
            assert!(!LABEL_LINE.is_match(line), "{line}");
        }
    }

    #[test]
    fn test_heading_followed_by_label_yields_nothing() {
        let rule = FieldRule::new(Field::Empresa, "t", COMPANY_AFTER_PROVIDER_HEADING.clone())
            .with_capture(heading_company_name);
        assert_eq!(rule.apply("PRESTADOR DE SERVIÇOS\nCNPJ: 12.345.678/0001-90"), None);
        assert_eq!(
            rule.apply("PRESTADOR DE SERVIÇOS\nGama Ltda CNPJ: 12.345.678/0001-90"),
            Some("Gama Ltda".to_string())
        );
    }

    #[test]
    fn test_short_invoice_number_needs_invoice_context() {
        assert!(INVOICE_NUMBER_SHORT.captures("Rua das Flores, Nº 250").is_none());
        let caps = INVOICE_NUMBER_SHORT.captures("Nº da Nota: 000077").unwrap();
        assert_eq!(&caps[1], "000077");
        let caps = INVOICE_NUMBER_SHORT.captures("N° da NFS-e 2024/15").unwrap();
        assert_eq!(&caps[1], "2024/15");
    }
}
