//! Common regex patterns for Brazilian service invoice (NFS-e) extraction.
//!
//! Labels are matched case-insensitively and with or without accents, since
//! text layers of municipal invoices often drop diacritics.

use lazy_static::lazy_static;
use regex::Regex;

/// Amount in Brazilian notation: `1.234,56` or `1234,56`.
const AMOUNT: &str = r"\d{1,3}(?:\.\d{3})+,\d{2}|\d+,\d{2}";

/// Label/value separator for amounts, tolerating `(R$)`, `:` and a currency prefix.
const AMOUNT_SEP: &str = r"[ \t]*(?:\(R\$\))?[ \t]*[:=\-]?\s*(?:R\$\s*)?";

/// Dates as printed: `15/01/2024`, `15.01.2024`, `15-01-2024` or `2024-01-15`.
const DATE: &str = r"\d{2}/\d{2}/\d{4}|\d{2}\.\d{2}\.\d{4}|\d{2}-\d{2}-\d{4}|\d{4}-\d{2}-\d{2}";

/// Invoice numbers: digits optionally grouped by `.`, `/` or `-`.
const NUMBER: &str = r"\d+(?:[./\-]\d+)*";

/// Free-text value: group 1 is the rest of the label line, group 2 the line
/// after it (used only when group 1 is blank).
const TEXT_VALUE: &str = r"[ \t]*[:\-]?[ \t]*([^\n]*)(?:\n[ \t]*([^\n]*))?";

fn amount_rule(label: &str) -> Regex {
    Regex::new(&format!(r"(?i){label}{AMOUNT_SEP}({AMOUNT})")).unwrap()
}

fn date_rule(label: &str) -> Regex {
    Regex::new(&format!(r"(?i){label}[ \t]*[:\-]?\s*({DATE})")).unwrap()
}

fn number_rule(label: &str) -> Regex {
    Regex::new(&format!(r"(?i){label}[ \t]*[:\-]?\s*({NUMBER})")).unwrap()
}

fn text_rule(label: &str) -> Regex {
    Regex::new(&format!(r"(?i){label}{TEXT_VALUE}")).unwrap()
}

lazy_static! {
    // Issuer name
    pub static ref COMPANY_LEGAL_NAME: Regex = text_rule(r"Raz[aã]o\s+Social");

    pub static ref COMPANY_REGISTERED_NAME: Regex =
        text_rule(r"Nome\s+(?:Empresarial|do\s+Prestador)");

    pub static ref COMPANY_AFTER_PROVIDER_HEADING: Regex = Regex::new(
        r"(?i)Prestador\s+(?:de\s+)?Servi[cç]os?[ \t]*:?[ \t]*\n\s*([^\n]+)"
    ).unwrap();

    /// Other labels that can trail a name on the same line.
    pub static ref COMPANY_NAME_TAIL: Regex = Regex::new(
        r"(?i)(?:^|\s+)(?:CNPJ|C\.N\.P\.J|CPF|Inscri[cç][aã]o\s+(?:Municipal|Estadual)|Endere[cç]o)\b.*$"
    ).unwrap();

    // Taxpayer ID (CNPJ): NN.NNN.NNN/NNNN-NN, punctuation optional
    pub static ref CNPJ_LABELED: Regex = Regex::new(
        r"(?i)\bC\.?N\.?P\.?J\.?(?:\s*/\s*CPF)?[ \t]*(?:n[º°o]\.?)?[ \t]*[:\-]?\s*(\d{2}\.?\d{3}\.?\d{3}/?\d{4}-?\d{2})\b"
    ).unwrap();

    /// Table-style header line (`CNPJ / Inscrição Municipal`) with the value below.
    pub static ref CNPJ_NEXT_LINE: Regex = Regex::new(
        r"(?i)\bCNPJ\b[^\n]*\n\s*(\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2})\b"
    ).unwrap();

    // Invoice number
    pub static ref INVOICE_NUMBER: Regex =
        number_rule(r"N[uú]mero\s+d[ao]\s+(?:NFS-?e|Nota(?:\s+Fiscal)?)");

    pub static ref INVOICE_NUMBER_NFSE: Regex =
        number_rule(r"\bNFS-?e\s*(?:N[º°o]\.?|N[uú]mero|Nr\.?)");

    pub static ref INVOICE_NUMBER_NOTA: Regex =
        number_rule(r"\bNota\s+Fiscal\s*(?:N[º°o]\.?|N[uú]mero|Nr\.?)");

    /// `Nº da Nota` / `Nº da NFS-e`; a bare `Nº` is too often a street number.
    pub static ref INVOICE_NUMBER_SHORT: Regex =
        number_rule(r"\bN[º°]\.?\s*d[ao]\s+(?:Nota|NFS-?e)");

    // Issue date
    pub static ref ISSUE_DATE: Regex = date_rule(
        r"Data\s+(?:e\s+Hora\s+)?(?:d[ae]\s+)?Emiss[aã]o(?:\s+d[ao]\s+(?:NFS-?e|Nota))?"
    );

    pub static ref ISSUED_ON: Regex = date_rule(r"Emitid[ao]\s+em");

    pub static ref ISSUE_DATE_SHORT: Regex = date_rule(r"\bEmiss[aã]o");

    // Amounts
    pub static ref SERVICE_VALUE: Regex =
        amount_rule(r"Valor\s+(?:Total\s+)?d[oa]s?\s+Servi[cç]os?");

    pub static ref INVOICE_TOTAL: Regex =
        amount_rule(r"Valor\s+Total\s+d[ao]\s+(?:Nota|NFS-?e)");

    pub static ref NET_VALUE: Regex =
        amount_rule(r"Valor\s+L[ií]quido(?:\s+d[ao]\s+(?:Nota|NFS-?e))?");

    pub static ref TAX_BASE: Regex =
        amount_rule(r"Base\s+de\s+C[aá]lculo(?:\s+do\s+ISS(?:QN)?)?");

    pub static ref ISS_VALUE: Regex =
        amount_rule(r"Valor\s+(?:do\s+)?ISS(?:QN)?(?:\s+Retido)?");

    pub static ref ISS_LINE: Regex =
        amount_rule(r"(?m:^)[ \t]*ISS(?:QN)?(?:\s+Retido)?");

    // Service description
    pub static ref SERVICE_DISCRIMINATION: Regex =
        text_rule(r"Discrimina[cç][aã]o\s+d[oa]s?\s+Servi[cç]os?");

    pub static ref SERVICE_DESCRIPTION: Regex =
        text_rule(r"Descri[cç][aã]o\s+d[oa]s?\s+Servi[cç]os?");

    pub static ref SERVICE_RENDERED: Regex = text_rule(r"Servi[cç]o\s+Prestado");

    pub static ref SERVICE_CODE: Regex =
        text_rule(r"C[oó]digo\s+d[oa]\s+Servi[cç]o");

    /// A line that starts with a known invoice label, so it holds some other
    /// field rather than the value of the label above it.
    pub static ref LABEL_LINE: Regex = Regex::new(
        r"(?i)^[ \t]*(?:C\.?N\.?P\.?J|CPF|Inscri[cç][aã]o|Endere[cç]o|Munic[ií]pio|CEP|UF|Telefone|E-?mail|Raz[aã]o\s+Social|Nome\s+(?:Empresarial|Fantasia|d[oa])|Valor|Base\s+de\s+C[aá]lculo|ISS(?:QN)?|Al[ií]quota|Data|N[uú]mero|N[º°]|Nr|C[oó]digo|Discrimina[cç][aã]o|Descri[cç][aã]o|Servi[cç]o\s+Prestado|Tomador|Prestador)\b"
    ).unwrap();
}
