//! Fixtures shared by unit tests.

use lopdf::{Document, Object, Stream, dictionary};

/// Build a PDF with one page per entry, each page showing the given lines.
///
/// Lines must be ASCII; the base-14 Helvetica font is used without an encoding.
pub(crate) fn make_test_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut content = String::from("BT /F1 11 Tf 50 760 Td ");
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                content.push_str("0 -14 Td ");
            }
            let escaped = line
                .replace('\\', "\\\\")
                .replace('(', "\\(")
                .replace(')', "\\)");
            content.push_str(&format!("({}) Tj ", escaped));
        }
        content.push_str("ET");

        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A service invoice as it comes out of a typical municipal NFS-e PDF.
pub(crate) const SAMPLE_INVOICE_LINES: &[&str] = &[
    "PREFEITURA MUNICIPAL DE SAO PAULO",
    "NOTA FISCAL ELETRONICA DE SERVICOS - NFS-e",
    "Numero da Nota: 00012345",
    "Data e Hora de Emissao: 15/01/2024 10:32:11",
    "PRESTADOR DE SERVICOS",
    "Razao Social: ACME Consultoria Ltda",
    "CNPJ: 12.345.678/0001-90",
    "DISCRIMINACAO DOS SERVICOS",
    "Consultoria em tecnologia da informacao",
    "Valor do Servico: R$ 1.500,00",
    "Base de Calculo: R$ 1.500,00",
    "Valor do ISS: R$ 75,00",
];
