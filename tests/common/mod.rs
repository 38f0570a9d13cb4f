use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

type FixtureResult = Result<(), Box<dyn std::error::Error>>;

/// Builds a minimal text-layer PDF standing in for a nominal-roll document.
/// Each inner slice is one page; each string is one printed line. Table
/// columns should be separated by two-plus spaces, matching the gutters the
/// line-based strategy expects.
pub fn create_roll_pdf(path: &Path, pages: &[Vec<&str>]) -> FixtureResult {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let resources_id = text_resources(&mut doc);

    let mut page_ids = Vec::new();
    for lines in pages {
        page_ids.push(append_page(&mut doc, pages_id, resources_id, lines)?);
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| (*id).into()).collect::<Vec<_>>(),
            "Count" => i64::try_from(page_ids.len())?,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    doc.save(path)?;
    Ok(())
}

fn text_resources(doc: &mut Document) -> ObjectId {
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    })
}

fn append_page(
    doc: &mut Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    lines: &[&str],
) -> Result<ObjectId, Box<dyn std::error::Error>> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 11.into()]),
        Operation::new("TL", vec![14.into()]),
        Operation::new("Td", vec![40.into(), 800.into()]),
    ];
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
    }))
}
