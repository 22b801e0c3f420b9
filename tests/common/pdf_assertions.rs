use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object};
use std::collections::BTreeSet;

/// Concatenates the string operands of every `Tj` on a page (1-based).
pub fn page_text(doc: &LopdfDocument, page_number: u32) -> String {
    let Some(page_id) = doc.get_pages().get(&page_number).copied() else {
        return String::new();
    };
    let Ok(bytes) = doc.get_page_content(page_id) else {
        return String::new();
    };
    let Ok(content) = Content::decode(&bytes) else {
        return String::new();
    };
    let mut text = String::new();
    for operation in content.operations.iter().filter(|op| op.operator == "Tj") {
        if let Some(Object::String(bytes, _)) = operation.operands.first() {
            text.push_str(&String::from_utf8_lossy(bytes));
            text.push(' ');
        }
    }
    text
}

/// Counts the operations with the given operator on a page (1-based).
pub fn count_operator(doc: &LopdfDocument, page_number: u32, operator: &str) -> usize {
    let Some(page_id) = doc.get_pages().get(&page_number).copied() else {
        return 0;
    };
    doc.get_page_content(page_id)
        .ok()
        .and_then(|bytes| Content::decode(&bytes).ok())
        .map_or(0, |content| {
            content
                .operations
                .iter()
                .filter(|op| op.operator == operator)
                .count()
        })
}

/// Resolves an object that may be an indirect reference.
fn resolve<'a>(doc: &'a LopdfDocument, object: &'a Object) -> Option<&'a Object> {
    match object.as_reference() {
        Ok(id) => doc.get_object(id).ok(),
        Err(_) => Some(object),
    }
}

/// Every `BaseFont` in the `Resources -> Font` dictionaries of the pages,
/// whether the fonts are inline or indirect.
pub fn font_names(doc: &LopdfDocument) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for page_id in doc.get_pages().values() {
        let Ok(page) = doc.get_dictionary(*page_id) else {
            continue;
        };
        let Some(resources) = page
            .get(b"Resources")
            .ok()
            .and_then(|r| resolve(doc, r))
            .and_then(|r| r.as_dict().ok())
        else {
            continue;
        };
        let Some(fonts) = resources
            .get(b"Font")
            .ok()
            .and_then(|f| resolve(doc, f))
            .and_then(|f| f.as_dict().ok())
        else {
            continue;
        };
        for (_, font) in fonts.iter() {
            let base = resolve(doc, font)
                .and_then(|f| f.as_dict().ok())
                .and_then(|f| f.get(b"BaseFont").ok())
                .and_then(|b| b.as_name().ok());
            if let Some(base) = base {
                names.insert(String::from_utf8_lossy(base).into_owned());
            }
        }
    }
    names
}

/// The `Td` origin and string of every `Tj` on a page (1-based), in points.
pub fn text_origins(doc: &LopdfDocument, page_number: u32) -> Vec<(f32, f32, String)> {
    let Some(page_id) = doc.get_pages().get(&page_number).copied() else {
        return Vec::new();
    };
    let Some(content) = doc
        .get_page_content(page_id)
        .ok()
        .and_then(|bytes| Content::decode(&bytes).ok())
    else {
        return Vec::new();
    };
    let mut origin = (0.0, 0.0);
    let mut shown = Vec::new();
    for operation in &content.operations {
        match operation.operator.as_str() {
            "Td" => {
                let x = operation.operands.first().and_then(|o| o.as_float().ok());
                let y = operation.operands.get(1).and_then(|o| o.as_float().ok());
                if let (Some(x), Some(y)) = (x, y) {
                    origin = (x, y);
                }
            }
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operation.operands.first() {
                    shown.push((origin.0, origin.1, String::from_utf8_lossy(bytes).into_owned()));
                }
            }
            _ => {}
        }
    }
    shown
}

/// Width and height of the MediaBox of a page (1-based), in points.
pub fn media_box(doc: &LopdfDocument, page_number: u32) -> Option<(f32, f32)> {
    let page_id = doc.get_pages().get(&page_number).copied()?;
    let page = doc.get_dictionary(page_id).ok()?;
    let media_box = page.get(b"MediaBox").ok()?.as_array().ok()?;
    let width = media_box.get(2)?.as_float().ok()?;
    let height = media_box.get(3)?.as_float().ok()?;
    Some((width, height))
}
