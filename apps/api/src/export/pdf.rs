//! Plain-text → PDF export.
//!
//! Layout: one Helvetica 10pt line per text line on A4,
//! greedy word wrap at 80 columns, a short gap for blank lines, and a new page
//! when the next line would cross the bottom margin. Rendering is CPU-bound;
//! callers run it inside `tokio::task::spawn_blocking`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::export::ExportError;

/// Lines longer than this are word-wrapped.
pub const WRAP_COLUMNS: usize = 80;

const MM_TO_PT: f32 = 72.0 / 25.4;
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;
/// Horizontal padding inside the text cell.
const CELL_PADDING_MM: f32 = 1.0;
const LINE_HEIGHT_MM: f32 = 5.0;
const BLANK_LINE_MM: f32 = 3.0;
const FONT_SIZE_PT: f32 = 10.0;

/// WinAnsiEncoding code for U+2022 BULLET.
const WIN_ANSI_BULLET: u8 = 0x95;

/// One laid-out line: distance of its top edge from the top of the page, and its text.
#[derive(Debug, Clone, PartialEq)]
struct PlacedLine {
    top_mm: f32,
    text: String,
}

/// Renders `text` to PDF bytes.
pub fn render_pdf(text: &str) -> Result<Vec<u8>, ExportError> {
    let normalized = normalize_typography(text);
    if normalized.is_empty() {
        return Err(ExportError::EmptyContent);
    }

    let pages = paginate(&normalized);
    build_document(&pages)
}

/// Drops carriage returns, trims, and maps typographic punctuation to ASCII.
/// The bullet character is kept; the font encoding has a slot for it.
pub fn normalize_typography(text: &str) -> String {
    text.replace('\r', "")
        .trim()
        .chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .collect()
}

/// Greedy word wrap. Each emitted line plus a trailing space stays under
/// `WRAP_COLUMNS`; a single word longer than that is emitted on its own.
pub fn wrap_line(line: &str) -> Vec<String> {
    if line.chars().count() <= WRAP_COLUMNS {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split(' ') {
        if current.chars().count() + word.chars().count() + 1 < WRAP_COLUMNS {
            current.push_str(word);
            current.push(' ');
        } else {
            if !current.trim().is_empty() {
                lines.push(current.trim().to_string());
            }
            current = format!("{word} ");
        }
    }

    if !current.trim().is_empty() {
        lines.push(current.trim().to_string());
    }
    lines
}

fn paginate(text: &str) -> Vec<Vec<PlacedLine>> {
    let mut pages = vec![Vec::new()];
    let mut y = MARGIN_MM;
    let page_break_at = PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM;

    for raw in text.split('\n') {
        let line = raw.trim();
        if line.is_empty() {
            y += BLANK_LINE_MM;
            continue;
        }

        for wrapped in wrap_line(line) {
            if y + LINE_HEIGHT_MM > page_break_at {
                pages.push(Vec::new());
                y = MARGIN_MM;
            }
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    top_mm: y,
                    text: wrapped,
                });
            }
            y += LINE_HEIGHT_MM;
        }
    }

    pages
}

/// Encodes text for a WinAnsi Type1 font. Unmappable characters become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2022}' => WIN_ANSI_BULLET,
            c if c.is_ascii() && !c.is_ascii_control() => c as u8,
            c if ('\u{A0}'..='\u{FF}').contains(&c) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

fn build_document(pages: &[Vec<PlacedLine>]) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let x_pt = (MARGIN_MM + CELL_PADDING_MM) * MM_TO_PT;
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

    for page in pages {
        let mut operations = Vec::with_capacity(page.len() * 5);
        for line in page {
            // Baseline sits at the vertical middle of the cell, nudged down by the x-height.
            let baseline_mm = line.top_mm + LINE_HEIGHT_MM / 2.0 + 0.3 * FONT_SIZE_PT / MM_TO_PT;
            let y_pt = (PAGE_HEIGHT_MM - baseline_mm) * MM_TO_PT;

            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), FONT_SIZE_PT.into()]));
            operations.push(Operation::new("Td", vec![x_pt.into(), y_pt.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(
                    encode_win_ansi(&line.text),
                    StringFormat::Literal,
                )],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        (PAGE_WIDTH_MM * MM_TO_PT).into(),
        (PAGE_HEIGHT_MM * MM_TO_PT).into(),
    ];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_pdf("Jane Doe\n\nProfessional Summary\n• Built things").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_blank_text_is_rejected() {
        assert!(matches!(
            render_pdf("  \r\n \n").unwrap_err(),
            ExportError::EmptyContent
        ));
    }

    #[test]
    fn test_typography_is_mapped_to_ascii() {
        assert_eq!(
            normalize_typography("\u{201C}Led\u{201D} \u{2013} it\u{2019}s \u{2014} done\r\n"),
            "\"Led\" - it's - done"
        );
        assert_eq!(normalize_typography("\u{2022} item"), "\u{2022} item");
    }

    #[test]
    fn test_short_lines_are_not_wrapped() {
        let line = "a".repeat(WRAP_COLUMNS);
        assert_eq!(wrap_line(&line), vec![line.clone()]);
    }

    #[test]
    fn test_long_lines_wrap_under_column_limit() {
        let line = "Delivered measurable outcomes across distributed teams ".repeat(6);
        let wrapped = wrap_line(line.trim());

        assert!(wrapped.len() > 1);
        for piece in &wrapped {
            assert!(piece.chars().count() + 1 < WRAP_COLUMNS, "too long: {piece}");
        }
        assert_eq!(wrapped.join(" "), line.trim());
    }

    #[test]
    fn test_overlong_word_stands_alone() {
        let word = "x".repeat(100);
        let line = format!("short {word} tail");
        assert_eq!(wrap_line(&line), vec!["short".to_string(), word, "tail".to_string()]);
    }

    #[test]
    fn test_long_documents_span_pages() {
        let text = (0..120)
            .map(|i| format!("Line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let pages = paginate(&text);

        assert!(pages.len() >= 3);
        for page in &pages {
            for line in page {
                assert!(line.top_mm + LINE_HEIGHT_MM <= PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM);
            }
        }
        assert_eq!(pages.iter().map(Vec::len).sum::<usize>(), 120);
    }

    #[test]
    fn test_blank_lines_add_a_short_gap() {
        let pages = paginate("one\n\ntwo");
        let tops: Vec<f32> = pages[0].iter().map(|l| l.top_mm).collect();
        assert_eq!(tops, vec![MARGIN_MM, MARGIN_MM + LINE_HEIGHT_MM + BLANK_LINE_MM]);
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("A\u{2022}é漢"), vec![b'A', 0x95, 0xE9, b'?']);
    }
}
