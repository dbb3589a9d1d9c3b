/// Job sheet PDF
///
/// One page the size of the print job itself:
/// - black border on the page edge
/// - red safe-zone rectangle inset by `safe_zone` on every side
/// - order details inside the safe zone, comments wrapped at 50 characters
///
/// Lines whose baseline would fall below the safe zone are left out, so long
/// comments on small sheets are cut short rather than printed off the page.
///
/// All geometry is in millimetres with the origin at the bottom-left
/// corner, matching PDF user space.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::config::{COMMENT_WRAP_WIDTH, JOB_SHEET_DIR};
use crate::error::JobSheetError;
use crate::state::data::Order;

/// Gap between the safe zone line and the text column
const TEXT_INSET_MM: f64 = 5.0;
/// Distance from the safe zone top to the first baseline
const FIRST_LINE_DROP_MM: f64 = 10.0;
const HEADER_FONT_SIZE: f32 = 12.0;
const BODY_FONT_SIZE: f32 = 10.0;
const HEADER_LINE_MM: f64 = 7.0;
const BODY_LINE_MM: f64 = 5.0;

/// `<order_folder>/02_REFERENCES/<order_id>_job_sheet.pdf`
pub fn job_sheet_path(order_folder: &Path, order_id: &str) -> PathBuf {
    order_folder
        .join(JOB_SHEET_DIR)
        .join(format!("{}_job_sheet.pdf", order_id))
}

/// Axis-aligned rectangle in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectMm {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectMm {
    fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.x, self.y),
            (self.x + self.width, self.y),
            (self.x + self.width, self.y + self.height),
            (self.x, self.y + self.height),
        ]
    }
}

/// Typeface weight of a text line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Bold,
    Regular,
}

/// One line of text with its baseline position
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub weight: Weight,
}

/// Everything drawn on the page, computed before touching the PDF library
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub border: RectMm,
    pub safe_zone: RectMm,
    pub lines: Vec<TextLine>,
    /// Lines left out because they fell below the safe zone
    pub truncated: usize,
}

impl SheetLayout {
    pub fn for_order(order: &Order, width_mm: f64, height_mm: f64, safe_zone_mm: f64) -> Self {
        let border = RectMm {
            x: 0.0,
            y: 0.0,
            width: width_mm,
            height: height_mm,
        };
        let safe_zone = RectMm {
            x: safe_zone_mm,
            y: safe_zone_mm,
            width: width_mm - 2.0 * safe_zone_mm,
            height: height_mm - 2.0 * safe_zone_mm,
        };

        let x = safe_zone_mm + TEXT_INSET_MM;
        let mut y = height_mm - safe_zone_mm - FIRST_LINE_DROP_MM;
        let mut lines = Vec::new();
        let mut truncated = 0;
        let mut push = |text: String, weight: Weight, y: f64| {
            if y < safe_zone_mm {
                truncated += 1;
            } else {
                lines.push(TextLine { text, x, y, weight });
            }
        };

        let header = [
            format!("Order ID: {}", order.order_id),
            format!("Created: {}", order.created_label()),
            format!("Dimensions: {}mm x {}mm", width_mm, height_mm),
            format!("Safe Zone: {}mm", safe_zone_mm),
        ];
        for text in header {
            push(text, Weight::Bold, y);
            y -= HEADER_LINE_MM;
        }

        if !order.comments.is_empty() {
            push("Comments:".to_string(), Weight::Bold, y);
            y -= HEADER_LINE_MM;
            for chunk in wrap_comments(&order.comments, COMMENT_WRAP_WIDTH) {
                push(chunk, Weight::Regular, y);
                y -= BODY_LINE_MM;
            }
        }

        SheetLayout {
            page_width: width_mm,
            page_height: height_mm,
            border,
            safe_zone,
            lines,
            truncated,
        }
    }
}

/// Hard-wrap `text` every `width` characters, ignoring word boundaries
pub fn wrap_comments(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Render the job sheet for `order` to `output_path`.
///
/// The page is `width_mm` × `height_mm`; the safe-zone rectangle is inset
/// by `safe_zone_mm`. Missing parent directories are created.
pub fn generate_job_sheet(
    order: &Order,
    output_path: &Path,
    width_mm: f64,
    height_mm: f64,
    safe_zone_mm: f64,
) -> Result<(), JobSheetError> {
    let layout = SheetLayout::for_order(order, width_mm, height_mm, safe_zone_mm);
    if layout.truncated > 0 {
        tracing::warn!(
            order_id = %order.order_id,
            lines_dropped = layout.truncated,
            "Job sheet too small for all comments"
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(|source| JobSheetError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let result = render(&layout, &order.order_id, output_path);
    match &result {
        Ok(()) => tracing::info!(order_id = %order.order_id, path = %output_path.display(), "Job sheet written"),
        Err(e) => tracing::error!(order_id = %order.order_id, error = %e, "Error generating job sheet"),
    }
    result
}

fn render(layout: &SheetLayout, title: &str, output_path: &Path) -> Result<(), JobSheetError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("{} job sheet", title),
        mm(layout.page_width),
        mm(layout.page_height),
        "Job sheet",
    );
    let canvas = doc.get_page(page).get_layer(layer);

    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| JobSheetError::Render(format!("{:?}", e)))?;
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| JobSheetError::Render(format!("{:?}", e)))?;

    canvas.set_outline_thickness(1.0);
    canvas.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    stroke_rect(&canvas, &layout.border);

    canvas.set_outline_color(Color::Rgb(Rgb::new(1.0, 0.0, 0.0, None)));
    stroke_rect(&canvas, &layout.safe_zone);

    canvas.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    for line in &layout.lines {
        let (font, size): (&IndirectFontRef, f32) = match line.weight {
            Weight::Bold => (&bold, HEADER_FONT_SIZE),
            Weight::Regular => (&regular, BODY_FONT_SIZE),
        };
        canvas.use_text(line.text.clone(), size, mm(line.x), mm(line.y), font);
    }

    let file = File::create(output_path).map_err(|source| JobSheetError::Io {
        path: output_path.to_path_buf(),
        source,
    })?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| JobSheetError::Render(format!("{:?}", e)))?;

    Ok(())
}

fn stroke_rect(canvas: &PdfLayerReference, rect: &RectMm) {
    let points = rect
        .corners()
        .iter()
        .map(|&(x, y)| (Point::new(mm(x), mm(y)), false))
        .collect();
    canvas.add_line(Line {
        points,
        is_closed: true,
    });
}

fn mm(value: f64) -> Mm {
    Mm(value as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{OrderStatus, CREATED_DATE_FORMAT};
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    fn job_42(comments: &str) -> Order {
        Order {
            order_id: "JOB-42".to_string(),
            comments: comments.to_string(),
            status: OrderStatus::InProgress,
            folder_path: PathBuf::from("orders/JOB-42"),
            created_date: NaiveDateTime::parse_from_str("2024-05-06 07:08:09", CREATED_DATE_FORMAT)
                .unwrap(),
            width: 200.0,
            height: 150.0,
            safe_zone: 5.0,
        }
    }

    #[test]
    fn test_path_convention() {
        assert_eq!(
            job_sheet_path(Path::new("orders/JOB-42"), "JOB-42"),
            PathBuf::from("orders/JOB-42/02_REFERENCES/JOB-42_job_sheet.pdf")
        );
    }

    #[test]
    fn test_wrap_at_fifty_chars() {
        let text = "x".repeat(120);
        let lines = wrap_comments(&text, 50);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 50);
        assert_eq!(lines[2].len(), 20);
    }

    #[test]
    fn test_wrap_counts_characters_not_bytes() {
        let lines = wrap_comments("žluťoučký kůň", 5);
        assert_eq!(lines, vec!["žluťo", "učký ", "kůň"]);
    }

    #[test]
    fn test_geometry() {
        let layout = SheetLayout::for_order(&job_42("Rush job"), 200.0, 150.0, 5.0);

        assert_eq!(layout.page_width, 200.0);
        assert_eq!(layout.page_height, 150.0);
        assert_eq!(
            layout.safe_zone,
            RectMm {
                x: 5.0,
                y: 5.0,
                width: 190.0,
                height: 140.0
            }
        );
        assert!(layout.lines.iter().all(|l| l.x > layout.safe_zone.x));
    }

    #[test]
    fn test_text_block() {
        let layout = SheetLayout::for_order(&job_42("Rush job"), 200.0, 150.0, 5.0);
        let texts: Vec<_> = layout.lines.iter().map(|l| l.text.as_str()).collect();

        assert_eq!(
            texts,
            vec![
                "Order ID: JOB-42",
                "Created: 2024-05-06 07:08:09",
                "Dimensions: 200mm x 150mm",
                "Safe Zone: 5mm",
                "Comments:",
                "Rush job",
            ]
        );
        assert_eq!(layout.lines[5].weight, Weight::Regular);
        // Successive lines move down the page
        assert!(layout.lines.windows(2).all(|w| w[1].y < w[0].y));
        assert_eq!(layout.truncated, 0);
    }

    #[test]
    fn test_long_comments_stay_inside_safe_zone() {
        let layout = SheetLayout::for_order(&job_42(&"c".repeat(900)), 100.0, 100.0, 3.0);

        // 4 header lines, "Comments:" and the 10 of 18 wrapped lines that fit
        assert_eq!(layout.lines.len(), 15);
        assert_eq!(layout.truncated, 8);
        assert!(layout.lines.iter().all(|l| l.y >= layout.safe_zone.y));
    }

    #[test]
    fn test_empty_comments_omit_block() {
        let layout = SheetLayout::for_order(&job_42(""), 200.0, 150.0, 5.0);

        assert_eq!(layout.lines.len(), 4);
        assert!(layout.lines.iter().all(|l| l.text != "Comments:"));
    }

    #[test]
    fn test_writes_pdf_and_creates_directory() {
        let dir = TempDir::new().unwrap();
        let path = job_sheet_path(&dir.path().join("JOB-42"), "JOB-42");

        generate_job_sheet(&job_42("Rush job"), &path, 200.0, 150.0, 5.0).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_unwritable_target_fails() {
        let dir = TempDir::new().unwrap();
        // Parent "directory" is a regular file
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let result = generate_job_sheet(&job_42(""), &blocker.join("sheet.pdf"), 200.0, 150.0, 5.0);

        assert!(matches!(result, Err(JobSheetError::Io { .. })));
    }
}
