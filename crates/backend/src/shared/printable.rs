//! Printable HTML sheet of QR labels.

use contracts::shared::qr::payload_label;
use qrcode::render::svg;
use qrcode::QrCode;

/// Pixel size of every printed code
const CODE_SIZE: u32 = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintableCode {
    pub payload: String,
    pub label: String,
}

impl PrintableCode {
    pub fn new(payload: &str) -> Self {
        Self {
            payload: payload.to_string(),
            label: caption(payload).to_string(),
        }
    }
}

/// Caption under a code: the payload without its `LOC:`/`PALLET:` prefix
pub fn caption(payload: &str) -> &str {
    payload_label(payload)
}

/// Inline SVG of one code, without the XML prolog
fn render_svg(payload: &str) -> anyhow::Result<String> {
    let code = QrCode::new(payload.as_bytes())?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(CODE_SIZE, CODE_SIZE)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();
    Ok(match image.find("<svg") {
        Some(start) => image[start..].to_string(),
        None => image,
    })
}

/// Full HTML document: three codes per row on screen, two when printed.
pub fn render_printable(codes: &[PrintableCode], title: &str) -> anyhow::Result<String> {
    let title = ammonia::clean_text(title);
    let mut cells = String::new();
    for code in codes {
        cells.push_str(&format!(
            "<div class=\"qr-cell\">{}<p class=\"qr-label\">{}</p></div>\n",
            render_svg(&code.payload)?,
            ammonia::clean_text(&code.label)
        ));
    }

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  body {{ font-family: sans-serif; margin: 24px; }}
  h1 {{ font-size: 20px; text-align: center; }}
  .qr-grid {{ display: grid; grid-template-columns: repeat(3, 1fr); gap: 24px; }}
  .qr-cell {{ display: flex; flex-direction: column; align-items: center; page-break-inside: avoid; }}
  .qr-cell svg {{ width: {size}px; height: {size}px; }}
  .qr-label {{ margin: 8px 0 0; font-size: 14px; font-weight: bold; }}
  @media print {{
    .qr-grid {{ grid-template-columns: repeat(2, 1fr); }}
    h1 {{ display: none; }}
  }}
</style>
</head>
<body>
<h1>{title}</h1>
<div class="qr-grid">
{cells}</div>
<script>window.onload = function () {{ window.print(); }};</script>
</body>
</html>
"#,
        title = title,
        size = CODE_SIZE,
        cells = cells
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_svg_per_code_with_caption() {
        let codes = vec![PrintableCode::new("LOC:A2-3-1"), PrintableCode::new("LOC:D5")];
        let html = render_printable(&codes, "Sección A").unwrap();
        assert_eq!(html.matches("<svg").count(), 2);
        assert!(html.contains("<p class=\"qr-label\">A2-3-1</p>"));
        assert!(html.contains("<p class=\"qr-label\">D5</p>"));
        assert!(!html.contains("<?xml"));
        assert!(html.contains("repeat(3, 1fr)"));
        assert!(html.contains("@media print"));
    }

    #[test]
    fn title_is_escaped() {
        let html = render_printable(&[], "<script>alert(1)</script>").unwrap();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn pallet_caption_drops_prefix() {
        let code = PrintableCode::new("PALLET:0b7e");
        assert_eq!(code.label, "0b7e");
    }
}
