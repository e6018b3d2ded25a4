//! Quote PDF renderer
//!
//! Turns a saved order into an A4 commercial proposal ("Proposta"): issuer
//! letterhead with optional logo, customer block, line-item table, grand
//! total. The table paginates; every page then gets the dark-green frame and
//! the footer, so they are drawn in a second pass once the page count is
//! known.
//!
//! All output goes to an in-memory byte buffer. Where the file ends up
//! (dialog, fixed export dir) is the caller's concern.

use crate::models::Order;
use crate::utils::{AppError, AppResult};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};
use std::io::BufWriter;
use std::path::Path;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
/// Frame inset, 25pt converted to millimeters.
const FRAME_INSET: f32 = 8.8;
const MARGIN_LEFT: f32 = 18.0;
const MARGIN_RIGHT: f32 = 192.0;
/// Below this the table breaks to a new page.
const BOTTOM_LIMIT: f32 = 28.0;
const ROW_HEIGHT: f32 = 6.0;

// Table column x positions.
const COL_CODE: f32 = MARGIN_LEFT;
const COL_NAME: f32 = 42.0;
const COL_QTY: f32 = 112.0;
const COL_WEIGHT: f32 = 128.0;
const COL_PRICE: f32 = 150.0;
const COL_SUBTOTAL: f32 = 172.0;

/// Identity printed on the letterhead and footer.
#[derive(Debug, Clone, Default)]
pub struct IssuerInfo {
    pub name: String,
    pub tax_id: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub email: String,
}

/// File name offered when saving the rendered quote.
pub fn suggested_filename(order: &Order) -> String {
    format!("Proposta_{}.pdf", order.number)
}

fn frame_color() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.39, 0.0, None))
}

fn money(value: f64) -> String {
    format!("R$ {:.2}", value).replace('.', ",")
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

/// Cursor over the current page. Breaking a page keeps every produced layer
/// so the frame/footer pass can revisit them.
struct QuoteWriter {
    doc: PdfDocumentReference,
    pages: Vec<PdfLayerReference>,
    y: f32,
}

impl QuoteWriter {
    fn new(doc: PdfDocumentReference, first: PdfLayerReference) -> Self {
        Self { doc, pages: vec![first], y: PAGE_HEIGHT - FRAME_INSET - 10.0 }
    }

    fn layer(&self) -> &PdfLayerReference {
        &self.pages[self.pages.len() - 1]
    }

    fn text(&self, font: &IndirectFontRef, size: f32, x: f32, content: &str) {
        self.layer().use_text(content, size, Mm(x), Mm(self.y), font);
    }

    fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    fn rule(&self, x1: f32, x2: f32) {
        self.layer().add_line(Line {
            points: vec![
                (Point::new(Mm(x1), Mm(self.y)), false),
                (Point::new(Mm(x2), Mm(self.y)), false),
            ],
            is_closed: false,
        });
    }

    fn break_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.pages.push(self.doc.get_page(page).get_layer(layer));
        self.y = PAGE_HEIGHT - FRAME_INSET - 12.0;
    }

    fn ensure_room(&mut self, needed: f32) -> bool {
        if self.y - needed < BOTTOM_LIMIT {
            self.break_page();
            return true;
        }
        false
    }
}

/// Render the proposal PDF for a saved order.
///
/// The logo is best-effort: a missing or undecodable PNG falls back to the
/// text letterhead without failing the export.
pub fn render_quote(order: &Order, issuer: &IssuerInfo, logo: Option<&Path>) -> AppResult<Vec<u8>> {
    let (doc, page1, layer1) = PdfDocument::new(
        format!("Proposta {}", order.number),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let first = doc.get_page(page1).get_layer(layer1);

    let fonts = Fonts {
        regular: add_font(&doc, BuiltinFont::Helvetica)?,
        bold: add_font(&doc, BuiltinFont::HelveticaBold)?,
        oblique: add_font(&doc, BuiltinFont::HelveticaOblique)?,
    };

    let mut w = QuoteWriter::new(doc, first);

    draw_letterhead(&mut w, &fonts, order, issuer, logo);
    draw_customer_block(&mut w, &fonts, order);
    draw_items(&mut w, &fonts, order);
    draw_total(&mut w, &fonts, order);

    // Frame and footer per page, now that the page count is final.
    let page_count = w.pages.len();
    for (index, layer) in w.pages.iter().enumerate() {
        draw_frame(layer);
        draw_footer(layer, &fonts, order, issuer, index + 1, page_count);
    }

    let mut writer = BufWriter::new(Vec::new());
    w.doc
        .save(&mut writer)
        .map_err(|e| AppError::Pdf(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| AppError::Pdf(e.to_string()))
}

fn add_font(doc: &PdfDocumentReference, font: BuiltinFont) -> AppResult<IndirectFontRef> {
    doc.add_builtin_font(font)
        .map_err(|e| AppError::Pdf(e.to_string()))
}

fn draw_letterhead(
    w: &mut QuoteWriter,
    fonts: &Fonts,
    order: &Order,
    issuer: &IssuerInfo,
    logo: Option<&Path>,
) {
    let drew_logo = logo.is_some_and(|path| draw_logo(w, path));
    if !drew_logo {
        w.text(&fonts.bold, 16.0, MARGIN_LEFT, &issuer.name);
        w.advance(6.0);
    } else {
        w.text(&fonts.bold, 12.0, MARGIN_LEFT + 32.0, &issuer.name);
        w.advance(6.0);
    }
    for detail in [
        format!("CNPJ: {}", issuer.tax_id),
        issuer.address.clone(),
        issuer.city.clone(),
        format!("{}  {}", issuer.phone, issuer.email),
    ] {
        if detail.trim().is_empty() {
            continue;
        }
        w.text(&fonts.regular, 9.0, MARGIN_LEFT, &detail);
        w.advance(4.5);
    }

    // Title block on the right.
    let title_y = w.y;
    {
        let layer = w.layer();
        layer.use_text(
            "PROPOSTA COMERCIAL",
            16.0,
            Mm(125.0),
            Mm(PAGE_HEIGHT - FRAME_INSET - 14.0),
            &fonts.bold,
        );
        layer.use_text(
            format!("Nº {}", order.number),
            12.0,
            Mm(125.0),
            Mm(PAGE_HEIGHT - FRAME_INSET - 22.0),
            &fonts.bold,
        );
        layer.use_text(
            format!("Data: {}", order.date),
            10.0,
            Mm(125.0),
            Mm(PAGE_HEIGHT - FRAME_INSET - 28.0),
            &fonts.regular,
        );
    }
    w.y = title_y.min(PAGE_HEIGHT - FRAME_INSET - 34.0);

    w.advance(3.0);
    w.rule(MARGIN_LEFT, MARGIN_RIGHT);
    w.advance(8.0);
}

fn draw_logo(w: &QuoteWriter, path: &Path) -> bool {
    use printpdf::image_crate::codecs::png::PngDecoder;
    use printpdf::{Image, ImageTransform};

    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Logo not readable, skipping");
            return false;
        }
    };
    let decoder = match PngDecoder::new(std::io::BufReader::new(file)) {
        Ok(decoder) => decoder,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Logo not a valid PNG, skipping");
            return false;
        }
    };
    let image = match Image::try_from(decoder) {
        Ok(image) => image,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Logo decode failed, skipping");
            return false;
        }
    };
    image.add_to_layer(
        w.layer().clone(),
        ImageTransform {
            translate_x: Some(Mm(MARGIN_LEFT)),
            translate_y: Some(Mm(PAGE_HEIGHT - FRAME_INSET - 26.0)),
            dpi: Some(300.0),
            ..Default::default()
        },
    );
    true
}

fn draw_customer_block(w: &mut QuoteWriter, fonts: &Fonts, order: &Order) {
    let c = &order.customer;
    w.text(&fonts.bold, 11.0, MARGIN_LEFT, "Cliente");
    w.advance(5.5);
    w.text(&fonts.regular, 10.0, MARGIN_LEFT, &c.name);
    w.advance(4.5);

    let mut lines = Vec::new();
    if !c.tax_id.is_empty() {
        lines.push(format!("CPF/CNPJ: {}", c.tax_id));
    }
    if !c.state_registration.is_empty() {
        lines.push(format!("IE: {}", c.state_registration));
    }
    let street = [c.address.as_str(), c.number.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if !street.is_empty() || !c.neighborhood.is_empty() {
        let mut line = street;
        if !c.neighborhood.is_empty() {
            if !line.is_empty() {
                line.push_str(" - ");
            }
            line.push_str(&c.neighborhood);
        }
        lines.push(line);
    }
    if !c.city.is_empty() || !c.state.is_empty() {
        lines.push(
            [c.city.as_str(), c.state.as_str()]
                .iter()
                .filter(|s| !s.is_empty())
                .cloned()
                .collect::<Vec<_>>()
                .join("/"),
        );
    }
    let contact = [c.phone.as_str(), c.email.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("  ");
    if !contact.is_empty() {
        lines.push(contact);
    }

    for line in lines {
        w.text(&fonts.regular, 9.0, MARGIN_LEFT, &line);
        w.advance(4.5);
    }
    w.advance(4.0);
}

fn draw_table_header(w: &mut QuoteWriter, fonts: &Fonts) {
    w.text(&fonts.bold, 10.0, COL_CODE, "Código");
    w.text(&fonts.bold, 10.0, COL_NAME, "Descrição");
    w.text(&fonts.bold, 10.0, COL_QTY, "Qtd");
    w.text(&fonts.bold, 10.0, COL_WEIGHT, "Peso");
    w.text(&fonts.bold, 10.0, COL_PRICE, "R$/kg");
    w.text(&fonts.bold, 10.0, COL_SUBTOTAL, "Subtotal");
    w.advance(2.0);
    w.rule(MARGIN_LEFT, MARGIN_RIGHT);
    w.advance(ROW_HEIGHT);
}

fn draw_items(w: &mut QuoteWriter, fonts: &Fonts, order: &Order) {
    draw_table_header(w, fonts);
    for line in &order.items {
        if w.ensure_room(ROW_HEIGHT) {
            draw_table_header(w, fonts);
        }
        // Truncate on characters; byte positions can split accented names.
        let name: String = if line.name.chars().count() > 40 {
            line.name.chars().take(37).collect::<String>() + "..."
        } else {
            line.name.clone()
        };
        w.text(&fonts.regular, 9.0, COL_CODE, &line.code);
        w.text(&fonts.regular, 9.0, COL_NAME, &name);
        w.text(&fonts.regular, 9.0, COL_QTY, &format!("{}", line.quantity));
        w.text(&fonts.regular, 9.0, COL_WEIGHT, &format!("{:.2} kg", line.total_weight));
        w.text(&fonts.regular, 9.0, COL_PRICE, &money(line.price_per_kg));
        w.text(&fonts.regular, 9.0, COL_SUBTOTAL, &money(line.subtotal));
        w.advance(ROW_HEIGHT);
    }
}

fn draw_total(w: &mut QuoteWriter, fonts: &Fonts, order: &Order) {
    w.ensure_room(ROW_HEIGHT * 2.0);
    w.rule(MARGIN_LEFT, MARGIN_RIGHT);
    w.advance(ROW_HEIGHT);
    w.text(&fonts.bold, 12.0, COL_PRICE - 18.0, "TOTAL:");
    w.text(&fonts.bold, 12.0, COL_SUBTOTAL, &money(order.total));
}

fn draw_frame(layer: &PdfLayerReference) {
    layer.set_outline_color(frame_color());
    layer.set_outline_thickness(1.5);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(FRAME_INSET), Mm(FRAME_INSET)), false),
            (Point::new(Mm(PAGE_WIDTH - FRAME_INSET), Mm(FRAME_INSET)), false),
            (
                Point::new(Mm(PAGE_WIDTH - FRAME_INSET), Mm(PAGE_HEIGHT - FRAME_INSET)),
                false,
            ),
            (Point::new(Mm(FRAME_INSET), Mm(PAGE_HEIGHT - FRAME_INSET)), false),
        ],
        is_closed: true,
    });
}

fn draw_footer(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    order: &Order,
    issuer: &IssuerInfo,
    page: usize,
    pages: usize,
) {
    layer.use_text(
        format!("{} - Proposta Nº {}", issuer.name, order.number),
        8.0,
        Mm(MARGIN_LEFT),
        Mm(FRAME_INSET - 4.5),
        &fonts.oblique,
    );
    layer.use_text(
        format!("Página {page}/{pages}"),
        8.0,
        Mm(MARGIN_RIGHT - 15.0),
        Mm(FRAME_INSET - 4.5),
        &fonts.oblique,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, OrderLine};

    fn issuer() -> IssuerInfo {
        IssuerInfo {
            name: "Alu Distribuidora".into(),
            tax_id: "00.000.000/0001-00".into(),
            address: "Rua das Ligas, 100".into(),
            city: "Curitiba/PR".into(),
            phone: "(41) 3333-0000".into(),
            email: "vendas@alu.example".into(),
        }
    }

    fn order(lines: usize) -> Order {
        let line = OrderLine {
            code: "A1".into(),
            name: "Perfil U 20x20".into(),
            unit_weight: 2.5,
            quantity: 4.0,
            total_weight: 10.0,
            subtotal: 100.0,
            price_per_kg: 10.0,
        };
        let items: Vec<OrderLine> = (0..lines).map(|_| line.clone()).collect();
        let total = Order::compute_total(&items);
        Order {
            id: Some("x".into()),
            number: 1001,
            date: "30/08/2026".into(),
            customer: Customer {
                name: "Jane Doe".into(),
                tax_id: "123.456.789-00".into(),
                city: "Curitiba".into(),
                state: "PR".into(),
                ..Default::default()
            },
            items,
            total,
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_quote(&order(3), &issuer(), None).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1_000);
    }

    #[test]
    fn test_render_paginates_long_orders() {
        let short = render_quote(&order(2), &issuer(), None).unwrap();
        let long = render_quote(&order(120), &issuer(), None).unwrap();
        assert!(long.len() > short.len());
        // Page objects are /Type /Page entries; a 120-line table cannot fit one page.
        let count = |bytes: &[u8]| {
            bytes.windows(5).filter(|win| win == b"/Page").count()
        };
        assert!(count(&long) > count(&short));
    }

    #[test]
    fn test_long_accented_item_name_renders() {
        // Char 37 falls inside a multibyte sequence; truncation must not
        // split it.
        let mut o = order(1);
        o.items[0].name = format!("{}ãçõéã piso", "x".repeat(36));
        let bytes = render_quote(&o, &issuer(), None).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_missing_logo_is_skipped() {
        let bytes = render_quote(
            &order(1),
            &issuer(),
            Some(Path::new("/nonexistent/logo.png")),
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_suggested_filename() {
        assert_eq!(suggested_filename(&order(1)), "Proposta_1001.pdf");
    }
}
