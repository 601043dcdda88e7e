//! PDF page writer built on lopdf.
//!
//! Text is drawn with the standard Type 1 base fonts in WinAnsiEncoding, so
//! no font program is embedded. Characters outside that encoding are
//! reported as [`DrawError::UnsupportedGlyph`].

use super::{FontSpec, PageGeometry, PageWriter};
use crate::error::{DrawError, Error, Result};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Base fonts every PDF reader provides that use a Latin text encoding.
///
/// `Symbol` and `ZapfDingbats` are left out: their built-in encodings do
/// not map WinAnsi bytes to the intended glyphs.
pub const STANDARD_FONTS: [&str; 12] = [
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-Oblique",
    "Helvetica-BoldOblique",
    "Times-Roman",
    "Times-Bold",
    "Times-Italic",
    "Times-BoldItalic",
    "Courier",
    "Courier-Bold",
    "Courier-Oblique",
    "Courier-BoldOblique",
];

/// Writes pages into a PDF and serializes it to `W` on save.
pub struct PdfPageWriter<W: Write> {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    geometry: PageGeometry,
    /// Registered base fonts; resource name is `F{index + 1}`
    fonts: Vec<(String, ObjectId)>,
    default_font: (usize, f64),
    current_font: (usize, f64),
    operations: Vec<Operation>,
    dirty: bool,
    saved: bool,
    sink: W,
}

impl PdfPageWriter<BufWriter<File>> {
    /// Create a writer that saves to a file.
    pub fn create<P: AsRef<Path>>(path: P, geometry: PageGeometry) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), geometry))
    }
}

impl<W: Write> PdfPageWriter<W> {
    /// Create a writer with Helvetica 12 as the initial font.
    pub fn new(sink: W, geometry: PageGeometry) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut writer = Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
            geometry,
            fonts: Vec::new(),
            default_font: (0, 0.0),
            current_font: (0, 0.0),
            operations: Vec::new(),
            dirty: false,
            saved: false,
            sink,
        };

        let default = FontSpec::default();
        let index = writer.register_font(&default.name);
        writer.default_font = (index, default.size);
        writer.current_font = writer.default_font;
        writer
    }

    /// Number of pages committed so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Page geometry used for every page.
    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Consume the writer and return the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn register_font(&mut self, base_font: &str) -> usize {
        if let Some(index) = self.fonts.iter().position(|(name, _)| name == base_font) {
            return index;
        }

        let mut font = Dictionary::new();
        font.set("Type", Object::Name(b"Font".to_vec()));
        font.set("Subtype", Object::Name(b"Type1".to_vec()));
        font.set("BaseFont", Object::Name(base_font.as_bytes().to_vec()));
        font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));

        let id = self.doc.add_object(font);
        self.fonts.push((base_font.to_string(), id));
        self.fonts.len() - 1
    }

    fn commit_page(&mut self) -> Result<()> {
        let content = Content {
            operations: std::mem::take(&mut self.operations),
        };
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut font_resources = Dictionary::new();
        for (i, (_, id)) in self.fonts.iter().enumerate() {
            font_resources.set(format!("F{}", i + 1), Object::Reference(*id));
        }
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(font_resources));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(self.pages_id));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.geometry.width as f32),
                Object::Real(self.geometry.height as f32),
            ]),
        );
        page.set("Contents", Object::Reference(content_id));
        page.set("Resources", Object::Dictionary(resources));

        let page_id = self.doc.add_object(page);
        self.page_ids.push(page_id);

        self.current_font = self.default_font;
        self.dirty = false;
        Ok(())
    }

    fn finish_document(&mut self) -> Result<()> {
        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set(
            "Kids",
            Object::Array(self.page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        );
        pages.set("Count", Object::Integer(self.page_ids.len() as i64));
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(self.pages_id));
        let catalog_id = self.doc.add_object(catalog);

        let mut info = Dictionary::new();
        info.set(
            "Producer",
            Object::string_literal(format!("repdf {}", env!("CARGO_PKG_VERSION"))),
        );
        info.set(
            "CreationDate",
            Object::string_literal(chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
        );
        let info_id = self.doc.add_object(info);

        self.doc.trailer.set("Root", Object::Reference(catalog_id));
        self.doc.trailer.set("Info", Object::Reference(info_id));

        self.doc.save_to(&mut self.sink)?;
        self.sink.flush()?;
        Ok(())
    }
}

impl<W: Write> PageWriter for PdfPageWriter<W> {
    fn set_font(&mut self, name: &str, size: f64) -> Result<()> {
        if self.saved {
            return Err(Error::AlreadySaved);
        }
        if !STANDARD_FONTS.contains(&name) {
            return Err(Error::UnsupportedFont(name.to_string()));
        }
        let index = self.register_font(name);
        self.current_font = (index, size);
        Ok(())
    }

    fn draw_string(&mut self, x: f64, y: f64, text: &str) -> std::result::Result<(), DrawError> {
        if self.saved {
            return Err(DrawError::Finalized);
        }

        // content streams hold f32 operands; a wider value would be written as inf
        let (tx, ty) = (x as f32, y as f32);
        if !tx.is_finite() || !ty.is_finite() {
            return Err(DrawError::Rejected(format!(
                "position ({x}, {y}) is outside the PDF number range"
            )));
        }

        let (index, size) = self.current_font;
        let bytes = encode_win_ansi(text).map_err(|ch| DrawError::UnsupportedGlyph {
            ch,
            font: self.fonts[index].0.clone(),
        })?;

        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(format!("F{}", index + 1).into_bytes()),
                    Object::Real(size as f32),
                ],
            ),
            Operation::new(
                "Td",
                vec![Object::Real(tx), Object::Real(ty)],
            ),
            Operation::new("Tj", vec![Object::String(bytes, StringFormat::Literal)]),
            Operation::new("ET", vec![]),
        ]);
        self.dirty = true;
        Ok(())
    }

    fn show_page(&mut self) -> Result<()> {
        if self.saved {
            return Err(Error::AlreadySaved);
        }
        self.commit_page()
    }

    fn save(&mut self) -> Result<()> {
        if self.saved {
            return Err(Error::AlreadySaved);
        }
        self.saved = true;

        if self.dirty {
            self.commit_page()?;
        }
        self.finish_document()
    }
}

/// Encode text in WinAnsiEncoding, returning the first unencodable character.
pub fn encode_win_ansi(text: &str) -> std::result::Result<Vec<u8>, char> {
    text.chars()
        .map(|ch| win_ansi_byte(ch).ok_or(ch))
        .collect()
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    let byte = match ch {
        '\t' => b' ',
        ' '..='~' | '\u{a0}'..='\u{ff}' => ch as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => return None,
    };
    Some(byte)
}
