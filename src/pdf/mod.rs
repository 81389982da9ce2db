//! # PDF Serializer
//!
//! Takes the laid-out pages and writes a PDF 1.7 file.
//!
//! The writer emits raw bytes itself. The subset a quote needs is small:
//! standard Type1 fonts with WinAnsi encoding, filled rectangles, text runs,
//! and at most a few image XObjects for the logo.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (fonts, pages, content streams, etc.)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Layout coordinates grow downward from the top-left corner. PDF user space
//! grows upward from the bottom-left, so every y is flipped against the page
//! height here and nowhere else.

use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite;
use std::io::Write as IoWrite;

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::font::{encoding, FontContext, StandardFont};
use crate::logo::{Logo, LogoPixels};
use crate::layout::{DrawCommand, LayoutElement, LayoutPage};

/// Document information dictionary entries.
#[derive(Debug, Clone, Default)]
pub struct PdfMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter {
    fonts: FontContext,
}

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<Vec<u8>>,
    /// Font and its object id, in resource order (`/F0`, `/F1`, ...).
    font_objects: Vec<(StandardFont, usize)>,
}

impl PdfBuilder {
    fn new() -> Self {
        // 0 = placeholder (PDF objects are 1-indexed), 1 = Catalog, 2 = Pages.
        Self {
            objects: vec![Vec::new(), Vec::new(), Vec::new()],
            font_objects: Vec::new(),
        }
    }

    fn push(&mut self, data: Vec<u8>) -> usize {
        self.objects.push(data);
        self.objects.len() - 1
    }

    fn push_stream(&mut self, dict: &str, payload: &[u8]) -> usize {
        let mut data: Vec<u8> = Vec::new();
        let _ = write!(data, "<< {} /Length {} >>\nstream\n", dict, payload.len());
        data.extend_from_slice(payload);
        data.extend_from_slice(b"\nendstream");
        self.push(data)
    }

    fn font_index(&self, font: StandardFont) -> usize {
        self.font_objects
            .iter()
            .position(|(f, _)| *f == font)
            .unwrap_or(0)
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self {
            fonts: FontContext::new(),
        }
    }

    /// Write laid-out pages to a PDF byte vector.
    pub fn write(&self, pages: &[LayoutPage], metadata: &PdfMetadata) -> Vec<u8> {
        let mut builder = PdfBuilder::new();
        self.register_fonts(&mut builder, pages);
        let font_resources = build_font_resource_dict(&builder.font_objects);

        let mut page_obj_ids: Vec<usize> = Vec::new();
        let mut image_counter = 0usize;
        for page in pages {
            // Images first: the content stream names them by resource index.
            let mut xobjects: Vec<(usize, usize)> = Vec::new();
            for element in &page.elements {
                if let DrawCommand::Image { image } = &element.draw {
                    let obj_id = write_image_xobject(&mut builder, image);
                    xobjects.push((image_counter, obj_id));
                    image_counter += 1;
                }
            }

            let content = self.build_content_stream(page, &builder, &xobjects);
            let compressed = compress_to_vec_zlib(&content, 6);
            let content_obj_id = builder.push_stream("/Filter /FlateDecode", &compressed);

            let mut resources = format!("/Font << {} >>", font_resources);
            if !xobjects.is_empty() {
                let entries = xobjects
                    .iter()
                    .map(|(idx, id)| format!("/Im{} {} 0 R", idx, id))
                    .collect::<Vec<_>>()
                    .join(" ");
                let _ = write!(resources, " /XObject << {} >>", entries);
            }
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << {} >> >>",
                page.width, page.height, content_obj_id, resources
            );
            page_obj_ids.push(builder.push(page_dict.into_bytes()));
        }

        builder.objects[1] = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2] = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let mut info: Vec<u8> = b"<< ".to_vec();
        if let Some(title) = &metadata.title {
            write_pdf_string_entry(&mut info, "Title", title);
        }
        if let Some(author) = &metadata.author {
            write_pdf_string_entry(&mut info, "Author", author);
        }
        info.extend_from_slice(b"/Producer (quotepage) /Creator (quotepage) >>");
        let info_obj_id = builder.push(info);

        log::debug!(
            "Serialized {} page(s) into {} PDF objects",
            pages.len(),
            builder.objects.len() - 1
        );
        serialize(&builder, info_obj_id)
    }

    /// Each distinct standard font used anywhere in the document gets one
    /// object. Sorted so identical input yields identical bytes.
    fn register_fonts(&self, builder: &mut PdfBuilder, pages: &[LayoutPage]) {
        let mut fonts: BTreeSet<StandardFont> = pages
            .iter()
            .flat_map(|p| p.elements.iter())
            .filter_map(|e| match &e.draw {
                DrawCommand::Text { font, .. } => Some(StandardFont::for_spec(font)),
                _ => None,
            })
            .collect();
        if fonts.is_empty() {
            fonts.insert(StandardFont::Helvetica);
        }

        for font in fonts {
            let dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.pdf_name()
            );
            let obj_id = builder.push(dict.into_bytes());
            builder.font_objects.push((font, obj_id));
        }
    }

    fn build_content_stream(
        &self,
        page: &LayoutPage,
        builder: &PdfBuilder,
        xobjects: &[(usize, usize)],
    ) -> Vec<u8> {
        let mut stream: Vec<u8> = Vec::new();
        let mut images = xobjects.iter();
        for element in &page.elements {
            self.write_element(&mut stream, element, page.height, builder, &mut images);
        }
        stream
    }

    fn write_element<'a>(
        &self,
        stream: &mut Vec<u8>,
        element: &LayoutElement,
        page_height: f64,
        builder: &PdfBuilder,
        images: &mut impl Iterator<Item = &'a (usize, usize)>,
    ) {
        match &element.draw {
            DrawCommand::Rect { fill } => {
                if fill.a <= 0.0 {
                    return;
                }
                let y = page_height - element.y - element.height;
                let _ = write!(
                    stream,
                    "q\n{:.3} {:.3} {:.3} rg\n{:.2} {:.2} {:.2} {:.2} re\nf\nQ\n",
                    fill.r, fill.g, fill.b, element.x, y, element.width, element.height
                );
            }

            DrawCommand::Text { text, font, color } => {
                if text.is_empty() {
                    return;
                }
                let idx = builder.font_index(StandardFont::for_spec(font));
                let baseline = element.y + self.fonts.ascent(font);
                let _ = write!(
                    stream,
                    "BT\n{:.3} {:.3} {:.3} rg\n/F{} {:.1} Tf\n{:.2} {:.2} Td\n(",
                    color.r,
                    color.g,
                    color.b,
                    idx,
                    font.size,
                    element.x,
                    page_height - baseline
                );
                stream.extend_from_slice(&encode_winansi(text));
                stream.extend_from_slice(b") Tj\nET\n");
            }

            DrawCommand::Image { .. } => {
                if let Some((idx, _)) = images.next() {
                    let y = page_height - element.y - element.height;
                    let _ = write!(
                        stream,
                        "q\n{:.4} 0 0 {:.4} {:.2} {:.2} cm\n/Im{} Do\nQ\n",
                        element.width, element.height, element.x, y, idx
                    );
                }
            }
        }
    }
}

fn build_font_resource_dict(font_objects: &[(StandardFont, usize)]) -> String {
    font_objects
        .iter()
        .enumerate()
        .map(|(i, (_, obj_id))| format!("/F{} {} 0 R", i, obj_id))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write the image as one XObject, plus an SMask XObject when it has alpha.
/// Returns the main XObject id.
fn write_image_xobject(builder: &mut PdfBuilder, logo: &Logo) -> usize {
    match &logo.pixels {
        LogoPixels::Jpeg { data, color_space } => {
            let dict = format!(
                "/Type /XObject /Subtype /Image /Width {} /Height {} \
                 /ColorSpace {} /BitsPerComponent 8 /Filter /DCTDecode",
                logo.width_px,
                logo.height_px,
                color_space.pdf_name()
            );
            builder.push_stream(&dict, data)
        }

        LogoPixels::Raw { rgb, alpha } => {
            let smask_ref = alpha
                .as_ref()
                .map(|alpha| {
                    let dict = format!(
                        "/Type /XObject /Subtype /Image /Width {} /Height {} \
                         /ColorSpace /DeviceGray /BitsPerComponent 8 /Filter /FlateDecode",
                        logo.width_px, logo.height_px
                    );
                    let id = builder.push_stream(&dict, &compress_to_vec_zlib(alpha, 6));
                    format!(" /SMask {} 0 R", id)
                })
                .unwrap_or_default();

            let dict = format!(
                "/Type /XObject /Subtype /Image /Width {} /Height {} \
                 /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode{}",
                logo.width_px, logo.height_px, smask_ref
            );
            builder.push_stream(&dict, &compress_to_vec_zlib(rgb, 6))
        }
    }
}

fn write_pdf_string_entry(out: &mut Vec<u8>, key: &str, value: &str) {
    let _ = write!(out, "/{} (", key);
    out.extend_from_slice(&encode_winansi(value));
    out.extend_from_slice(b") ");
}

/// Encode text for a literal PDF string under WinAnsiEncoding, escaping the
/// delimiters. Characters outside the encoding become `?`.
fn encode_winansi(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' | '(' | ')' => {
                out.push(b'\\');
                out.push(ch as u8);
            }
            _ => out.push(encoding::winansi_byte(ch).unwrap_or(encoding::REPLACEMENT as u8)),
        }
    }
    out
}

/// Serialize all objects into the final PDF byte stream.
fn serialize(builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
    let mut output: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

    output.extend_from_slice(b"%PDF-1.7\n");
    output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

    for (i, data) in builder.objects.iter().enumerate().skip(1) {
        offsets[i] = output.len();
        let _ = write!(output, "{} 0 obj\n", i);
        output.extend_from_slice(data);
        output.extend_from_slice(b"\nendobj\n\n");
    }

    let xref_offset = output.len();
    let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
    let _ = write!(output, "0000000000 65535 f \n");
    for offset in offsets.iter().skip(1) {
        let _ = write!(output, "{:010} 00000 n \n", offset);
    }

    let _ = write!(
        output,
        "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
        builder.objects.len(),
        info_obj_id,
        xref_offset
    );
    output
}
