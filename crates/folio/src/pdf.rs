//! Low-level PDF serialization on top of `pdf-writer`.
//!
//! Each page owns one image XObject and one content stream; all pages share
//! a single standard Type 1 font for their titles. Image samples are
//! zlib-compressed and an alpha channel, when present, becomes a soft mask.

use std::io::{self, Write};

use flate2::{Compression, write::ZlibEncoder};
use image::DynamicImage;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use folio_core::{
    color::Color,
    font::{self, StandardFont},
    geometry::Size,
    placement::Placement,
};

use crate::compose::PageStyle;

const FONT_NAME: Name<'static> = Name(b"F1");
const IMAGE_NAME: Name<'static> = Name(b"Im1");

/// Title appearance resolved for drawing.
pub(crate) struct TitleStyle {
    font: StandardFont,
    size: f32,
    color: Color,
}

impl From<&PageStyle> for TitleStyle {
    fn from(style: &PageStyle) -> Self {
        Self {
            font: style.font(),
            size: style.font_size(),
            color: style.color(),
        }
    }
}

/// Compressed image samples ready to embed.
pub(crate) struct RasterImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl RasterImage {
    /// Splits `image` into compressed RGB samples and an optional alpha mask.
    pub(crate) fn from_image(image: &DynamicImage) -> io::Result<Self> {
        let rgb = image.to_rgb8();
        let alpha = if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            let samples: Vec<u8> = rgba.pixels().map(|pixel| pixel.0[3]).collect();
            Some(deflate(&samples)?)
        } else {
            None
        };

        Ok(Self {
            width: rgb.width(),
            height: rgb.height(),
            rgb: deflate(rgb.as_raw())?,
            alpha,
        })
    }
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Accumulates pages and serializes them into one PDF file.
pub(crate) struct PdfBuilder {
    pdf: Pdf,
    next_ref: Ref,
    catalog_id: Ref,
    page_tree_id: Ref,
    font_id: Ref,
    page_ids: Vec<Ref>,
    page_size: Size,
    font: StandardFont,
}

impl PdfBuilder {
    pub(crate) fn new(page_size: Size, font: StandardFont) -> Self {
        let mut next_ref = Ref::new(1);
        let catalog_id = next_ref.bump();
        let page_tree_id = next_ref.bump();
        let font_id = next_ref.bump();

        Self {
            pdf: Pdf::new(),
            next_ref,
            catalog_id,
            page_tree_id,
            font_id,
            page_ids: Vec::new(),
            page_size,
            font,
        }
    }

    pub(crate) fn set_document_title(&mut self, title: &str) {
        let info_id = self.next_ref.bump();
        self.pdf
            .document_info(info_id)
            .title(TextStr(title))
            .creator(TextStr(concat!("folio ", env!("CARGO_PKG_VERSION"))));
    }

    /// Adds a page with `title` above `image` at `placement`.
    pub(crate) fn add_page(
        &mut self,
        title: &str,
        style: &TitleStyle,
        placement: Placement,
        image: &RasterImage,
    ) {
        let page_id = self.next_ref.bump();
        let content_id = self.next_ref.bump();
        let image_id = self.next_ref.bump();
        let mask_id = image.alpha.as_ref().map(|_| self.next_ref.bump());

        self.write_image(image_id, mask_id, image);

        let mut content = Content::new();

        let anchor = placement.title_anchor();
        let text_width = style.font.text_width(title, style.size);
        let [r, g, b] = style.color.to_rgb();
        content.save_state();
        content.set_fill_rgb(r, g, b);
        content.begin_text();
        content.set_font(FONT_NAME, style.size);
        content.next_line(anchor.x() - text_width / 2.0, anchor.y());
        content.show(Str(&font::encode_win_ansi(title)));
        content.end_text();
        content.restore_state();

        let bounds = placement.image();
        content.save_state();
        content.transform([
            bounds.width(),
            0.0,
            0.0,
            bounds.height(),
            bounds.min_x(),
            bounds.min_y(),
        ]);
        content.x_object(IMAGE_NAME);
        content.restore_state();

        self.pdf.stream(content_id, &content.finish());

        let mut page = self.pdf.page(page_id);
        page.media_box(Rect::new(
            0.0,
            0.0,
            self.page_size.width(),
            self.page_size.height(),
        ));
        page.parent(self.page_tree_id);
        page.contents(content_id);
        let mut resources = page.resources();
        resources.x_objects().pair(IMAGE_NAME, image_id);
        resources.fonts().pair(FONT_NAME, self.font_id);
        resources.finish();
        page.finish();

        self.page_ids.push(page_id);
    }

    fn write_image(&mut self, image_id: Ref, mask_id: Option<Ref>, image: &RasterImage) {
        let width = i32::try_from(image.width).unwrap_or(i32::MAX);
        let height = i32::try_from(image.height).unwrap_or(i32::MAX);

        let mut xobject = self.pdf.image_xobject(image_id, &image.rgb);
        xobject.filter(Filter::FlateDecode);
        xobject.width(width);
        xobject.height(height);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            xobject.s_mask(mask_id);
        }
        xobject.finish();

        if let (Some(mask_id), Some(alpha)) = (mask_id, &image.alpha) {
            let mut mask = self.pdf.image_xobject(mask_id, alpha);
            mask.filter(Filter::FlateDecode);
            mask.width(width);
            mask.height(height);
            mask.color_space().device_gray();
            mask.bits_per_component(8);
            mask.finish();
        }
    }

    /// Writes the catalog, page tree and font, and returns the file bytes.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.page_tree_id);

        let count = i32::try_from(self.page_ids.len()).unwrap_or(i32::MAX);
        self.pdf
            .pages(self.page_tree_id)
            .kids(self.page_ids.iter().copied())
            .count(count);

        self.pdf
            .type1_font(self.font_id)
            .base_font(Name(self.font.base_name().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        self.pdf.finish()
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma, RgbaImage};

    use folio_core::placement::{PlacementRules, place};

    use super::*;

    #[test]
    fn test_raster_without_alpha_has_no_mask() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 2, Luma([7])));
        let raster = RasterImage::from_image(&image).unwrap();

        assert_eq!((raster.width, raster.height), (3, 2));
        assert!(raster.alpha.is_none());
    }

    #[test]
    fn test_raster_samples_are_zlib_streams() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(2, 2));
        let raster = RasterImage::from_image(&image).unwrap();

        // zlib header with default compression
        assert_eq!(raster.rgb[0], 0x78);
        assert_eq!(raster.alpha.as_ref().map(|alpha| alpha[0]), Some(0x78));
    }

    #[test]
    fn test_empty_builder_is_valid_pdf() {
        let bytes = PdfBuilder::new(Size::new(612.0, 792.0), StandardFont::Helvetica).finish();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.ends_with(b"%%EOF") || bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_title_is_centered_on_anchor() {
        let page = Size::new(612.0, 792.0);
        let placement = place(Size::new(10.0, 10.0), page, PlacementRules::default()).unwrap();
        let style = TitleStyle {
            font: StandardFont::Courier,
            size: 10.0,
            color: Color::default(),
        };
        let image = RasterImage::from_image(&DynamicImage::ImageLuma8(GrayImage::new(1, 1))).unwrap();

        let mut builder = PdfBuilder::new(page, StandardFont::Courier);
        builder.add_page("abcd", &style, placement, &image);
        let bytes = builder.finish();

        // "abcd" in Courier 10 is 24pt wide, so it starts 12pt left of center
        let needle = b"294 762 Td";
        assert!(bytes.windows(needle.len()).any(|window| window == needle));
    }
}
