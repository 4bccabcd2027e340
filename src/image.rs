use crate::refs::{ObjectReferences, RefType};
use crate::PDFError;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

/// How the pixels end up in the PDF
#[derive(Debug)]
pub enum RasterImageType {
    /// 8-bit RGB JPEGs are stored as-is and decoded by the reader
    DirectlyEmbeddableJpeg(Vec<u8>),
    /// Anything else is decoded here and re-encoded as Flate compressed RGB
    Image(DynamicImage),
}

/// A raster image (logo, watermark) that pages can place any number of times
#[derive(Debug)]
pub struct Image {
    pub image: RasterImageType,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Load an image from disk. The format is sniffed from the contents, not the
    /// file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Image, PDFError> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    /// Decode an image from its encoded bytes (PNG, JPEG, ...)
    pub fn from_bytes(data: Vec<u8>) -> Result<Image, PDFError> {
        let format = image::guess_format(&data)?;
        let image = image::load_from_memory_with_format(&data, format)?;

        match (format, image.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => {
                // we can embed it directly!
                let width = image.width() as f32;
                let height = image.height() as f32;

                Ok(Image {
                    image: RasterImageType::DirectlyEmbeddableJpeg(data),
                    width,
                    height,
                })
            }
            _ => Ok(Self::new_raster(image)),
        }
    }

    pub fn new_raster(image: DynamicImage) -> Image {
        let width = image.width() as f32;
        let height = image.height() as f32;
        Image {
            image: RasterImageType::Image(image),
            width,
            height,
        }
    }

    fn encode(&self) -> EncodeOutput {
        match &self.image {
            RasterImageType::DirectlyEmbeddableJpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            RasterImageType::Image(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<_> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode();

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }

        image.finish();

        // add a transparency mask if we have one
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("can encode png");
        bytes
    }

    #[test]
    fn decodes_png_with_alpha() {
        let logo = RgbaImage::from_pixel(4, 2, Rgba([43, 45, 110, 128]));
        let image = Image::from_bytes(png_bytes(DynamicImage::ImageRgba8(logo))).expect("png");

        assert_eq!(image.width, 4.0);
        assert_eq!(image.height, 2.0);
        assert!(matches!(image.image, RasterImageType::Image(_)));
        assert!(image.encode().mask.is_some());
    }

    #[test]
    fn opaque_images_have_no_mask() {
        let image = Image::new_raster(DynamicImage::new_rgb8(3, 3));
        assert!(image.encode().mask.is_none());
    }

    #[test]
    fn garbage_is_not_an_image() {
        assert!(matches!(
            Image::from_bytes(b"not an image".to_vec()),
            Err(PDFError::Image(_))
        ));
    }
}
