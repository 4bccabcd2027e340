use crate::refs::{ObjectReferences, RefType};
use crate::{PDFError, Pt};
use owned_ttf_parser::{AsFaceRef, Face, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;

/// A parsed TrueType / OpenType face. The face is embedded in its entirety in the
/// generated PDF as a CID-keyed (Type0) font with a ToUnicode map, so text stays
/// searchable and copyable.
#[derive(Debug)]
pub struct TrueTypeFont {
    pub face: OwnedFace,
}

impl TrueTypeFont {
    pub fn load(bytes: Vec<u8>) -> Result<TrueTypeFont, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(TrueTypeFont { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    fn name_entry(&self, name_id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the face, if the name table carries one
    pub fn name(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the face, if the name table carries one
    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().ascender() as f32
    }

    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().descender() as f32
    }

    pub fn line_gap(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().line_gap() as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph to draw for `ch`, falling back to the replacement character, then
    /// `?`, then `.notdef`
    pub(crate) fn render_glyph_id(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Width of `text` at `size`, or [None] when any character has no glyph in
    /// the face
    pub fn width_of(&self, text: &str, size: Pt) -> Option<Pt> {
        let scaling = self.scaling(size);
        text.chars()
            .map(|ch| {
                let gid = self.face().glyph_index(ch)?;
                Some(scaling * self.face().glyph_hor_advance(gid).unwrap_or_default() as f32)
            })
            .sum()
    }

    fn glyph_ids(&self) -> HashMap<u16, char> {
        // Adapted from printpdf
        let mut map: HashMap<u16, char> = HashMap::new();

        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                    {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }

        map
    }

    fn glyphs_sizing(&self, ids: &HashMap<u16, char>) -> HashMap<u16, (u16, i16)> {
        let mut sizing: HashMap<u16, (u16, i16)> = HashMap::new();
        for (&id, &ch) in ids.iter() {
            if let Some(gid) = self.face().glyph_index(ch) {
                if let Some(h_advance) = self.face().glyph_hor_advance(gid) {
                    let height = self
                        .face()
                        .glyph_bounding_box(gid)
                        .map(|bbox| bbox.y_max - bbox.y_min - self.face().descender())
                        .unwrap_or(1000);
                    sizing.insert(id, (h_advance, height));
                }
            }
        }
        sizing
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, font_index, writer);

        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let sizing = self.glyphs_sizing(&self.glyph_ids());
        let scaling = 1000.0 / self.face().units_per_em() as f32;

        // the most common advance becomes the default width
        let mut widths_counts: HashMap<u16, usize> = HashMap::new();
        for &(width, _) in sizing.values() {
            *widths_counts.entry(width).or_insert(0) += 1;
        }
        let most_common_width = widths_counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(&width, _)| width as f32 * scaling)
            .unwrap_or(1000.0);

        let mut id_widths: Vec<(u16, f32)> = sizing
            .iter()
            .map(|(&cid, &(width, _))| (cid, width as f32 * scaling))
            .collect();
        id_widths.sort_by_key(|(id, _)| *id);

        let mut widths = cid_font.widths();
        let mut block_start: Option<u16> = None;
        let mut block: Vec<f32> = Vec::new();
        for (cid, width) in id_widths.into_iter() {
            match block_start {
                Some(start) if (cid - start) as usize == block.len() => block.push(width),
                Some(start) => {
                    widths.consecutive(start, block.drain(..));
                    block_start = Some(cid);
                    block.push(width);
                }
                None => {
                    block_start = Some(cid);
                    block.push(width);
                }
            }
        }
        if let Some(start) = block_start {
            widths.consecutive(start, block);
        }
        widths.finish();

        cid_font.default_width(most_common_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_font_data(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));

        let data = self.face.as_slice();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            data,
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);
        stream.pair(Name(b"Length1"), data.len() as i32);

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_stream_id = self.write_font_data(refs, font_index, writer);

        let sizing = self.glyphs_sizing(&self.glyph_ids());
        let max_width = sizing.values().map(|&(w, _)| w).max().unwrap_or_default();
        let max_height = sizing.values().map(|&(_, h)| h).max().unwrap_or_default();
        let sum_width: usize = sizing.values().map(|&(w, _)| w as usize).sum();
        let avg_width = sum_width as f32 / sizing.len().max(1) as f32;

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let fallback_name = format!("F{font_index}");
        let name = self.name().unwrap_or_else(|| fallback_name.clone());
        let family = self.family().unwrap_or(fallback_name);

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(self.face().weight().to_number());

        let mut flags: FontFlags = FontFlags::NON_SYMBOLIC;
        if self.face().is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if self.face().is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        descriptor.flags(flags);

        let scaling = 1000.0 / self.face().units_per_em() as f32;
        descriptor.bbox(pdf_writer::Rect {
            x1: 0.0,
            y1: 0.0,
            x2: max_width as f32 * scaling,
            y2: max_height as f32 * scaling,
        });
        descriptor.italic_angle(self.face().italic_angle());
        descriptor.ascent(self.face().ascender() as f32 * scaling);
        descriptor.descent(self.face().descender() as f32 * scaling);
        descriptor.leading(self.face().line_gap() as f32 * scaling);
        descriptor.cap_height(
            self.face()
                .capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(
            self.face()
                .x_height()
                .unwrap_or_else(|| self.face().capital_height().unwrap_or_default())
                as f32
                * scaling,
        );
        // TODO: derive the stem width from the OS/2 weight class instead of a constant
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);

        descriptor.font_file2(font_data_stream_id);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map: String = r#"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe)
/Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
"#
        .replace("\r\n", "\n");

        let mut ids: Vec<(u16, char)> = self.glyph_ids().into_iter().collect();
        ids.sort_by_key(|&(id, _)| id);

        // bfchar blocks hold at most 100 entries sharing a high byte
        let mut blocks: Vec<Vec<(u16, char)>> = Vec::new();
        let mut current: Vec<(u16, char)> = Vec::new();
        let mut high_byte: u8 = 0;
        for &(id, ch) in ids.iter() {
            if (id >> 8) as u8 != high_byte || current.len() >= 100 {
                if !current.is_empty() {
                    blocks.push(std::mem::take(&mut current));
                }
                high_byte = (id >> 8) as u8;
            }
            current.push((id, ch));
        }
        if !current.is_empty() {
            blocks.push(current);
        }

        for block in blocks.into_iter() {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (id, ch) in block.into_iter() {
                let mut utf16 = [0u16; 2];
                let units: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                map.push_str(&format!("<{id:04x}> <{units}>\n"));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}
