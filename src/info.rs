use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, FixedOffset, Local, Timelike};
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// Document metadata shown in a reader's properties dialog
#[derive(Default, Debug, Clone)]
pub struct Info {
    pub title: Option<String>,
    /// The company or person issuing the document
    pub author: Option<String>,
    pub subject: Option<String>,
    /// Comma separated, as Acrobat suggests
    pub keywords: Option<String>,
    /// When the document was produced. Defaults to the moment it is written.
    pub created: Option<DateTime<FixedOffset>>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn keywords<S: ToString>(&mut self, keywords: S) -> &mut Self {
        self.keywords = Some(keywords.to_string());
        self
    }

    pub fn created(&mut self, created: DateTime<FixedOffset>) -> &mut Self {
        self.created = Some(created);
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title.as_str()));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author.as_str()));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject.as_str()));
        }
        if let Some(keywords) = &self.keywords {
            info.keywords(TextStr(keywords.as_str()));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));

        let created = self.created.unwrap_or_else(|| Local::now().fixed_offset());
        info.creation_date(pdf_date(&created));
    }
}

fn pdf_date(when: &DateTime<FixedOffset>) -> PDate {
    let offset = when.offset().local_minus_utc();
    let offset_hours = offset / (60 * 60);
    let offset_minutes = ((offset - (offset_hours * (60 * 60))) / 60).abs();
    PDate::new(when.year() as u16)
        .month(when.month() as u8)
        .day(when.day() as u8)
        .hour(when.hour() as u8)
        .minute(when.minute() as u8)
        .second(when.second() as u8)
        .utc_offset_hour(offset_hours as i8)
        .utc_offset_minute(offset_minutes as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let mut info = Info::new();
        info.title("Board Resolution").author("Acme Ltd");
        assert_eq!(info.title.as_deref(), Some("Board Resolution"));
        assert_eq!(info.author.as_deref(), Some("Acme Ltd"));
        assert!(info.subject.is_none());
    }

    #[test]
    fn written_info_carries_the_creator() {
        let mut info = Info::new();
        info.title("Letterhead");
        let created = DateTime::parse_from_rfc3339("2024-03-01T09:30:00+05:30").expect("valid");
        info.created(created);

        let mut refs = ObjectReferences::new();
        let mut writer = Pdf::new();
        info.write(&mut refs, &mut writer);
        let bytes = writer.finish();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("(Letterhead)"));
        assert!(text.contains(env!("CARGO_PKG_NAME")));
        assert!(text.contains("D:20240301093000+05'30"));
    }
}
