//! Finished documents.
//!
//! Each [TemplateKind] renders a complete [Document] from a [Brand] and a
//! [TemplateContext]. [generate] renders and writes one to disk.

use crate::brand::Brand;
use crate::canvas::save_document;
use crate::document::Document;
use crate::info::Info;
use crate::PDFError;
use chrono::{Local, NaiveDate};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

mod cover_page;
mod letterhead;
mod placeholder;
mod watermark;

pub use cover_page::CoverPage;
pub use letterhead::Letter;
pub use placeholder::PlaceholderDocument;

/// Per-run inputs shared by all templates
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateContext {
    /// Printed on letters
    pub date: NaiveDate,
    /// Replaces the body paragraphs of templates that flow body text
    pub body: Option<Vec<String>>,
}

impl Default for TemplateContext {
    fn default() -> Self {
        TemplateContext {
            date: Local::now().date_naive(),
            body: None,
        }
    }
}

impl TemplateContext {
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn with_body(mut self, body: Vec<String>) -> Self {
        self.body = Some(body);
        self
    }

    /// Use `text` as the body: paragraphs are separated by blank lines, line
    /// breaks inside a paragraph are ignored
    pub fn with_body_text(self, text: &str) -> Self {
        let mut paragraphs = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        for line in text.lines().map(str::trim) {
            if line.is_empty() {
                if !current.is_empty() {
                    paragraphs.push(current.join(" "));
                    current.clear();
                }
            } else {
                current.push(line);
            }
        }
        if !current.is_empty() {
            paragraphs.push(current.join(" "));
        }
        self.with_body(paragraphs)
    }

    /// The date as letters print it, e.g. `01 March 2024`
    pub fn date_line(&self) -> String {
        self.date.format("%d %B %Y").to_string()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Letterhead,
    BoardResolution,
    WatermarkTemplate,
    CoverPage,
    ContractEmployment,
    Nda,
    PrivacyPolicy,
    InvestorBrief,
    ContractTemplate,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 9] = [
        TemplateKind::Letterhead,
        TemplateKind::BoardResolution,
        TemplateKind::WatermarkTemplate,
        TemplateKind::CoverPage,
        TemplateKind::ContractEmployment,
        TemplateKind::Nda,
        TemplateKind::PrivacyPolicy,
        TemplateKind::InvestorBrief,
        TemplateKind::ContractTemplate,
    ];

    /// The name templates are selected by
    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Letterhead => "letterhead",
            TemplateKind::BoardResolution => "board_resolution",
            TemplateKind::WatermarkTemplate => "watermark_template",
            TemplateKind::CoverPage => "cover_page",
            TemplateKind::ContractEmployment => "contract_employment",
            TemplateKind::Nda => "nda",
            TemplateKind::PrivacyPolicy => "privacy_policy",
            TemplateKind::InvestorBrief => "investor_brief",
            TemplateKind::ContractTemplate => "contract_template",
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            TemplateKind::Letterhead => "letterhead_professional.pdf",
            TemplateKind::BoardResolution => "board_resolution.pdf",
            TemplateKind::WatermarkTemplate => "watermark_a4.pdf",
            TemplateKind::CoverPage => "cover_page.pdf",
            TemplateKind::ContractEmployment => "contract_employment.pdf",
            TemplateKind::Nda => "nda.pdf",
            TemplateKind::PrivacyPolicy => "privacy_policy.pdf",
            TemplateKind::InvestorBrief => "investor_brief.pdf",
            TemplateKind::ContractTemplate => "contract.pdf",
        }
    }

    pub fn render(&self, brand: &Brand, context: &TemplateContext) -> Result<Document, PDFError> {
        log::debug!("rendering {}", self.name());
        match self {
            TemplateKind::Letterhead => letterhead::render(brand, context, &Letter::default()),
            TemplateKind::WatermarkTemplate => watermark::render(brand),
            TemplateKind::CoverPage => cover_page::render(brand, &CoverPage::default()),
            TemplateKind::BoardResolution => {
                placeholder::BOARD_RESOLUTION.render(brand, context)
            }
            TemplateKind::ContractEmployment => {
                placeholder::EMPLOYMENT_CONTRACT.render(brand, context)
            }
            TemplateKind::Nda => placeholder::NDA.render(brand, context),
            TemplateKind::PrivacyPolicy => placeholder::PRIVACY_POLICY.render(brand, context),
            TemplateKind::InvestorBrief => placeholder::INVESTOR_BRIEF.render(brand, context),
            TemplateKind::ContractTemplate => placeholder::CONTRACT.render(brand, context),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemplateKind {
    type Err = PDFError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKind::ALL
            .iter()
            .find(|kind| kind.name() == s)
            .copied()
            .ok_or_else(|| PDFError::UnknownTemplate(s.to_string()))
    }
}

/// Render `kind` and write it to `path`, creating missing parent directories
pub fn generate<P: AsRef<Path>>(
    kind: TemplateKind,
    brand: &Brand,
    context: &TemplateContext,
    path: P,
) -> Result<(), PDFError> {
    let document = kind.render(brand, context)?;
    save_document(document, path.as_ref())
}

/// Document metadata shared by every template
fn info(brand: &Brand, title: &str) -> Info {
    let mut info = Info::new();
    info.title(title).author(&brand.identity.company);
    info
}
