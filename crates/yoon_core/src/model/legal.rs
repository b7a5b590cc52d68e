//! Legal catalog records.
//!
//! # Invariants
//! - Every `LegalArticle::text_id` refers to an existing `LegalText::id`.
//! - Articles of one text are ordered by `position`.

use time::{Date, PrimitiveDateTime};

/// Catalog identifier of a legal text.
pub type LegalTextId = u32;

/// Catalog identifier of an article.
pub type LegalArticleId = u32;

/// Normative rank of a legal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextType {
    Constitution,
    OrganicLaw,
    OrdinaryLaw,
    Decree,
    Order,
    Circular,
}

/// Whether a legal text is currently in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStatus {
    Active,
    Repealed,
    Suspended,
    Amended,
}

/// Top-level juridical document (code, law, decree, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalText {
    pub id: LegalTextId,
    pub title: String,
    pub body: String,
    pub text_type: TextType,
    pub promulgation_date: Date,
    pub official_number: Option<String>,
    pub legal_domain: Option<String>,
    /// Comma-separated keyword list as published.
    pub keywords: Option<String>,
    pub status: TextStatus,
    pub issuing_authority: Option<String>,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

/// Numbered subdivision of exactly one legal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalArticle {
    pub id: LegalArticleId,
    pub text_id: LegalTextId,
    /// Display label, e.g. `Article 2`.
    pub number: String,
    pub title: Option<String>,
    pub body: String,
    pub position: u32,
}

/// Legal domain derived from the catalog, with a synthetic sequential id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalDomain {
    pub id: u32,
    pub name: String,
    pub description: String,
}

impl LegalDomain {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            description: format!("Domaine juridique : {name}"),
            name,
        }
    }
}
