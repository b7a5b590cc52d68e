//! Static legal catalog and its in-memory query primitives.
//!
//! # Responsibility
//! - Hold the seeded Senegalese legal texts and Code pénal articles.
//! - Provide synchronous lookups/filters; latency lives in the service.
//!
//! # Invariants
//! - Substring matching is case-insensitive.
//! - An empty query matches every record.
//! - Result order is catalog order (articles of one text by position).

use crate::model::legal::{
    LegalArticle, LegalDomain, LegalText, LegalTextId, TextStatus, TextType,
};
use once_cell::sync::Lazy;
use std::sync::Arc;
use time::macros::{date, datetime};
use time::{Date, PrimitiveDateTime};

/// Domain filter value that disables domain filtering.
pub const ALL_DOMAINS: &str = "all";

static SEEDED: Lazy<Arc<LegalCatalog>> = Lazy::new(|| Arc::new(seed()));

/// Read-only catalog of legal texts and their articles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegalCatalog {
    texts: Vec<LegalText>,
    articles: Vec<LegalArticle>,
}

impl LegalCatalog {
    pub fn new(texts: Vec<LegalText>, mut articles: Vec<LegalArticle>) -> Self {
        articles.sort_by_key(|article| (article.text_id, article.position));
        Self { texts, articles }
    }

    /// Shared handle to the built-in catalog.
    pub fn seeded() -> Arc<Self> {
        Arc::clone(&SEEDED)
    }

    pub fn texts(&self) -> &[LegalText] {
        &self.texts
    }

    pub fn text(&self, id: LegalTextId) -> Option<&LegalText> {
        self.texts.iter().find(|text| text.id == id)
    }

    pub fn articles_of(&self, text_id: LegalTextId) -> Vec<LegalArticle> {
        self.articles
            .iter()
            .filter(|article| article.text_id == text_id)
            .cloned()
            .collect()
    }

    /// Texts whose title, body or keywords contain `query`, optionally
    /// restricted to domains containing `domain`.
    pub fn search_texts(&self, query: &str, domain: Option<&str>) -> Vec<LegalText> {
        let query = query.to_lowercase();
        let domain = domain
            .filter(|domain| !domain.is_empty() && *domain != ALL_DOMAINS)
            .map(str::to_lowercase);

        self.texts
            .iter()
            .filter(|text| {
                let matches_query = query.is_empty()
                    || contains_folded(&text.title, &query)
                    || contains_folded(&text.body, &query)
                    || text
                        .keywords
                        .as_deref()
                        .is_some_and(|keywords| contains_folded(keywords, &query));
                let matches_domain = domain.as_deref().map_or(true, |domain| {
                    text.legal_domain
                        .as_deref()
                        .is_some_and(|legal_domain| contains_folded(legal_domain, domain))
                });
                matches_query && matches_domain
            })
            .cloned()
            .collect()
    }

    /// Articles whose body or title contain `query`, optionally scoped to
    /// one parent text.
    pub fn search_articles(&self, query: &str, text_id: Option<LegalTextId>) -> Vec<LegalArticle> {
        let query = query.to_lowercase();

        self.articles
            .iter()
            .filter(|article| {
                let matches_query = query.is_empty()
                    || contains_folded(&article.body, &query)
                    || article
                        .title
                        .as_deref()
                        .is_some_and(|title| contains_folded(title, &query));
                let matches_text = text_id.map_or(true, |id| article.text_id == id);
                matches_query && matches_text
            })
            .cloned()
            .collect()
    }

    /// Distinct legal domains in first-seen order, numbered from 1.
    pub fn domains(&self) -> Vec<LegalDomain> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.texts.iter().filter_map(|text| text.legal_domain.as_deref()) {
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }

        names
            .into_iter()
            .zip(1..)
            .map(|(name, id)| LegalDomain::new(id, name))
            .collect()
    }
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

const NATIONAL_ASSEMBLY: &str = "Assemblée nationale du Sénégal";

struct TextSeed {
    id: LegalTextId,
    title: &'static str,
    promulgated: Date,
    official_number: Option<&'static str>,
    domain: &'static str,
    keywords: &'static str,
    authority: &'static str,
    created_at: PrimitiveDateTime,
}

impl TextSeed {
    fn into_text(self) -> LegalText {
        LegalText {
            id: self.id,
            title: self.title.to_string(),
            body: format!("Texte intégral de {}", self.title),
            text_type: TextType::OrdinaryLaw,
            promulgation_date: self.promulgated,
            official_number: self.official_number.map(str::to_string),
            legal_domain: Some(self.domain.to_string()),
            keywords: Some(self.keywords.to_string()),
            status: TextStatus::Active,
            issuing_authority: Some(self.authority.to_string()),
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

fn seed() -> LegalCatalog {
    let texts = [
        TextSeed {
            id: 16,
            title: "Code pénal du Sénégal",
            promulgated: date!(1965 - 07 - 21),
            official_number: Some("Loi n°65-60"),
            domain: "Droit pénal",
            keywords: "crime, délit, contravention, peine, prison, infraction",
            authority: NATIONAL_ASSEMBLY,
            created_at: datetime!(2025-08-20 12:36:31),
        },
        TextSeed {
            id: 17,
            title: "Code des Obligations Civiles et Commerciales",
            promulgated: date!(1960 - 12 - 31),
            official_number: None,
            domain: "Droit civil",
            keywords: "contrat, obligation, responsabilité, dette, succession, créance",
            authority: NATIONAL_ASSEMBLY,
            created_at: datetime!(2025-08-20 12:36:35),
        },
        TextSeed {
            id: 18,
            title: "Code CIMA des Assurances",
            promulgated: date!(1992 - 07 - 10),
            official_number: Some("Traité CIMA"),
            domain: "Droit des assurances",
            keywords: "assurance, police, sinistre, indemnité, prime, réassurance",
            authority: "Conférence Interafricaine des Marchés d'Assurances",
            created_at: datetime!(2025-08-20 12:36:55),
        },
        TextSeed {
            id: 19,
            title: "Code de la Famille du Sénégal",
            promulgated: date!(1972 - 01 - 01),
            official_number: None,
            domain: "Droit de la famille",
            keywords: "mariage, divorce, filiation, succession, régime matrimonial",
            authority: NATIONAL_ASSEMBLY,
            created_at: datetime!(2025-08-20 12:36:57),
        },
        TextSeed {
            id: 20,
            title: "Code du Travail du Sénégal",
            promulgated: date!(1997 - 03 - 01),
            official_number: None,
            domain: "Droit du travail",
            keywords: "contrat de travail, licenciement, convention collective, sécurité sociale",
            authority: NATIONAL_ASSEMBLY,
            created_at: datetime!(2025-08-20 12:36:59),
        },
        TextSeed {
            id: 21,
            title: "Code Foncier du Sénégal",
            promulgated: date!(1964 - 06 - 17),
            official_number: Some("Loi n°64-46"),
            domain: "Droit foncier",
            keywords: "propriété, domaine national, bail, titre foncier",
            authority: NATIONAL_ASSEMBLY,
            created_at: datetime!(2025-08-20 12:37:09),
        },
        TextSeed {
            id: 22,
            title: "Code Général des Impôts du Sénégal (2013)",
            promulgated: date!(2013 - 01 - 01),
            official_number: None,
            domain: "Droit fiscal",
            keywords: "impôts, taxes, fiscalité, contribution, TVA",
            authority: NATIONAL_ASSEMBLY,
            created_at: datetime!(2025-08-20 12:37:23),
        },
        TextSeed {
            id: 23,
            title: "Code de l'Environnement du Sénégal (2001)",
            promulgated: date!(2001 - 01 - 15),
            official_number: None,
            domain: "Droit de l'environnement",
            keywords: "environnement, pollution, nature, ressources naturelles",
            authority: NATIONAL_ASSEMBLY,
            created_at: datetime!(2025-08-20 12:37:24),
        },
    ];

    let penal_code_articles = [
        "L'infraction que les lois punissent de peines de police est une contravention. \
         L'infraction que les lois punissent de peines correctionnelles est un délit. \
         L'infraction que les lois punissent d'une peine afflictive ou infamante est un crime.",
        "Toute tentative de crime qui aura été manifestée par un commencement d'exécution, \
         si elle n'a été suspendue ou si elle n'a manqué son effet que par des circonstances \
         indépendantes de la volonté de son auteur, est considérée comme le crime même.",
        "Les tentatives de délits ne sont considérées comme délits que dans les cas \
         déterminés par une disposition spéciale de la loi.",
        "(Loi n° 99-05 du 29/01/99) Nul crime, nul délit, nulle contravention ne peuvent \
         être punis de peines qui n'étaient pas prévues par la loi ou le règlement avant \
         qu'ils fussent commis",
        "En cas de commission de plusieurs crimes ou délits, la peine la plus forte est \
         seule prononcée.",
    ];

    let articles = penal_code_articles
        .into_iter()
        .zip(1u32..)
        .map(|(body, position)| LegalArticle {
            id: 3117 + position,
            text_id: 16,
            number: format!("Article {position}"),
            title: None,
            body: body.to_string(),
            position,
        })
        .collect();

    LegalCatalog::new(texts.into_iter().map(TextSeed::into_text).collect(), articles)
}
