//! Static registry of content-managed pages and their sections.
//!
//! Each page stores its entire content as one database row. A section is
//! a named, non-overlapping group of that row's columns with its own view
//! shape, so the registry is the single source of truth for which columns
//! belong to which section, how view keys map to columns, and which
//! defaults seed a freshly created row. Centralizing the defaults here
//! keeps them from drifting apart between sections.

use serde_json::Value;
use std::fmt;

use crate::error::StoreError;
use crate::types::{PageRecord, SectionView};

/// Identifies one of the four content-managed pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Home,
    AboutUs,
    GetInvolved,
    ServicesEvents,
}

impl PageId {
    pub const ALL: [PageId; 4] = [
        PageId::Home,
        PageId::AboutUs,
        PageId::GetInvolved,
        PageId::ServicesEvents,
    ];

    /// Database table holding this page's single content row.
    pub fn table(self) -> &'static str {
        match self {
            PageId::Home => "home_page",
            PageId::AboutUs => "about_us_page",
            PageId::GetInvolved => "get_involved_page",
            PageId::ServicesEvents => "services_events_page",
        }
    }

    /// URL slug used by the HTTP surface.
    pub fn slug(self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::AboutUs => "about-us",
            PageId::GetInvolved => "get-involved",
            PageId::ServicesEvents => "services-events",
        }
    }

    /// Resolve a URL slug to a page, if it names one.
    pub fn from_slug(slug: &str) -> Option<PageId> {
        PageId::ALL.into_iter().find(|p| p.slug() == slug)
    }

    /// Whether reading an absent row answers with the page's defaults.
    ///
    /// Pages configured `false` surface absence as a not-found error
    /// instead. Writes create the row either way.
    pub fn create_on_missing(self) -> bool {
        matches!(self, PageId::Home | PageId::AboutUs)
    }

    /// All sections registered for this page.
    pub fn sections(self) -> &'static [SectionDef] {
        match self {
            PageId::Home => HOME_SECTIONS,
            PageId::AboutUs => ABOUT_US_SECTIONS,
            PageId::GetInvolved => GET_INVOLVED_SECTIONS,
            PageId::ServicesEvents => SERVICES_EVENTS_SECTIONS,
        }
    }

    /// Look up a registered section by name.
    pub fn find_section(self, name: &str) -> Option<&'static SectionDef> {
        self.sections().iter().find(|s| s.name == name)
    }

    /// Look up a section that is known to be registered.
    ///
    /// Panics if `name` is not registered for this page; passing an
    /// unregistered name is a programming error, not a runtime failure.
    pub fn section(self, name: &str) -> &'static SectionDef {
        self.find_section(name)
            .unwrap_or_else(|| panic!("section '{name}' is not registered for page '{self}'"))
    }

    /// Every content column of this page, across all sections.
    pub fn columns(self) -> impl Iterator<Item = &'static str> {
        self.sections()
            .iter()
            .flat_map(|s| s.fields.iter().map(|f| f.column))
    }

    /// A full row seeded with every section's defaults, used when the
    /// first write to any section creates the page record.
    pub fn default_record(self) -> PageRecord {
        self.sections()
            .iter()
            .flat_map(|s| s.default_columns())
            .collect()
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// How a field's raw column text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line scalar text.
    Text,
    /// Free text that may contain literal or escaped newlines; display
    /// surfaces run it through the segmenter.
    RichText,
    /// A JSON array stored as serialized text in a single column.
    List,
}

/// One field of a section: a view key bound to a backing column.
#[derive(Debug)]
pub struct FieldDef {
    /// Key exposed in the section's view (JSON payloads).
    pub view_key: &'static str,
    /// Backing column, namespaced by section prefix.
    pub column: &'static str,
    pub kind: FieldKind,
    /// Seed value when the page row is first created. List fields hold
    /// serialized JSON.
    pub default: &'static str,
}

/// A named, statically known subset of a page's columns.
#[derive(Debug)]
pub struct SectionDef {
    /// Section name as it appears in URLs and registry lookups.
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

impl SectionDef {
    /// Project a fetched row down to this section's view shape.
    ///
    /// Missing or NULL columns fall back to the declared defaults, so the
    /// returned view always carries every key of the view shape. List
    /// columns are deserialized from their stored JSON text.
    pub fn project(&self, record: &PageRecord) -> SectionView {
        let mut view = SectionView::new();
        for field in self.fields {
            let raw = record
                .get(field.column)
                .map(String::as_str)
                .unwrap_or(field.default);
            view.insert(field.view_key.to_string(), field.decode(raw));
        }
        view
    }

    /// Map a caller-supplied view to column values (inverse projection).
    ///
    /// Every view key must be present and carry the right JSON type;
    /// anything else fails validation before persistence is touched.
    /// List fields are serialized to JSON text for storage. Keys outside
    /// the view shape are ignored.
    pub fn to_columns(&self, view: &SectionView) -> Result<PageRecord, StoreError> {
        let mut columns = PageRecord::new();
        for field in self.fields {
            let value = view.get(field.view_key).ok_or_else(|| {
                StoreError::Validation(format!(
                    "Section '{}' is missing required field '{}'",
                    self.name, field.view_key
                ))
            })?;
            let raw = match (field.kind, value) {
                (FieldKind::Text | FieldKind::RichText, Value::String(s)) => s.clone(),
                (FieldKind::List, Value::Array(_)) => {
                    serde_json::to_string(value).map_err(|e| {
                        StoreError::Validation(format!(
                            "Field '{}' could not be serialized: {e}",
                            field.view_key
                        ))
                    })?
                }
                (FieldKind::List, _) => {
                    return Err(StoreError::Validation(format!(
                        "Field '{}' must be an array",
                        field.view_key
                    )))
                }
                _ => {
                    return Err(StoreError::Validation(format!(
                        "Field '{}' must be a string",
                        field.view_key
                    )))
                }
            };
            columns.insert(field.column.to_string(), raw);
        }
        Ok(columns)
    }

    /// The view this section presents when no row exists yet.
    pub fn default_view(&self) -> SectionView {
        self.fields
            .iter()
            .map(|f| (f.view_key.to_string(), f.decode(f.default)))
            .collect()
    }

    /// This section's columns seeded with their defaults.
    pub fn default_columns(&self) -> PageRecord {
        self.fields
            .iter()
            .map(|f| (f.column.to_string(), f.default.to_string()))
            .collect()
    }
}

impl FieldDef {
    /// Decode a stored raw value into its view representation.
    ///
    /// List columns that fail to parse (hand-edited or corrupted rows)
    /// decode as the field's default rather than poisoning the whole view.
    fn decode(&self, raw: &str) -> Value {
        match self.kind {
            FieldKind::Text | FieldKind::RichText => Value::String(raw.to_string()),
            FieldKind::List => serde_json::from_str(raw).unwrap_or_else(|_| {
                serde_json::from_str(self.default).expect("registry default is valid JSON")
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Registry tables
// ---------------------------------------------------------------------------

const HOME_SECTIONS: &[SectionDef] = &[
    SectionDef {
        name: "hero",
        fields: &[
            FieldDef {
                view_key: "heading",
                column: "hero_heading",
                kind: FieldKind::Text,
                default: "Welcome to Grace Community Church",
            },
            FieldDef {
                view_key: "subheading",
                column: "hero_subheading",
                kind: FieldKind::Text,
                default: "A place to belong, believe, and become",
            },
            FieldDef {
                view_key: "backgroundImage",
                column: "hero_background_image",
                kind: FieldKind::Text,
                default: "/images/hero.jpg",
            },
        ],
    },
    SectionDef {
        name: "about",
        fields: &[
            FieldDef {
                view_key: "title",
                column: "about_title",
                kind: FieldKind::Text,
                default: "About Us",
            },
            FieldDef {
                view_key: "content",
                column: "about_content",
                kind: FieldKind::RichText,
                default: "We are a family of believers serving our neighborhood.",
            },
        ],
    },
    SectionDef {
        name: "events",
        fields: &[
            FieldDef {
                view_key: "heading",
                column: "events_heading",
                kind: FieldKind::Text,
                default: "Upcoming Events",
            },
            FieldDef {
                view_key: "items",
                column: "events_items",
                kind: FieldKind::List,
                default: "[]",
            },
        ],
    },
    SectionDef {
        name: "donation",
        fields: &[
            FieldDef {
                view_key: "bibleVerseText",
                column: "donation_bible_verse_text",
                kind: FieldKind::RichText,
                default: "Each of you should give what you have decided in your heart to give, for God loves a cheerful giver.",
            },
            FieldDef {
                view_key: "bibleVerseReference",
                column: "donation_bible_verse_reference",
                kind: FieldKind::Text,
                default: "2 Corinthians 9:7",
            },
            FieldDef {
                view_key: "donationLink",
                column: "donation_link",
                kind: FieldKind::Text,
                default: "/give",
            },
        ],
    },
];

const ABOUT_US_SECTIONS: &[SectionDef] = &[
    SectionDef {
        name: "intro",
        fields: &[
            FieldDef {
                view_key: "title",
                column: "intro_title",
                kind: FieldKind::Text,
                default: "Who We Are",
            },
            FieldDef {
                view_key: "content",
                column: "intro_content",
                kind: FieldKind::RichText,
                default: "Grace Community Church has served its city since 1952.",
            },
            FieldDef {
                view_key: "image",
                column: "intro_image",
                kind: FieldKind::Text,
                default: "/images/congregation.jpg",
            },
        ],
    },
    SectionDef {
        name: "history",
        fields: &[
            FieldDef {
                view_key: "title",
                column: "history_title",
                kind: FieldKind::Text,
                default: "Our History",
            },
            FieldDef {
                view_key: "content",
                column: "history_content",
                kind: FieldKind::RichText,
                default: "What began as a living-room Bible study grew into the congregation we are today.",
            },
        ],
    },
    SectionDef {
        name: "ministers",
        fields: &[
            FieldDef {
                view_key: "heading",
                column: "ministers_heading",
                kind: FieldKind::Text,
                default: "Our Ministers",
            },
            FieldDef {
                view_key: "items",
                column: "ministers_items",
                kind: FieldKind::List,
                default: "[]",
            },
        ],
    },
    SectionDef {
        name: "beliefs",
        fields: &[
            FieldDef {
                view_key: "title",
                column: "beliefs_title",
                kind: FieldKind::Text,
                default: "What We Believe",
            },
            FieldDef {
                view_key: "content",
                column: "beliefs_content",
                kind: FieldKind::RichText,
                default: "We hold to the historic creeds of the Christian faith.",
            },
        ],
    },
];

const GET_INVOLVED_SECTIONS: &[SectionDef] = &[
    SectionDef {
        name: "hero",
        fields: &[
            FieldDef {
                view_key: "heading",
                column: "hero_heading",
                kind: FieldKind::Text,
                default: "Get Involved",
            },
            FieldDef {
                view_key: "subheading",
                column: "hero_subheading",
                kind: FieldKind::Text,
                default: "Serve alongside us",
            },
        ],
    },
    SectionDef {
        name: "volunteer",
        fields: &[
            FieldDef {
                view_key: "heading",
                column: "volunteer_heading",
                kind: FieldKind::Text,
                default: "Volunteer Opportunities",
            },
            FieldDef {
                view_key: "description",
                column: "volunteer_description",
                kind: FieldKind::RichText,
                default: "There is a place for every gift and every schedule.",
            },
            FieldDef {
                view_key: "items",
                column: "volunteer_items",
                kind: FieldKind::List,
                default: "[]",
            },
        ],
    },
    SectionDef {
        name: "small_groups",
        fields: &[
            FieldDef {
                view_key: "heading",
                column: "small_groups_heading",
                kind: FieldKind::Text,
                default: "Small Groups",
            },
            FieldDef {
                view_key: "description",
                column: "small_groups_description",
                kind: FieldKind::RichText,
                default: "Midweek groups meet in homes across the city.",
            },
        ],
    },
    SectionDef {
        name: "contact",
        fields: &[
            FieldDef {
                view_key: "heading",
                column: "contact_heading",
                kind: FieldKind::Text,
                default: "Contact Us",
            },
            FieldDef {
                view_key: "email",
                column: "contact_email",
                kind: FieldKind::Text,
                default: "office@gracechurch.org",
            },
            FieldDef {
                view_key: "phone",
                column: "contact_phone",
                kind: FieldKind::Text,
                default: "",
            },
        ],
    },
];

const SERVICES_EVENTS_SECTIONS: &[SectionDef] = &[
    SectionDef {
        name: "hero",
        fields: &[
            FieldDef {
                view_key: "heading",
                column: "hero_heading",
                kind: FieldKind::Text,
                default: "Services & Events",
            },
            FieldDef {
                view_key: "backgroundImage",
                column: "hero_background_image",
                kind: FieldKind::Text,
                default: "/images/sanctuary.jpg",
            },
        ],
    },
    SectionDef {
        name: "schedule",
        fields: &[
            FieldDef {
                view_key: "heading",
                column: "schedule_heading",
                kind: FieldKind::Text,
                default: "Weekly Services",
            },
            FieldDef {
                view_key: "items",
                column: "schedule_items",
                kind: FieldKind::List,
                default: r#"[{"name":"Sunday Worship","day":"Sunday","time":"10:00 AM"}]"#,
            },
        ],
    },
    SectionDef {
        name: "special_events",
        fields: &[
            FieldDef {
                view_key: "heading",
                column: "special_events_heading",
                kind: FieldKind::Text,
                default: "Special Events",
            },
            FieldDef {
                view_key: "items",
                column: "special_events_items",
                kind: FieldKind::List,
                default: "[]",
            },
        ],
    },
    SectionDef {
        name: "livestream",
        fields: &[
            FieldDef {
                view_key: "heading",
                column: "livestream_heading",
                kind: FieldKind::Text,
                default: "Watch Online",
            },
            FieldDef {
                view_key: "url",
                column: "livestream_url",
                kind: FieldKind::Text,
                default: "",
            },
            FieldDef {
                view_key: "description",
                column: "livestream_description",
                kind: FieldKind::RichText,
                default: "Our Sunday service streams live every week.",
            },
        ],
    },
];
