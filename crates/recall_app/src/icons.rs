//! Subject icon catalog
//!
//! Icons are referenced by their Lucide component name. Unknown names resolve
//! to [`FALLBACK_ICON`] so a stale or hand-edited subject never renders blank.

/// A selectable subject icon
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconOption {
    /// Lucide icon name
    pub name: &'static str,
    /// User-facing label
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

impl IconOption {
    /// Name, label and keywords joined into one lowercase search string
    fn haystack(&self) -> String {
        format!("{} {} {}", self.name, self.label, self.keywords.join(" ")).to_lowercase()
    }

    fn matches(&self, term: &str) -> bool {
        self.haystack().contains(term)
    }
}

const fn icon(
    name: &'static str,
    label: &'static str,
    keywords: &'static [&'static str],
) -> IconOption {
    IconOption {
        name,
        label,
        keywords,
    }
}

/// Icon catalog in picker order
pub static ICON_OPTIONS: [IconOption; 16] = [
    icon("Beaker", "Chemistry", &["chemistry", "science", "lab"]),
    icon("Atom", "Physics", &["physics", "science", "atom"]),
    icon("SquareFunction", "Mathematics", &["math", "function", "algebra"]),
    icon("Dna", "Biology", &["biology", "science", "genetics"]),
    icon("Cpu", "Computer Science", &["computer", "technology", "cpu"]),
    icon("BookOpen", "Literature", &["literature", "reading", "book"]),
    icon("Palette", "Art", &["art", "design", "palette"]),
    icon("Music3", "Music", &["music", "sound", "melody"]),
    icon("Globe2", "Geography", &["geography", "earth", "globe"]),
    icon("Landmark", "History", &["history", "monument", "landmark"]),
    icon("PenTool", "Writing", &["writing", "creative", "pen"]),
    icon("Microscope", "Science", &["science", "research", "microscope"]),
    icon("Lightbulb", "Ideas", &["idea", "insight", "innovation"]),
    icon("Type", "Language", &["language", "typing", "letters"]),
    icon("Sparkles", "General", &["general", "sparkles", "default"]),
    icon("Star", "Favorites", &["favorite", "star", "highlight"]),
];

/// Icon used for unknown names
pub static FALLBACK_ICON: &IconOption = &ICON_OPTIONS[14];

/// Resolve an icon by exact name, falling back to [`FALLBACK_ICON`]
pub fn resolve_icon(name: &str) -> &'static IconOption {
    ICON_OPTIONS
        .iter()
        .find(|option| option.name == name)
        .unwrap_or_else(|| {
            tracing::trace!(name, fallback = FALLBACK_ICON.name, "unknown icon");
            FALLBACK_ICON
        })
}

/// Icons whose name, label and keywords, joined by spaces, contain `query`
///
/// Matching is case-insensitive, so a query may span adjacent fields
/// (`"science lab"`). A blank query returns the whole catalog.
pub fn search_icons(query: &str) -> Vec<&'static IconOption> {
    let term = query.trim().to_lowercase();
    ICON_OPTIONS
        .iter()
        .filter(|option| term.is_empty() || option.matches(&term))
        .collect()
}
