//! The prompt catalog: categories, filters, and the shipped prompt table.
//!
//! A [`Catalog`] is immutable once built. Selection only cares about which
//! prompts belong to a pool and how many there are; declaration order is
//! kept so that listings and the `all` pool are stable.
//!
//! ```
//! use studio::catalog::{Catalog, Filter};
//!
//! let catalog = Catalog::builtin();
//! let pool = catalog.all_prompts_in(&Filter::All).unwrap();
//! assert_eq!(pool.len(), catalog.len());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use serde::{Serialize, Serializer};
use tracing::warn;

use crate::error::{Result, StudioError};

/// Sentinel filter name selecting every category.
pub const ALL_FILTER: &str = "all";

// ── Category ──────────────────────────────────────────────────────────

/// The fixed set of prompt categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Disruptive,
    Encouraging,
    Minimalist,
    Philosophical,
    Experimental,
}

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Category; 5] = [
        Category::Disruptive,
        Category::Encouraging,
        Category::Minimalist,
        Category::Philosophical,
        Category::Experimental,
    ];

    /// Lowercase name used in filters and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Disruptive => "disruptive",
            Self::Encouraging => "encouraging",
            Self::Minimalist => "minimalist",
            Self::Philosophical => "philosophical",
            Self::Experimental => "experimental",
        }
    }

    /// Capitalized name for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Disruptive => "Disruptive",
            Self::Encouraging => "Encouraging",
            Self::Minimalist => "Minimalist",
            Self::Philosophical => "Philosophical",
            Self::Experimental => "Experimental",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| StudioError::InvalidFilter(s.to_string()))
    }
}

// ── Filter ────────────────────────────────────────────────────────────

/// Selection scope for a draw: every category, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    Category(Category),
}

impl Filter {
    /// Display label (`All`, `Minimalist`, ...).
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Category(c) => c.label(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_FILTER),
            Self::Category(c) => fmt::Display::fmt(c, f),
        }
    }
}

impl FromStr for Filter {
    type Err = StudioError;

    /// Parses `all` or any category name. Whether the category is actually
    /// present in a given catalog is checked by [`Catalog::resolve_filter`].
    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case(ALL_FILTER) {
            return Ok(Self::All);
        }
        s.parse().map(Self::Category)
    }
}

impl From<Category> for Filter {
    fn from(c: Category) -> Self {
        Self::Category(c)
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── Catalog ───────────────────────────────────────────────────────────

/// One category and its prompts in declared order.
#[derive(Debug, Clone)]
pub struct CategoryPrompts {
    pub category: Category,
    pub prompts: Vec<String>,
}

/// An immutable mapping from category to prompts.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CategoryPrompts>,
}

/// A prompt found in more than one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatePrompt {
    pub prompt: String,
    pub categories: Vec<Category>,
}

static BUILTIN: LazyLock<Arc<Catalog>> = LazyLock::new(|| {
    Arc::new(Catalog::new([
        (Category::Disruptive, DISRUPTIVE.iter().copied()),
        (Category::Encouraging, ENCOURAGING.iter().copied()),
        (Category::Minimalist, MINIMALIST.iter().copied()),
        (Category::Philosophical, PHILOSOPHICAL.iter().copied()),
        (Category::Experimental, EXPERIMENTAL.iter().copied()),
    ]))
});

impl Catalog {
    /// Build a catalog from `(category, prompts)` pairs.
    ///
    /// Declaration order is preserved. A category listed twice has its
    /// prompts appended to the first entry. Blank prompts are dropped.
    pub fn new<I, P>(entries: impl IntoIterator<Item = (Category, I)>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let mut catalog = Self::default();
        for (category, prompts) in entries {
            let prompts = prompts.into_iter().map(Into::into).filter(|p: &String| {
                let keep = !p.trim().is_empty();
                if !keep {
                    warn!(%category, "dropping blank prompt");
                }
                keep
            });
            match catalog.entries.iter_mut().find(|e| e.category == category) {
                Some(existing) => existing.prompts.extend(prompts),
                None => catalog.entries.push(CategoryPrompts {
                    category,
                    prompts: prompts.collect(),
                }),
            }
        }

        for dup in catalog.duplicates() {
            warn!(
                prompt = %dup.prompt,
                categories = ?dup.categories,
                "prompt appears in more than one category"
            );
        }
        catalog
    }

    /// The catalog shipped with the application.
    ///
    /// Built on first use and shared for the rest of the process.
    pub fn builtin() -> Arc<Catalog> {
        Arc::clone(&BUILTIN)
    }

    /// Every prompt eligible under `filter`, in declaration order.
    ///
    /// For [`Filter::All`] this is every category's prompts concatenated in
    /// category order. Fails with [`StudioError::InvalidFilter`] when the
    /// filter names a category this catalog does not contain.
    pub fn all_prompts_in(&self, filter: &Filter) -> Result<Vec<&str>> {
        match filter {
            Filter::All => Ok(self
                .entries
                .iter()
                .flat_map(|e| e.prompts.iter().map(String::as_str))
                .collect()),
            Filter::Category(category) => self
                .entry(*category)
                .map(|e| e.prompts.iter().map(String::as_str).collect())
                .ok_or_else(|| StudioError::InvalidFilter(category.to_string())),
        }
    }

    /// Parse a user-supplied filter name against this catalog.
    pub fn resolve_filter(&self, name: &str) -> Result<Filter> {
        let filter: Filter = name.parse()?;
        self.validate_filter(&filter)?;
        Ok(filter)
    }

    /// Check that `filter` is `all` or one of this catalog's categories.
    pub fn validate_filter(&self, filter: &Filter) -> Result<()> {
        match filter {
            Filter::All => Ok(()),
            Filter::Category(c) if self.entry(*c).is_some() => Ok(()),
            Filter::Category(c) => Err(StudioError::InvalidFilter(c.to_string())),
        }
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.iter().map(|e| e.category)
    }

    /// `all` followed by each category, in menu order.
    pub fn filters(&self) -> Vec<Filter> {
        std::iter::once(Filter::All)
            .chain(self.categories().map(Filter::Category))
            .collect()
    }

    /// Category entries in declaration order.
    pub fn entries(&self) -> &[CategoryPrompts] {
        &self.entries
    }

    /// The first category containing `prompt`.
    pub fn category_of(&self, prompt: &str) -> Option<Category> {
        self.entries
            .iter()
            .find(|e| e.prompts.iter().any(|p| p == prompt))
            .map(|e| e.category)
    }

    /// Prompts that appear in more than one category.
    ///
    /// Selection and favorites work on string equality and are unaffected,
    /// but attribution under `all` becomes ambiguous.
    pub fn duplicates(&self) -> Vec<DuplicatePrompt> {
        let mut seen: HashMap<&str, Vec<Category>> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for entry in &self.entries {
            for prompt in &entry.prompts {
                let cats = seen.entry(prompt.as_str()).or_insert_with(|| {
                    order.push(prompt.as_str());
                    Vec::new()
                });
                if !cats.contains(&entry.category) {
                    cats.push(entry.category);
                }
            }
        }
        order
            .into_iter()
            .filter_map(|p| {
                let cats = &seen[p];
                (cats.len() > 1).then(|| DuplicatePrompt {
                    prompt: p.to_string(),
                    categories: cats.clone(),
                })
            })
            .collect()
    }

    /// Total number of prompts across all categories.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|e| e.prompts.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, category: Category) -> Option<&CategoryPrompts> {
        self.entries.iter().find(|e| e.category == category)
    }
}

// ── Shipped prompts ───────────────────────────────────────────────────

const DISRUPTIVE: &[&str] = &[
    "Challenge your initial approach",
    "Pursue the opposite direction",
    "Intentionally create something mundane",
    "Amplify the flaws instead of fixing them",
    "Make it less aesthetically pleasing",
    "Start with a mistake as your foundation",
    "Keep the framework but ignore conventions",
    "Continue until something fails",
    "Embrace chaos as your medium",
    "Break your favorite tool",
    "Misuse every technique",
    "Prioritize the wrong elements",
    "Design for your enemy",
    "Create something that doesn't work",
    "Incorporate a deliberate malfunction",
    "Abandon your strongest skill",
    "Make the background the foreground",
    "Ignore the brief completely",
    "Create without your dominant hand",
    "Eliminate the most important element",
    "Combine incompatible elements",
    "Reject your first five ideas",
    "Use only what you dislike",
    "Sabotage your own work halfway through",
    "Build something to be deliberately misunderstood",
    "Create something that annoys you",
    "Make the worst possible version first",
    "Design something that shouldn't exist",
    "Exaggerate what doesn't matter",
    "Make your process unnecessarily complex",
];

const ENCOURAGING: &[&str] = &[
    "Embrace the recent outcome",
    "Limit yourself to existing resources",
    "Begin from your current position",
    "Go with your instinctive response",
    "Reframe errors as intentional choices",
    "Consider your opponent's approach",
    "Focus on uncomfortable details and emphasize them",
    "Trust the process completely",
    "Amplify what works, discard what doesn't",
    "Imagine this is your final creation",
    "Think like a beginner again",
    "Remember why you started",
    "Honor your initial impulse",
    "Ask what feels natural next",
    "Find beauty in the imperfection",
    "Develop one strong element fully",
    "Consider what excites you most",
    "Reconnect with your original purpose",
    "Let intuition lead for five minutes",
    "Imagine explaining your work to a child",
    "Find the seed of something brilliant",
    "Celebrate the smallest progress",
    "Notice what emerges without effort",
    "Identify what feels resonant",
    "Find inspiration in what you've already done",
    "Follow the energy, not the plan",
    "Discover what's trying to emerge",
    "Appreciate the journey, not just the outcome",
    "Find joy in the smallest detail",
    "See constraints as gifts",
];

const MINIMALIST: &[&str] = &[
    "Work with absence",
    "Reduce to a single element",
    "Practice deliberate limitation",
    "Distill to fundamental elements",
    "Identify the bare minimum",
    "Eliminate all but the essential",
    "Value the spaces between",
    "Reduce beyond comfort",
    "Use only one color",
    "Limit yourself to three tools",
    "Create using only negative space",
    "Communicate with the fewest elements possible",
    "Remove until it breaks, then step back once",
    "Subtract rather than add",
    "Honor the white space",
    "Use only what is necessary",
    "Find power in restraint",
    "Embrace emptiness as form",
    "Create with what remains",
    "Simplify until it hurts",
    "Make silence your material",
    "Let absence speak volumes",
    "Find richness in sparsity",
    "Express more with less",
    "Strip away until only truth remains",
    "Value quality over quantity",
    "Create using only two elements",
    "Eliminate the expected elements",
    "Pursue elegant simplicity",
    "Find strength in subtlety",
];

const PHILOSOPHICAL: &[&str] = &[
    "Adopt another persona",
    "Step away and return with fresh perspective",
    "Create then erase",
    "Clarify your underlying message",
    "Identify what's absent",
    "Explore the impact of patience",
    "Examine contrary positions",
    "Invert your perspective",
    "Question your fundamental assumptions",
    "Consider the ethical implications",
    "Explore what this means in a different culture",
    "Ask why this matters deeply",
    "Imagine how this looks in 100 years",
    "Contemplate the opposite of your intention",
    "Question the question itself",
    "Consider your responsibility to the audience",
    "Reflect on what remains unsaid",
    "Examine your true motivation",
    "Ask what this teaches you about yourself",
    "Consider who benefits from this work",
    "Explore the shadow side of your concept",
    "Question whether this serves your values",
    "Consider what's beyond your understanding",
    "Reflect on what you're avoiding",
    "Contemplate what you're truly creating",
    "Examine your relationship to control",
    "Consider what would remain if you weren't here",
    "Ask what deeper truth this points toward",
    "Question the narratives you're perpetuating",
    "Reflect on what this asks of others",
];

const EXPERIMENTAL: &[&str] = &[
    "Collaborate with randomness",
    "Let an algorithm decide",
    "Create a system, then follow its rules",
    "Work in complete darkness for ten minutes",
    "Translate your work into another medium",
    "Incorporate an element of chance",
    "Let someone else make a key decision",
    "Create using only found materials",
    "Build a tool then use it",
    "Work at an unusual scale",
    "Use a technique from a different discipline",
    "Create a constraint, then work within it",
    "Document the process, not the outcome",
    "Let nature complete your work",
    "Create something that changes over time",
    "Involve an unwitting collaborator",
    "Make something ephemeral",
    "Use only tools you've never used before",
    "Create without looking",
    "Work in extreme slow motion",
    "Design for a different species",
    "Make something that destroys itself",
    "Create using only environmental sounds",
    "Design a process, not a product",
    "Make the invisible visible",
    "Create something that only works once",
    "Design for the wrong context",
    "Let weather influence your decisions",
    "Work with what you can't control",
    "Create something that requires participation",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Catalog {
        Catalog::new([
            (Category::Minimalist, vec!["Work with absence"]),
            (Category::Encouraging, vec!["Trust the process completely"]),
        ])
    }

    #[test]
    fn builtin_has_five_categories_of_thirty() {
        let catalog = Catalog::builtin();
        let cats: Vec<Category> = catalog.categories().collect();
        assert_eq!(cats, Category::ALL);
        for entry in catalog.entries() {
            assert_eq!(entry.prompts.len(), 30, "{}", entry.category);
        }
        assert_eq!(catalog.len(), 150);
    }

    #[test]
    fn builtin_has_no_duplicates() {
        assert!(Catalog::builtin().duplicates().is_empty());
    }

    #[test]
    fn all_pool_is_concatenation_in_declaration_order() {
        let catalog = tiny();
        let pool = catalog.all_prompts_in(&Filter::All).unwrap();
        assert_eq!(pool, ["Work with absence", "Trust the process completely"]);

        let shipped = Catalog::builtin();
        let builtin = shipped.all_prompts_in(&Filter::All).unwrap();
        assert_eq!(builtin[0], "Challenge your initial approach");
        assert_eq!(builtin[30], "Embrace the recent outcome");
        assert_eq!(
            builtin.last().copied(),
            Some("Create something that requires participation")
        );
    }

    #[test]
    fn category_pool_is_that_category_only() {
        let catalog = tiny();
        let pool = catalog
            .all_prompts_in(&Filter::Category(Category::Minimalist))
            .unwrap();
        assert_eq!(pool, ["Work with absence"]);
    }

    #[test]
    fn pools_are_stable_across_calls() {
        let catalog = Catalog::builtin();
        let f = Filter::Category(Category::Philosophical);
        assert_eq!(
            catalog.all_prompts_in(&f).unwrap(),
            catalog.all_prompts_in(&f).unwrap()
        );
    }

    #[test]
    fn missing_category_is_invalid_filter() {
        let err = tiny()
            .all_prompts_in(&Filter::Category(Category::Disruptive))
            .unwrap_err();
        assert_eq!(err, StudioError::InvalidFilter("disruptive".into()));
    }

    #[test]
    fn resolve_filter_accepts_all_and_known_categories() {
        let catalog = tiny();
        assert_eq!(catalog.resolve_filter("all").unwrap(), Filter::All);
        assert_eq!(catalog.resolve_filter("ALL").unwrap(), Filter::All);
        assert_eq!(
            catalog.resolve_filter("Minimalist").unwrap(),
            Filter::Category(Category::Minimalist)
        );
        assert!(matches!(
            catalog.resolve_filter("brutalist"),
            Err(StudioError::InvalidFilter(name)) if name == "brutalist"
        ));
        assert!(catalog.resolve_filter("experimental").is_err());
    }

    #[test]
    fn filters_list_all_first() {
        let filters = tiny().filters();
        assert_eq!(
            filters,
            [
                Filter::All,
                Filter::Category(Category::Minimalist),
                Filter::Category(Category::Encouraging),
            ]
        );
    }

    #[test]
    fn filter_display_round_trips_through_parse() {
        for f in Catalog::builtin().filters() {
            assert_eq!(f.to_string().parse::<Filter>().unwrap(), f);
        }
    }

    #[test]
    fn duplicates_are_reported_with_categories() {
        let catalog = Catalog::new([
            (Category::Minimalist, vec!["Use only one color", "Less"]),
            (Category::Disruptive, vec!["Use only one color"]),
        ]);
        assert_eq!(
            catalog.duplicates(),
            [DuplicatePrompt {
                prompt: "Use only one color".into(),
                categories: vec![Category::Minimalist, Category::Disruptive],
            }]
        );
        // Attribution picks the first category.
        assert_eq!(
            catalog.category_of("Use only one color"),
            Some(Category::Minimalist)
        );
    }

    #[test]
    fn repeated_category_entries_merge_and_blank_prompts_drop() {
        let catalog = Catalog::new([
            (Category::Experimental, vec!["One", "  "]),
            (Category::Experimental, vec!["Two"]),
        ]);
        assert_eq!(catalog.entries().len(), 1);
        assert_eq!(
            catalog
                .all_prompts_in(&Filter::Category(Category::Experimental))
                .unwrap(),
            ["One", "Two"]
        );
    }

    #[test]
    fn filter_serializes_as_name() {
        let json = serde_json::to_string(&Filter::Category(Category::Encouraging)).unwrap();
        assert_eq!(json, "\"encouraging\"");
        assert_eq!(serde_json::to_string(&Filter::All).unwrap(), "\"all\"");
    }
}
