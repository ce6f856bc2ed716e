//! Book category taxonomy
//!
//! A fixed two-level tree compiled into the binary. Top-level categories may
//! carry subcategories; subcategories never do. Lookups are plain scans over
//! the static table.

use serde::Serialize;

use super::Book;

/// A category in the taxonomy
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct BookCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    #[serde(skip_serializing_if = "no_subcategories")]
    pub subcategories: &'static [BookCategory],
}

impl BookCategory {
    const fn leaf(id: &'static str, name: &'static str, description: &'static str) -> Self {
        Self {
            id,
            name,
            description,
            icon: "",
            subcategories: &[],
        }
    }

    /// True if name or description contains `query`
    ///
    /// `query` must already be lower-cased.
    fn matches_lowercase(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query) || self.description.to_lowercase().contains(query)
    }

    /// True if `book` is tagged with this category or any of its subcategories
    pub fn contains_book(&self, book: &Book) -> bool {
        book.has_category(self.name) || self.subcategories.iter().any(|sub| book.has_category(sub.name))
    }

    pub fn is_leaf(&self) -> bool {
        self.subcategories.is_empty()
    }
}

fn no_subcategories(subcategories: &&'static [BookCategory]) -> bool {
    subcategories.is_empty()
}

/// Top-level categories, in display order
pub static CATEGORIES: &[BookCategory] = &[
    BookCategory {
        id: "fiction",
        name: "Fiction",
        description: "Imaginative narratives and stories",
        icon: "book_fiction",
        subcategories: &[
            BookCategory::leaf("literary", "Literary Fiction", "Character-driven narratives"),
            BookCategory::leaf("scifi", "Science Fiction", "Futuristic and scientific themes"),
            BookCategory::leaf("fantasy", "Fantasy", "Magic and mythical worlds"),
            BookCategory::leaf("mystery", "Mystery", "Crime and investigation"),
            BookCategory::leaf("thriller", "Thriller", "Suspense and excitement"),
            BookCategory::leaf("romance", "Romance", "Love stories"),
            BookCategory::leaf("horror", "Horror", "Fear and suspense"),
        ],
    },
    BookCategory {
        id: "nonfiction",
        name: "Non-Fiction",
        description: "Real-world information and facts",
        icon: "book_nonfiction",
        subcategories: &[
            BookCategory::leaf("biography", "Biography", "Life stories"),
            BookCategory::leaf("memoir", "Memoir", "Personal experiences"),
            BookCategory::leaf("history", "History", "Historical events and periods"),
            BookCategory::leaf("science", "Science", "Scientific topics"),
            BookCategory::leaf("selfhelp", "Self-Help", "Personal development"),
            BookCategory::leaf("business", "Business", "Business and economics"),
            BookCategory::leaf("philosophy", "Philosophy", "Philosophical thought"),
        ],
    },
    BookCategory {
        id: "academic",
        name: "Academic",
        description: "Educational and scholarly works",
        icon: "book_academic",
        subcategories: &[
            BookCategory::leaf("textbook", "Textbook", "Educational materials"),
            BookCategory::leaf("reference", "Reference", "Reference materials"),
            BookCategory::leaf("research", "Research", "Research papers"),
            BookCategory::leaf("education", "Education", "Learning resources"),
        ],
    },
    BookCategory {
        id: "young_adult",
        name: "Young Adult",
        description: "Books for teenage readers",
        icon: "book_ya",
        subcategories: &[],
    },
    BookCategory {
        id: "childrens",
        name: "Children's",
        description: "Books for young readers",
        icon: "book_children",
        subcategories: &[],
    },
    BookCategory {
        id: "poetry",
        name: "Poetry",
        description: "Verse and poetic works",
        icon: "book_poetry",
        subcategories: &[],
    },
    BookCategory {
        id: "graphic_novel",
        name: "Graphic Novel",
        description: "Visual storytelling",
        icon: "book_graphic",
        subcategories: &[],
    },
    BookCategory {
        id: "classics",
        name: "Classics",
        description: "Timeless literary works",
        icon: "book_classics",
        subcategories: &[],
    },
];

/// Read-only view over the category tree
#[derive(Debug, Clone, Copy)]
pub struct Taxonomy {
    roots: &'static [BookCategory],
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Taxonomy {
    /// The taxonomy shipped with the application
    pub const fn builtin() -> Self {
        Self { roots: CATEGORIES }
    }

    /// All top-level categories
    pub fn all(&self) -> &'static [BookCategory] {
        self.roots
    }

    fn subcategories_flat(&self) -> impl Iterator<Item = &'static BookCategory> {
        self.roots.iter().flat_map(|c| c.subcategories.iter())
    }

    /// Every category, top-level entries first
    pub fn iter_all(&self) -> impl Iterator<Item = &'static BookCategory> {
        self.roots.iter().chain(self.subcategories_flat())
    }

    /// Find a category by id, checking top-level entries before subcategories
    pub fn by_id(&self, id: &str) -> Option<&'static BookCategory> {
        self.roots
            .iter()
            .find(|c| c.id == id)
            .or_else(|| self.subcategories_flat().find(|c| c.id == id))
    }

    /// Subcategories of a top-level category; empty for leaves and unknown ids
    pub fn subcategories(&self, parent_id: &str) -> &'static [BookCategory] {
        self.roots
            .iter()
            .find(|c| c.id == parent_id)
            .map(|c| c.subcategories)
            .unwrap_or(&[])
    }

    /// The top-level category that owns subcategory `id`
    pub fn parent_of(&self, id: &str) -> Option<&'static BookCategory> {
        self.roots
            .iter()
            .find(|c| c.subcategories.iter().any(|sub| sub.id == id))
    }

    /// Find a category by name, ignoring case, top-level entries first
    pub fn by_name(&self, name: &str) -> Option<&'static BookCategory> {
        let name = name.to_lowercase();
        self.iter_all().find(|c| c.name.to_lowercase() == name)
    }

    /// Case-insensitive substring search over names and descriptions
    ///
    /// Top-level matches come first, followed by subcategory matches.
    pub fn search(&self, query: &str) -> Vec<&'static BookCategory> {
        let query = query.to_lowercase();
        self.roots
            .iter()
            .filter(|c| c.matches_lowercase(&query))
            .chain(self.subcategories_flat().filter(|c| c.matches_lowercase(&query)))
            .collect()
    }

    /// Map a book's category names onto taxonomy entries, dropping unknown names
    pub fn categorize(&self, book: &Book) -> Vec<&'static BookCategory> {
        book.categories
            .iter()
            .filter_map(|name| self.by_name(name))
            .collect()
    }

    /// Books tagged with category `id` or any of its subcategories
    pub fn books_in_category<'a>(&self, id: &str, books: &'a [Book]) -> Vec<&'a Book> {
        match self.by_id(id) {
            Some(category) => books.iter().filter(|b| category.contains_book(b)).collect(),
            None => Vec::new(),
        }
    }
}
