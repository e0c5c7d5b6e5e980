//! The store's list of ebooks, looked up by title.

use crate::model::Ebook;

/// Ordered collection of ebooks. Titles are not required to be unique.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    ebooks: Vec<Ebook>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, ebook: Ebook) {
        self.ebooks.push(ebook);
    }

    /// Remove every ebook with this title, returning how many were removed.
    pub fn remove(&mut self, title: &str) -> usize {
        let before = self.ebooks.len();
        self.ebooks.retain(|ebook| ebook.title() != title);
        before - self.ebooks.len()
    }

    /// First ebook with this title.
    pub fn find(&self, title: &str) -> Option<&Ebook> {
        self.ebooks.iter().find(|ebook| ebook.title() == title)
    }

    pub fn find_mut(&mut self, title: &str) -> Option<&mut Ebook> {
        self.ebooks.iter_mut().find(|ebook| ebook.title() == title)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ebook> {
        self.ebooks.iter()
    }

    pub fn len(&self) -> usize {
        self.ebooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ebooks.is_empty()
    }
}

impl FromIterator<Ebook> for Catalog {
    fn from_iter<I: IntoIterator<Item = Ebook>>(iter: I) -> Self {
        Self {
            ebooks: iter.into_iter().collect(),
        }
    }
}

impl Extend<Ebook> for Catalog {
    fn extend<I: IntoIterator<Item = Ebook>>(&mut self, iter: I) {
        self.ebooks.extend(iter);
    }
}
