//! Photo and its comments.
//!
//! A photo owns its comments: deleting the photo deletes them, and a comment
//! dropped from the collection is deleted the next time the photo is merged.
//! Comments point back at their photo through a [`PhotoRef`], a typed key that
//! stands in for the photo without loading it.

use chrono::NaiveDateTime;
use std::fmt;

/// Reference to a photo row by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoRef(i64);

impl PhotoRef {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Photo#{}", self.0)
    }
}

/// A row of the `photo_comment` table.
#[derive(Debug, Clone)]
pub struct PhotoComment {
    pub id: Option<i64>,
    pub text: String,
    pub created_on: Option<NaiveDateTime>,
    photo: Option<PhotoRef>,
}

impl PhotoComment {
    pub fn new(text: &str) -> Self {
        Self {
            id: None,
            text: text.to_string(),
            created_on: None,
            photo: None,
        }
    }

    /// The photo this comment belongs to, if attached to a persisted one.
    pub fn photo(&self) -> Option<PhotoRef> {
        self.photo
    }

    pub(crate) fn attach_to(&mut self, photo: PhotoRef) {
        self.photo = Some(photo);
    }
}

impl PartialEq for PhotoComment {
    fn eq(&self, other: &Self) -> bool {
        self.id.is_some() && self.id == other.id
    }
}

/// A row of the `photo` table with its comments.
#[derive(Debug, Clone)]
pub struct Photo {
    pub id: Option<i64>,
    /// Unique across all photos.
    pub url: String,
    pub description: Option<String>,
    comments: Vec<PhotoComment>,
}

impl Photo {
    pub fn new(url: &str, description: Option<&str>) -> Self {
        Self {
            id: None,
            url: url.to_string(),
            description: description.map(str::to_string),
            comments: Vec::new(),
        }
    }

    pub fn comments(&self) -> &[PhotoComment] {
        &self.comments
    }

    /// Reference to this photo, once it has an id.
    pub fn reference(&self) -> Option<PhotoRef> {
        self.id.map(PhotoRef::new)
    }

    /// Attaches `comment` to this photo, setting its back-reference.
    pub fn add_comment(&mut self, mut comment: PhotoComment) {
        comment.photo = self.reference();
        self.comments.push(comment);
    }

    /// Detaches the persisted comment equal to `comment` and returns it with
    /// the back-reference cleared. Comments without an id never match; use
    /// [`Photo::remove_comment_at`] for those.
    pub fn remove_comment(&mut self, comment: &PhotoComment) -> Option<PhotoComment> {
        let index = self.comments.iter().position(|c| c == comment)?;
        self.remove_comment_at(index)
    }

    /// Detaches the comment at `index`, saved or not, and returns it with the
    /// back-reference cleared. `None` when `index` is out of bounds.
    pub fn remove_comment_at(&mut self, index: usize) -> Option<PhotoComment> {
        if index >= self.comments.len() {
            return None;
        }
        let mut removed = self.comments.remove(index);
        removed.photo = None;
        Some(removed)
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
        for comment in &mut self.comments {
            comment.photo = Some(PhotoRef::new(id));
        }
    }

    pub(crate) fn comments_mut(&mut self) -> &mut [PhotoComment] {
        &mut self.comments
    }
}

impl PartialEq for Photo {
    fn eq(&self, other: &Self) -> bool {
        self.id.is_some() && self.id == other.id
    }
}
