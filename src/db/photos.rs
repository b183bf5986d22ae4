//! Session-managed photo DAO.
//!
//! Writes run in [`do_in_transaction`], so a failure part-way through leaves
//! no rows behind. The photo's comment collection is treated as owned:
//!
//! - saving a photo inserts its comments,
//! - merging a photo inserts new comments, updates existing ones, and deletes
//!   stored comments that are no longer in the collection,
//! - removing a photo deletes its comments through `ON DELETE CASCADE`.
//!
//! ```rust,no_run
//! use daolab::db::data_source::SqliteDataSource;
//! use daolab::db::photos::{PhotoDao, Photos};
//! use daolab::libs::photo::Photo;
//!
//! let dao = Photos::new(SqliteDataSource::new()?);
//! let mut photo = Photo::new("https://example.com/cat.png", Some("cat"));
//! dao.save(&mut photo)?;
//! dao.add_comment(photo.id.unwrap(), "nice")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::data_source::DataSource;
use crate::db::session::{do_in_transaction, do_read_only};
use crate::libs::error::{Context, DaoResult};
use crate::libs::messages::Message;
use crate::libs::photo::{Photo, PhotoComment, PhotoRef};
use crate::{bail_op_failed, msg_debug, msg_warning};
use chrono::{Local, NaiveDateTime};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::collections::HashMap;

const INSERT_PHOTO: &str = "INSERT INTO photo (url, description) VALUES (?1, ?2)";
const UPDATE_PHOTO: &str = "UPDATE photo SET url = ?1, description = ?2 WHERE id = ?3";
const DELETE_PHOTO: &str = "DELETE FROM photo WHERE id = ?1";
const SELECT_PHOTO_ID: &str = "SELECT id FROM photo WHERE id = ?1";
const SELECT_PHOTO_BY_ID: &str = "SELECT id, url, description FROM photo WHERE id = ?1";
const SELECT_ALL_PHOTOS: &str = "SELECT id, url, description FROM photo";
const INSERT_COMMENT: &str = "INSERT INTO photo_comment (text, created_on, photo_id) VALUES (?1, ?2, ?3)";
const UPDATE_COMMENT: &str = "UPDATE photo_comment SET text = ?1 WHERE id = ?2 AND photo_id = ?3";
const SELECT_COMMENTS_BY_PHOTO: &str =
    "SELECT id, text, created_on, photo_id FROM photo_comment WHERE photo_id = ?1 ORDER BY id";
const SELECT_ALL_COMMENTS: &str = "SELECT id, text, created_on, photo_id FROM photo_comment ORDER BY id";
const DELETE_COMMENTS_OF_PHOTO: &str = "DELETE FROM photo_comment WHERE photo_id = ?";
const AND_ID_NOT_IN: &str = "AND id NOT IN";

pub trait PhotoDao {
    /// Inserts a new photo and its comments.
    fn save(&self, photo: &mut Photo) -> DaoResult<()>;

    /// The photo with its comments, or `None` if no such row exists.
    fn find_by_id(&self, id: i64) -> DaoResult<Option<Photo>>;

    /// Every photo with its comments, loaded in two queries on a read-only
    /// session.
    fn find_all(&self) -> DaoResult<Vec<Photo>>;

    /// Writes the photo's current state, including its comment collection.
    fn merge(&self, photo: &mut Photo) -> DaoResult<()>;

    /// Deletes the stored photo matching `photo`, and its comments.
    fn remove(&self, photo: &Photo) -> DaoResult<()>;

    /// Adds a comment to the photo with `photo_id` without loading the photo.
    fn add_comment(&self, photo_id: i64, text: &str) -> DaoResult<PhotoComment>;
}

/// Photo store backed by any [`DataSource`].
pub struct Photos<D: DataSource> {
    data_source: D,
}

impl<D: DataSource> Photos<D> {
    pub fn new(data_source: D) -> Self {
        Self { data_source }
    }
}

impl<D: DataSource> PhotoDao for Photos<D> {
    fn save(&self, photo: &mut Photo) -> DaoResult<()> {
        if let Some(id) = photo.id {
            bail_op_failed!(Message::PhotoAlreadyPersisted(id));
        }

        let now = Local::now().naive_local();
        let save_failed = || Message::PhotoSaveFailed(photo.url.clone());
        let (photo_id, written) = do_in_transaction(&self.data_source, |tx| {
            tx.execute(INSERT_PHOTO, params![photo.url, photo.description])
                .with_context(save_failed)?;
            let photo_id = tx.last_insert_rowid();
            let written = write_comments(tx, photo_id, photo.comments(), now).with_context(save_failed)?;
            Ok((photo_id, written))
        })
        .inspect_err(|e| msg_warning!(e))?;

        photo.assign_id(photo_id);
        apply_written(photo, written);
        msg_debug!(Message::PhotoSaved(photo_id));
        Ok(())
    }

    fn find_by_id(&self, id: i64) -> DaoResult<Option<Photo>> {
        do_in_transaction(&self.data_source, |tx| {
            let photo = tx
                .query_row(SELECT_PHOTO_BY_ID, params![id], extract_photo)
                .optional()
                .context(Message::PhotoFetchFailed(id))?;
            let Some(mut photo) = photo else {
                return Ok(None);
            };

            let mut stmt = tx.prepare(SELECT_COMMENTS_BY_PHOTO).context(Message::PhotoFetchFailed(id))?;
            let comments = stmt
                .query_map(params![id], extract_comment)
                .context(Message::PhotoFetchFailed(id))?
                .collect::<Result<Vec<_>, _>>()
                .context(Message::PhotoFetchFailed(id))?;
            for (comment, _) in comments {
                photo.add_comment(comment);
            }
            Ok(Some(photo))
        })
    }

    fn find_all(&self) -> DaoResult<Vec<Photo>> {
        do_read_only(&self.data_source, |conn| {
            let mut stmt = conn.prepare(SELECT_ALL_PHOTOS).context(Message::PhotosFetchFailed)?;
            let mut photos = stmt
                .query_map([], extract_photo)
                .context(Message::PhotosFetchFailed)?
                .collect::<Result<Vec<_>, _>>()
                .context(Message::PhotosFetchFailed)?;

            let mut stmt = conn.prepare(SELECT_ALL_COMMENTS).context(Message::PhotosFetchFailed)?;
            let comment_iter = stmt
                .query_map([], extract_comment)
                .context(Message::PhotosFetchFailed)?;

            let mut comments_by_photo: HashMap<i64, Vec<PhotoComment>> = HashMap::new();
            for comment in comment_iter {
                let (comment, photo_id) = comment.context(Message::PhotosFetchFailed)?;
                comments_by_photo.entry(photo_id).or_default().push(comment);
            }

            for photo in &mut photos {
                let comments = photo.id.and_then(|id| comments_by_photo.remove(&id)).unwrap_or_default();
                for comment in comments {
                    photo.add_comment(comment);
                }
            }
            Ok(photos)
        })
    }

    fn merge(&self, photo: &mut Photo) -> DaoResult<()> {
        let Some(photo_id) = photo.id else {
            bail_op_failed!(Message::PhotoIdNull);
        };

        let now = Local::now().naive_local();
        let merge_failed = || Message::PhotoMergeFailed(photo_id);
        let written = do_in_transaction(&self.data_source, |tx| {
            let rows = tx
                .execute(UPDATE_PHOTO, params![photo.url, photo.description, photo_id])
                .with_context(merge_failed)?;
            if rows == 0 {
                bail_op_failed!(Message::PhotoNotFound(photo_id));
            }

            let written = write_comments(tx, photo_id, photo.comments(), now).with_context(merge_failed)?;
            let kept: Vec<i64> = written.iter().map(|(id, _)| *id).collect();
            let removed = delete_orphans(tx, photo_id, &kept).with_context(merge_failed)?;
            if removed > 0 {
                msg_debug!(Message::OrphanCommentsRemoved(photo_id, removed));
            }
            Ok(written)
        })
        .inspect_err(|e| msg_warning!(e))?;

        apply_written(photo, written);
        msg_debug!(Message::PhotoMerged(photo_id));
        Ok(())
    }

    fn remove(&self, photo: &Photo) -> DaoResult<()> {
        let Some(photo_id) = photo.id else {
            bail_op_failed!(Message::PhotoIdNull);
        };

        do_in_transaction(&self.data_source, |tx| {
            // The caller's instance may be stale; act on the stored row.
            let managed: Option<i64> = tx
                .query_row(SELECT_PHOTO_ID, params![photo_id], |row| row.get(0))
                .optional()
                .context(Message::PhotoRemoveFailed(photo_id))?;
            let Some(managed) = managed else {
                bail_op_failed!(Message::PhotoNotFound(photo_id));
            };

            tx.execute(DELETE_PHOTO, params![managed])
                .context(Message::PhotoRemoveFailed(photo_id))?;
            Ok(())
        })
        .inspect_err(|e| msg_warning!(e))?;

        msg_debug!(Message::PhotoRemoved(photo_id));
        Ok(())
    }

    fn add_comment(&self, photo_id: i64, text: &str) -> DaoResult<PhotoComment> {
        let reference = PhotoRef::new(photo_id);
        let mut comment = PhotoComment::new(text);
        comment.created_on = Some(Local::now().naive_local());
        comment.attach_to(reference);

        let comment_id = do_in_transaction(&self.data_source, |tx| {
            insert_comment(tx, &comment, reference).context(Message::CommentAddFailed(photo_id))
        })
        .inspect_err(|e| msg_warning!(e))?;

        comment.id = Some(comment_id);
        msg_debug!(Message::CommentAdded(photo_id, comment_id));
        Ok(comment)
    }
}

fn extract_photo(row: &Row<'_>) -> rusqlite::Result<Photo> {
    let mut photo = Photo::new(&row.get::<_, String>(1)?, row.get::<_, Option<String>>(2)?.as_deref());
    photo.id = Some(row.get(0)?);
    Ok(photo)
}

/// Maps a comment row, returning the owning photo id alongside it.
fn extract_comment(row: &Row<'_>) -> rusqlite::Result<(PhotoComment, i64)> {
    let mut comment = PhotoComment::new(&row.get::<_, String>(1)?);
    comment.id = Some(row.get(0)?);
    comment.created_on = row.get(2)?;
    Ok((comment, row.get(3)?))
}

fn insert_comment(conn: &Connection, comment: &PhotoComment, photo: PhotoRef) -> rusqlite::Result<i64> {
    conn.execute(INSERT_COMMENT, params![comment.text, comment.created_on, photo.id()])?;
    Ok(conn.last_insert_rowid())
}

/// Inserts comments without an id and updates the text of the others.
///
/// Returns `(id, created_on)` for every comment, in collection order. A
/// comment whose id no longer matches a row of this photo is inserted again
/// under a new id.
fn write_comments(
    conn: &Connection,
    photo_id: i64,
    comments: &[PhotoComment],
    now: NaiveDateTime,
) -> rusqlite::Result<Vec<(i64, NaiveDateTime)>> {
    let reference = PhotoRef::new(photo_id);
    let mut written = Vec::with_capacity(comments.len());

    for comment in comments {
        let created_on = comment.created_on.unwrap_or(now);
        let updated = match comment.id {
            Some(id) => conn.execute(UPDATE_COMMENT, params![comment.text, id, photo_id])? > 0,
            None => false,
        };

        let id = match comment.id {
            Some(id) if updated => id,
            _ => {
                let mut fresh = comment.clone();
                fresh.created_on = Some(created_on);
                insert_comment(conn, &fresh, reference)?
            }
        };
        written.push((id, created_on));
    }

    Ok(written)
}

/// Deletes this photo's comments whose ids are not in `kept`.
fn delete_orphans(conn: &Connection, photo_id: i64, kept: &[i64]) -> rusqlite::Result<usize> {
    if kept.is_empty() {
        return conn.execute(DELETE_COMMENTS_OF_PHOTO, params![photo_id]);
    }

    let sql = format!("{} {} ({})", DELETE_COMMENTS_OF_PHOTO, AND_ID_NOT_IN, vec!["?"; kept.len()].join(", "));
    conn.execute(&sql, params_from_iter(std::iter::once(&photo_id).chain(kept.iter())))
}

fn apply_written(photo: &mut Photo, written: Vec<(i64, NaiveDateTime)>) {
    let reference = photo.reference();
    for (comment, (id, created_on)) in photo.comments_mut().iter_mut().zip(written) {
        comment.id = Some(id);
        comment.created_on = Some(created_on);
        if let Some(reference) = reference {
            comment.attach_to(reference);
        }
    }
}
