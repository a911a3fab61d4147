//! Merging stored translations into film records.

use std::collections::HashMap;

use moviehunt_core::types::DbId;
use moviehunt_db::models::film::{Film, FilmSummary};
use moviehunt_db::models::staff_pick::StaffPickEntry;
use moviehunt_db::models::translation::FilmTranslation;

/// A record carrying a film's translatable editorial text.
pub trait Translatable {
    fn film_id(&self) -> DbId;
    fn title_mut(&mut self) -> &mut String;
    fn synopsis_mut(&mut self) -> &mut Option<String>;

    /// Listing views carry no review body.
    fn review_mut(&mut self) -> Option<&mut Option<String>> {
        None
    }
}

impl Translatable for Film {
    fn film_id(&self) -> DbId {
        self.id
    }
    fn title_mut(&mut self) -> &mut String {
        &mut self.title
    }
    fn synopsis_mut(&mut self) -> &mut Option<String> {
        &mut self.synopsis
    }
    fn review_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.review)
    }
}

impl Translatable for FilmSummary {
    fn film_id(&self) -> DbId {
        self.id
    }
    fn title_mut(&mut self) -> &mut String {
        &mut self.title
    }
    fn synopsis_mut(&mut self) -> &mut Option<String> {
        &mut self.synopsis
    }
}

impl Translatable for StaffPickEntry {
    fn film_id(&self) -> DbId {
        self.film.id
    }
    fn title_mut(&mut self) -> &mut String {
        &mut self.film.title
    }
    fn synopsis_mut(&mut self) -> &mut Option<String> {
        &mut self.film.synopsis
    }
}

/// Override `title`, `synopsis` and `review` with the translated values that
/// are present and non-blank. Everything else keeps the original text.
pub fn merge_translation<T: Translatable>(target: &mut T, translation: &FilmTranslation) {
    if let Some(title) = non_blank(&translation.title) {
        *target.title_mut() = title.to_string();
    }
    if let Some(synopsis) = non_blank(&translation.synopsis) {
        *target.synopsis_mut() = Some(synopsis.to_string());
    }
    if let (Some(review), Some(slot)) = (non_blank(&translation.review), target.review_mut()) {
        *slot = Some(review.to_string());
    }
}

/// Apply each translation to the record with the matching film id.
pub fn apply_translations<T: Translatable>(items: &mut [T], translations: &[FilmTranslation]) {
    if translations.is_empty() {
        return;
    }
    let by_film: HashMap<DbId, &FilmTranslation> =
        translations.iter().map(|t| (t.film_id, t)).collect();
    for item in items {
        if let Some(translation) = by_film.get(&item.film_id()) {
            merge_translation(item, translation);
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
