//! URL slugs for film pages (`/films/the-third-man-1949`).

/// Build a slug from a title and optional release year.
///
/// Common Latin accents are folded to ASCII; every other non-alphanumeric run
/// becomes a single `-`.
///
/// ```
/// use moviehunt_core::slug::slugify;
/// assert_eq!(slugify("Amélie", Some(2001)), "amelie-2001");
/// assert_eq!(slugify("  8½ ", None), "8");
/// ```
pub fn slugify(title: &str, year: Option<i32>) -> String {
    let mut slug = String::with_capacity(title.len() + 5);
    let mut pending_dash = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        let folded = fold_accent(c);
        if folded.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(folded);
        } else {
            pending_dash = true;
        }
    }

    if let Some(year) = year {
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.push_str(&year.to_string());
    }
    slug
}

/// Slug for a film page.
///
/// Titles without any Latin letter or digit (`東京物語`) fall back to
/// `film-<tmdb_id>` when the film came from TMDB. Returns `None` when nothing
/// usable can be derived.
pub fn film_slug(title: &str, year: Option<i32>, tmdb_id: Option<i32>) -> Option<String> {
    if slugify(title, None).is_empty() {
        if let Some(id) = tmdb_id {
            return Some(format!("film-{id}"));
        }
    }
    let slug = slugify(title, year);
    (!slug.is_empty()).then_some(slug)
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
