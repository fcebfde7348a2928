use sea_orm::{ConnectionTrait, DbErr, EntityTrait, QueryOrder, QuerySelect};

/// Case-insensitive substring match on names. Lowercasing is Unicode-aware,
/// so "éclair" finds "Éclair Hall". `%` and `_` are plain characters.
#[derive(Debug, Clone)]
pub struct NameFilter {
    needle: String,
}

impl NameFilter {
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    /// An empty term matches every name.
    pub fn matches(&self, name: &str) -> bool {
        self.needle.is_empty() || name.to_lowercase().contains(&self.needle)
    }
}

/// `(id, name)` rows whose name contains `term`, ordered by id.
///
/// SQLite's `LIKE` only folds ASCII letters, so only the two columns are
/// loaded and the match happens here.
pub async fn search_names<E, C>(
    conn: &C,
    id: E::Column,
    name: E::Column,
    term: &str,
) -> Result<Vec<(i64, String)>, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let filter = NameFilter::new(term);
    let rows: Vec<(i64, String)> = E::find()
        .select_only()
        .column(id)
        .column(name)
        .order_by_asc(id)
        .into_tuple()
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter(|(_, name)| filter.matches(name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_filter_ignores_case() {
        let filter = NameFilter::new("hop");
        assert!(filter.matches("The Musical Hop"));
        assert!(filter.matches("HOP HOUSE"));
        assert!(!filter.matches("Park Square"));
    }

    #[test]
    fn test_name_filter_folds_non_ascii() {
        assert!(NameFilter::new("éclair").matches("Éclair Hall"));
        assert!(NameFilter::new("ÉCLAIR").matches("Café Éclair"));
        assert!(NameFilter::new("straße").matches("STRASSE 9 / Straße"));
        assert!(!NameFilter::new("eclair").matches("Éclair Hall"));
    }

    #[test]
    fn test_name_filter_wildcards_are_literal() {
        assert!(NameFilter::new("100%").matches("100% Jazz"));
        assert!(!NameFilter::new("100%").matches("1000 Jazz"));
        assert!(!NameFilter::new("_").matches("Park Square"));
        assert!(NameFilter::new("a\\b").matches("A\\B Club"));
    }

    #[test]
    fn test_empty_term_matches_everything() {
        assert!(NameFilter::new("").matches("Anything"));
        assert!(NameFilter::new("").matches(""));
    }
}
