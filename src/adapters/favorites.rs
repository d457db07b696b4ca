use crate::domain::model::{FavoriteCount, FavoriteMark, ItemId};
use crate::domain::ports::{ConfigProvider, FavoriteCountSource};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

/// Favorite-mark store held in memory.
///
/// Marks are keyed by the (user, item) pair, so a user favoriting the same
/// item twice counts once. Counts are grouped in the order items were first
/// seen, which is the tie order `top_counts` reports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFavoriteStore {
    counts: Vec<FavoriteCount>,
}

impl InMemoryFavoriteStore {
    pub fn from_marks<I>(marks: I) -> Self
    where
        I: IntoIterator<Item = FavoriteMark>,
    {
        let mut seen: HashSet<(String, ItemId)> = HashSet::new();
        let mut slots: HashMap<ItemId, usize> = HashMap::new();
        let mut counts: Vec<FavoriteCount> = Vec::new();

        for mark in marks {
            if !seen.insert((mark.user_id, mark.item_id.clone())) {
                continue;
            }
            match slots.get(&mark.item_id) {
                Some(&slot) => counts[slot].quantity += 1,
                None => {
                    slots.insert(mark.item_id.clone(), counts.len());
                    counts.push(FavoriteCount {
                        id: mark.item_id,
                        quantity: 1,
                    });
                }
            }
        }

        Self { counts }
    }

    /// Loads marks from CSV with a `user_id,item_id` header.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let marks = csv_reader
            .deserialize::<FavoriteMark>()
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

        tracing::debug!("Loaded {} favorite marks", marks.len());
        Ok(Self::from_marks(marks))
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::info!("📂 Loading favorite marks from {}", path.as_ref().display());
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Loads the marks file named by the configuration, which must be set.
    pub fn from_config<P: ConfigProvider>(config: &P) -> Result<Self> {
        let marks_path = config.favorites_path();
        let path = validate_required_field("favorites.marks_path", &marks_path)?;
        Self::from_csv_path(path)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FavoriteCountSource for InMemoryFavoriteStore {
    fn top_counts(&self) -> Result<Vec<FavoriteCount>> {
        let mut grouped = self.counts.clone();
        grouped.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        Ok(grouped)
    }
}
