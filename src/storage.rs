//! Local persistence for favorites and the shopping list.
//!
//! Each collection lives in its own JSON file under the data directory.
//! Reads are forgiving: a missing or unreadable file is an empty collection.
//! Writes are not, and surface [`StorageError`].

use crate::error::StorageError;
use crate::model::ShoppingItem;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const FAVORITES_FILE: &str = "favorites.json";
const SHOPPING_LIST_FILE: &str = "shopping_list.json";

/// A JSON document on disk holding one collection
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored collection, empty if absent or corrupt
    pub fn load<T: DeserializeOwned + Default>(&self) -> T {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return T::default(),
            Err(e) => {
                warn!("Error reading {}: {}", self.path.display(), e);
                return T::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("Ignoring corrupt {}: {}", self.path.display(), e);
            T::default()
        })
    }

    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&self.path, content)?;
        debug!("Saved {}", self.path.display());
        Ok(())
    }
}

/// Favorite recipe ids, in the order they were added
#[derive(Debug)]
pub struct FavoritesStore {
    store: JsonStore,
    ids: Vec<String>,
}

impl FavoritesStore {
    /// Open the favorites file in `data_dir`
    pub fn open(data_dir: &Path) -> Self {
        let store = JsonStore::new(data_dir.join(FAVORITES_FILE));
        let ids = store.load();
        Self { store, ids }
    }

    pub fn list(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, recipe_id: &str) -> bool {
        self.ids.iter().any(|id| id == recipe_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Add a recipe; adding one that is already a favorite changes nothing
    pub fn add(&mut self, recipe_id: &str) -> Result<(), StorageError> {
        if self.contains(recipe_id) {
            return Ok(());
        }
        self.ids.push(recipe_id.to_string());
        self.store.save(&self.ids)
    }

    pub fn remove(&mut self, recipe_id: &str) -> Result<(), StorageError> {
        self.ids.retain(|id| id != recipe_id);
        self.store.save(&self.ids)
    }

    /// Flip membership, returning whether the recipe is now a favorite
    pub fn toggle(&mut self, recipe_id: &str) -> Result<bool, StorageError> {
        if self.contains(recipe_id) {
            self.remove(recipe_id)?;
            Ok(false)
        } else {
            self.add(recipe_id)?;
            Ok(true)
        }
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.ids.clear();
        self.store.save(&self.ids)
    }
}

/// Ingredients to buy, grouped by the recipe they came from
#[derive(Debug)]
pub struct ShoppingList {
    store: JsonStore,
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    /// Open the shopping list file in `data_dir`
    pub fn open(data_dir: &Path) -> Self {
        let store = JsonStore::new(data_dir.join(SHOPPING_LIST_FILE));
        let items = store.load();
        Self { store, items }
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    /// Add an ingredient, replacing the entry for the same recipe in place
    pub fn add(
        &mut self,
        ingredient: &str,
        measure: &str,
        recipe_id: &str,
        recipe_name: &str,
    ) -> Result<&ShoppingItem, StorageError> {
        let item = ShoppingItem::new(ingredient, measure, recipe_id, recipe_name);
        let index = match self.items.iter().position(|i| i.id == item.id) {
            Some(index) => {
                self.items[index] = item;
                index
            }
            None => {
                self.items.push(item);
                self.items.len() - 1
            }
        };
        self.store.save(&self.items)?;
        Ok(&self.items[index])
    }

    pub fn remove(&mut self, item_id: &str) -> Result<(), StorageError> {
        self.items.retain(|item| item.id != item_id);
        self.store.save(&self.items)
    }

    /// Flip the completed flag, returning the new value; `None` if unknown
    pub fn toggle(&mut self, item_id: &str) -> Result<Option<bool>, StorageError> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) else {
            return Ok(None);
        };
        item.completed = !item.completed;
        let completed = item.completed;
        self.store.save(&self.items)?;
        Ok(Some(completed))
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.store.save(&self.items)
    }

    /// Number of items still to buy
    pub fn pending_count(&self) -> usize {
        self.items.iter().filter(|item| !item.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let favorites = FavoritesStore::open(dir.path());
        assert!(favorites.is_empty());

        let list = ShoppingList::open(dir.path());
        assert!(list.items().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(FAVORITES_FILE), "{not json").unwrap();

        let favorites = FavoritesStore::open(dir.path());
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_favorites_persist() {
        let dir = TempDir::new().unwrap();
        let mut favorites = FavoritesStore::open(dir.path());
        favorites.add("52772").unwrap();
        favorites.add("52795").unwrap();
        favorites.add("52772").unwrap();

        let reopened = FavoritesStore::open(dir.path());
        assert_eq!(reopened.list(), ["52772", "52795"]);
    }

    #[test]
    fn test_favorites_toggle() {
        let dir = TempDir::new().unwrap();
        let mut favorites = FavoritesStore::open(dir.path());

        assert!(favorites.toggle("52772").unwrap());
        assert!(favorites.contains("52772"));
        assert!(!favorites.toggle("52772").unwrap());
        assert!(!favorites.contains("52772"));

        favorites.add("1").unwrap();
        favorites.clear().unwrap();
        assert!(FavoritesStore::open(dir.path()).is_empty());
    }

    #[test]
    fn test_shopping_list_replaces_same_item() {
        let dir = TempDir::new().unwrap();
        let mut list = ShoppingList::open(dir.path());

        list.add("Flour", "100g", "1", "Pancakes").unwrap();
        list.add("Eggs", "2", "1", "Pancakes").unwrap();
        list.add("Flour", "250g", "1", "Pancakes").unwrap();
        list.add("Flour", "1kg", "2", "Bread").unwrap();

        let reopened = ShoppingList::open(dir.path());
        let items = reopened.items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, "1-Flour");
        assert_eq!(items[0].measure, "250g");
        assert_eq!(items[1].id, "1-Eggs");
        assert_eq!(items[2].id, "2-Flour");
    }

    #[test]
    fn test_shopping_list_toggle_and_count() {
        let dir = TempDir::new().unwrap();
        let mut list = ShoppingList::open(dir.path());
        list.add("Flour", "100g", "1", "Pancakes").unwrap();
        list.add("Eggs", "2", "1", "Pancakes").unwrap();

        assert_eq!(list.pending_count(), 2);
        assert_eq!(list.toggle("1-Eggs").unwrap(), Some(true));
        assert_eq!(list.pending_count(), 1);
        assert_eq!(list.toggle("missing").unwrap(), None);

        list.remove("1-Flour").unwrap();
        assert_eq!(list.items().len(), 1);
        assert_eq!(ShoppingList::open(dir.path()).pending_count(), 0);

        list.clear().unwrap();
        assert!(ShoppingList::open(dir.path()).items().is_empty());
    }

    #[test]
    fn test_save_creates_data_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut favorites = FavoritesStore::open(&nested);
        favorites.add("7").unwrap();
        assert!(nested.join(FAVORITES_FILE).exists());
    }
}
