use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use nav_dash_lib::{
    achievement::{Achievement, UnlockedAchievement},
    favorite::Favorite,
    theme::{MapType, Theme},
};

use crate::{DATA_DIR, DATABASE_PATH, DataManagerError, database::*};

#[derive(Clone)]
pub struct DataManager {
    pub(crate) database: SettingsDatabase,
}

/// The public interface for all persisted dashboard records: the favorites
/// list, theme choice, map type and achievement flags. Session statistics
/// are ephemeral and never stored here.
impl DataManager {
    pub async fn start() -> Result<Self, DataManagerError> {
        // Create data dir if it doesn't exist
        let root: PathBuf = project_root::get_project_root()
            .map_err(|_| DataManagerError::Database("Failed to locate project root".to_string()))?;
        let data_dir = root.join(DATA_DIR);
        if !data_dir.exists() {
            std::fs::create_dir_all(&data_dir).map_err(|_| {
                DataManagerError::Database(format!("Failed to create data directory: {:?}", data_dir))
            })?;
        }

        Self::start_with_path(&root.join(DATABASE_PATH)).await
    }

    pub async fn start_with_path(database_path: &Path) -> Result<Self, DataManagerError> {
        let database = SettingsDatabase::connect(database_path).await?;

        Ok(DataManager { database })
    }

    pub async fn get_favorites(&self) -> Result<Vec<Favorite>, DataManagerError> {
        self.get_record(FAVORITES_KEY).await
    }

    /// Adds a favorite, replacing any existing entry with the same name.
    pub async fn add_favorite(&self, favorite: Favorite) -> Result<(), DataManagerError> {
        let mut favorites = self.get_favorites().await?;
        favorites.retain(|existing| existing.name != favorite.name);
        favorites.push(favorite);
        self.set_record(FAVORITES_KEY, &favorites).await
    }

    /// Removes a favorite by name. Returns whether anything was removed.
    pub async fn remove_favorite(&self, name: &str) -> Result<bool, DataManagerError> {
        let mut favorites = self.get_favorites().await?;
        let before = favorites.len();
        favorites.retain(|existing| existing.name != name);
        if favorites.len() == before {
            return Ok(false);
        }
        self.set_record(FAVORITES_KEY, &favorites).await?;
        Ok(true)
    }

    pub async fn get_theme(&self) -> Result<Theme, DataManagerError> {
        self.get_record(THEME_KEY).await
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), DataManagerError> {
        self.set_record(THEME_KEY, &theme).await
    }

    pub async fn get_map_type(&self) -> Result<MapType, DataManagerError> {
        self.get_record(MAP_TYPE_KEY).await
    }

    pub async fn set_map_type(&self, map_type: MapType) -> Result<(), DataManagerError> {
        self.set_record(MAP_TYPE_KEY, &map_type).await
    }

    pub async fn get_achievements(&self) -> Result<Vec<UnlockedAchievement>, DataManagerError> {
        self.get_record(ACHIEVEMENTS_KEY).await
    }

    /// Records an unlock flag. Returns false if it was already set; flags
    /// are never revoked.
    pub async fn unlock_achievement(
        &self,
        achievement: Achievement,
        unlocked_at: DateTime<Utc>,
    ) -> Result<bool, DataManagerError> {
        let mut unlocked = self.get_achievements().await?;
        if unlocked.iter().any(|entry| entry.achievement == achievement) {
            return Ok(false);
        }

        tracing::info!("Achievement unlocked: {}", achievement.title());
        unlocked.push(UnlockedAchievement {
            achievement,
            unlocked_at,
        });
        self.set_record(ACHIEVEMENTS_KEY, &unlocked).await?;
        Ok(true)
    }

    async fn get_record<T: serde::de::DeserializeOwned + Default>(
        &self,
        key: &str,
    ) -> Result<T, DataManagerError> {
        match self.database.get_value(key).await? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|_| DataManagerError::Encoding(format!("Corrupt record for key {key}"))),
            None => Ok(T::default()),
        }
    }

    async fn set_record<T: serde::Serialize>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), DataManagerError> {
        let json = serde_json::to_string(value)
            .map_err(|_| DataManagerError::Encoding(format!("Failed to encode record {key}")))?;
        self.database.set_value(key, &json).await
    }
}

#[cfg(test)]
mod tests {
    use geo_types::Point;
    use nav_dash_lib::achievement::Achievement;

    use super::*;

    async fn manager(dir: &tempfile::TempDir) -> DataManager {
        DataManager::start_with_path(&dir.path().join("settings.db"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn defaults_when_nothing_stored() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(&dir).await;

        assert!(manager.get_favorites().await.unwrap().is_empty());
        assert_eq!(manager.get_theme().await.unwrap(), Theme::Dark);
        assert_eq!(manager.get_map_type().await.unwrap(), MapType::Standard);
        assert!(manager.get_achievements().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn favorites_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(&dir).await;
        let now = Utc::now();

        manager
            .add_favorite(Favorite::new("Home".into(), Point::new(12.57, 55.68), now))
            .await
            .unwrap();
        manager
            .add_favorite(Favorite::new("Work".into(), Point::new(12.59, 55.67), now))
            .await
            .unwrap();

        let favorites = manager.get_favorites().await.unwrap();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].name, "Home");

        assert!(manager.remove_favorite("Home").await.unwrap());
        assert!(!manager.remove_favorite("Home").await.unwrap());
        assert_eq!(manager.get_favorites().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_favorite_replaces_same_name() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(&dir).await;
        let now = Utc::now();

        manager
            .add_favorite(Favorite::new("Home".into(), Point::new(12.57, 55.68), now))
            .await
            .unwrap();
        manager
            .add_favorite(Favorite::new("Home".into(), Point::new(10.20, 56.16), now))
            .await
            .unwrap();

        let favorites = manager.get_favorites().await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].position, Point::new(10.20, 56.16));
    }

    #[tokio::test]
    async fn theme_and_map_type_persist() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(&dir).await;

        manager.set_theme(Theme::Light).await.unwrap();
        manager.set_map_type(MapType::Night).await.unwrap();

        assert_eq!(manager.get_theme().await.unwrap(), Theme::Light);
        assert_eq!(manager.get_map_type().await.unwrap(), MapType::Night);
    }

    #[tokio::test]
    async fn achievements_unlock_once() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(&dir).await;
        let now = Utc::now();

        assert!(manager
            .unlock_achievement(Achievement::FirstDrive, now)
            .await
            .unwrap());
        assert!(!manager
            .unlock_achievement(Achievement::FirstDrive, now)
            .await
            .unwrap());

        let unlocked = manager.get_achievements().await.unwrap();
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].achievement, Achievement::FirstDrive);
    }
}
