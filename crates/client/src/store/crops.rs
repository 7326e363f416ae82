//! Crops collection.

use harvest_trail_core::{CropId, UserId};

use super::{RecordStore, StoreError};
use crate::models::Crop;

const CROPS_FILE: &str = "crops.json";

/// Store operations on the crops collection.
pub struct CropStore<'a> {
    store: &'a RecordStore,
}

impl<'a> CropStore<'a> {
    pub(super) const fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Every locally stored crop, across all owners.
    #[must_use]
    pub fn all(&self) -> Vec<Crop> {
        self.store.read_collection(CROPS_FILE)
    }

    /// Crops owned by one user.
    #[must_use]
    pub fn for_user(&self, user_id: UserId) -> Vec<Crop> {
        self.all()
            .into_iter()
            .filter(|c| c.user_id == Some(user_id))
            .collect()
    }

    /// Look up a single crop.
    #[must_use]
    pub fn find(&self, id: CropId) -> Option<Crop> {
        self.all().into_iter().find(|c| c.id == id)
    }

    /// Append a crop record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the collection cannot be written.
    pub fn add(&self, crop: Crop) -> Result<Crop, StoreError> {
        let mut crops = self.all();
        crops.push(crop.clone());
        self.store.write_collection(CROPS_FILE, &crops)?;
        Ok(crop)
    }

    /// Apply an in-place edit to a stored crop.
    ///
    /// Returns `false` (without touching the file) when the crop is not in
    /// the collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the collection cannot be written.
    pub fn update(&self, id: CropId, apply: impl FnOnce(&mut Crop)) -> Result<bool, StoreError> {
        let mut crops = self.all();

        let Some(crop) = crops.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };

        apply(crop);
        self.store.write_collection(CROPS_FILE, &crops)?;
        Ok(true)
    }

    /// Remove a crop. Returns `false` when it was not in the collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the collection cannot be written.
    pub fn remove(&self, id: CropId) -> Result<bool, StoreError> {
        let mut crops = self.all();
        let before = crops.len();
        crops.retain(|c| c.id != id);

        if crops.len() == before {
            return Ok(false);
        }

        self.store.write_collection(CROPS_FILE, &crops)?;
        Ok(true)
    }

    /// Remove every crop owned by a user (admin delete cascade).
    pub(crate) fn remove_for_user(&self, user_id: UserId) -> Result<(), StoreError> {
        let mut crops = self.all();
        let before = crops.len();
        crops.retain(|c| c.user_id != Some(user_id));

        if crops.len() != before {
            self.store.write_collection(CROPS_FILE, &crops)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn crop(id: i64, owner: i64) -> Crop {
        Crop {
            id: CropId::new(id),
            user_id: Some(UserId::new(owner)),
            name: format!("Crop {id}"),
            crop_type: "Vegetable".to_string(),
            harvest_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            soil_type: "Loam".to_string(),
            pesticides_used: "None".to_string(),
            image_url: None,
            created_at: Utc::now(),
            farmer_info: None,
            distributor_info: None,
            retailer_info: None,
        }
    }

    fn open() -> (tempfile::TempDir, RecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_for_user_filters_by_owner() {
        let (_dir, store) = open();
        store.crops().add(crop(1, 10)).unwrap();
        store.crops().add(crop(2, 20)).unwrap();
        store.crops().add(crop(3, 10)).unwrap();

        let mine = store.crops().for_user(UserId::new(10));
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|c| c.user_id == Some(UserId::new(10))));
    }

    #[test]
    fn test_update_merges_in_place() {
        let (_dir, store) = open();
        store.crops().add(crop(1, 10)).unwrap();

        let changed = store
            .crops()
            .update(CropId::new(1), |c| c.name = "Renamed".to_string())
            .unwrap();
        assert!(changed);
        assert_eq!(store.crops().find(CropId::new(1)).unwrap().name, "Renamed");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (_dir, store) = open();
        store.crops().add(crop(1, 10)).unwrap();

        let changed = store
            .crops()
            .update(CropId::new(99), |c| c.name = "Ghost".to_string())
            .unwrap();
        assert!(!changed);
        assert_eq!(store.crops().all().len(), 1);
    }

    #[test]
    fn test_remove() {
        let (_dir, store) = open();
        store.crops().add(crop(1, 10)).unwrap();

        assert!(store.crops().remove(CropId::new(1)).unwrap());
        assert!(!store.crops().remove(CropId::new(1)).unwrap());
        assert!(store.crops().find(CropId::new(1)).is_none());
    }

    #[test]
    fn test_remove_for_user_cascade() {
        let (_dir, store) = open();
        store.crops().add(crop(1, 10)).unwrap();
        store.crops().add(crop(2, 20)).unwrap();

        store.crops().remove_for_user(UserId::new(10)).unwrap();
        let remaining = store.crops().all();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining.first().map(|c| c.id), Some(CropId::new(2)));
    }
}
