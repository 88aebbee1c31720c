use ctrlpanel_model::{EmailQueueItem, Feature};
use ctrlpanel_store::{EntityStore, StoreResult};

/// The store mutations a command may perform.
///
/// A command calls at most one of these.
pub trait StoreMutation {
    fn add_feature(&mut self, name: &str, description: &str, category: &str)
    -> StoreResult<Feature>;

    fn remove_feature(&mut self, id: &str) -> Option<Feature>;

    fn toggle_feature(&mut self, id: &str) -> StoreResult<Feature>;

    fn clear_command_logs(&mut self);

    fn clear_gps_logs(&mut self);

    fn enqueue_email(&mut self, subject: &str, body: &str) -> EmailQueueItem;
}

impl StoreMutation for EntityStore {
    fn add_feature(
        &mut self,
        name: &str,
        description: &str,
        category: &str,
    ) -> StoreResult<Feature> {
        EntityStore::add_feature(self, name, description, category)
    }

    fn remove_feature(&mut self, id: &str) -> Option<Feature> {
        EntityStore::remove_feature(self, id)
    }

    fn toggle_feature(&mut self, id: &str) -> StoreResult<Feature> {
        EntityStore::toggle_feature(self, id)
    }

    fn clear_command_logs(&mut self) {
        EntityStore::clear_command_logs(self);
    }

    fn clear_gps_logs(&mut self) {
        EntityStore::clear_gps_logs(self);
    }

    fn enqueue_email(&mut self, subject: &str, body: &str) -> EmailQueueItem {
        EntityStore::enqueue_email(self, subject, body)
    }
}
