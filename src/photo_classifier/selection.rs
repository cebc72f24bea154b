use crate::library::logger::interface::Logger;
use crate::results_drawer::SelectionDelegate;
use std::sync::Arc;

pub struct SelectionLogger {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl SelectionLogger {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("selection"),
        }
    }
}

impl SelectionDelegate for SelectionLogger {
    fn on_item_selected(&self, label: &str) {
        let _ = self.logger.info(&format!("Selected {:?}", label));
    }
}
