use crate::service::ScrapeService;

#[derive(Clone)]
pub struct AppState {
    pub service: ScrapeService,
}

impl AppState {
    pub fn new(service: ScrapeService) -> Self {
        Self { service }
    }
}
