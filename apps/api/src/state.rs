use orgdir_application::DirectoryService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub directory_service: DirectoryService,
}
