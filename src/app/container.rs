use std::sync::Arc;

use crate::adapters::{FfmpegProcessAdapter, FsLocalAdapter, TomlConfigAdapter, TracingLogAdapter};
use crate::app::extract_interactor::ExtractInteractor;
use crate::domain::errors::DomainError;
use crate::ports::{ConfigPort, ExecutePort, FsPort, LogPort};

pub trait AppContainer: Send + Sync {
    fn extract_interactor(&self) -> Arc<ExtractInteractor>;
}

pub struct DefaultAppContainer {
    extract_interactor: Arc<ExtractInteractor>,
}

impl DefaultAppContainer {
    /// Wire the production adapters around an already layered configuration
    pub async fn new(config: Arc<TomlConfigAdapter>) -> Result<Self, DomainError> {
        let execute_port = Arc::new(FfmpegProcessAdapter::from_config(config.as_ref()).await?);
        let fs_port = Arc::new(FsLocalAdapter::new());
        let log_port = Arc::new(TracingLogAdapter::new("extract"));

        let extract_interactor = Arc::new(ExtractInteractor::new(
            execute_port as Arc<dyn ExecutePort>,
            fs_port as Arc<dyn FsPort>,
            config as Arc<dyn ConfigPort>,
            log_port as Arc<dyn LogPort>,
        ));

        Ok(Self { extract_interactor })
    }
}

impl AppContainer for DefaultAppContainer {
    fn extract_interactor(&self) -> Arc<ExtractInteractor> {
        Arc::clone(&self.extract_interactor)
    }
}
