pub mod aws;
pub mod config;
pub mod detection;
pub mod event;
pub mod notifier;
pub mod orchestrator;
pub mod record;
pub mod sentiment;
pub mod store;
pub mod testing;

pub use aws::load_sdk_config;
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, AwsConfig, Config,
    ConfigError, LogFormat, LoggingConfig,
};
pub use detection::{
    DetectionError, Label, LabelDetector, RekognitionDetector, TextDetection, TextDetector,
};
pub use event::{EventError, ObjectRef, S3Event};
pub use notifier::{
    Notification, Notifier, NotifierConfig, NotifierError, PublishReceipt, SnsNotifier,
};
pub use orchestrator::{
    AnalysisConfig, AnalysisError, AnalysisOrchestrator, AnalysisOutcome, AnalysisStage,
    HandlerResponse, MatchStatus,
};
pub use record::{normalize, Decimal, Payload, RecordError, ResultRecord};
pub use sentiment::{ComprehendAnalyzer, Sentiment, SentimentAnalyzer, SentimentError};
pub use store::{DynamoRecordStore, RecordStore, StorageConfig, StoreError};
